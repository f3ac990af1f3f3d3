//! The roll decision boundary.
//!
//! Before a stat roll, the player chooses how many dice to roll, how many
//! thorns to add, who assists, and how much spark to spend. The resolver
//! asks for those choices through [`RollDecisionInterface`] and does not
//! depend on how they are gathered (dialog, chat command, test script).

use async_trait::async_trait;
use gw_core::ActorId;
use serde::{Deserialize, Serialize};

/// What the player is shown before choosing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollSnapshot {
    /// Spark available to spend.
    pub spark: u32,
    /// The stat being rolled.
    pub stat: String,
    /// Suggested stat dice: the stat's value.
    pub dice_default: u32,
    /// Whether the character is bloodied.
    pub is_bloodied: bool,
    /// Whether the character is rattled.
    pub is_rattled: bool,
    /// Whether the rolled stat is marked.
    pub is_marked: bool,
}

/// Someone helping with the roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assister {
    /// Display name.
    pub name: String,
    /// The assisting actor, if it is one.
    #[serde(default)]
    pub actor: Option<ActorId>,
}

impl Assister {
    /// An assister known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actor: None,
        }
    }
}

/// The player's choices for a roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Stat dice to roll.
    pub dice: u32,
    /// Thorn dice to roll.
    pub thorns: u32,
    /// Who is assisting.
    #[serde(default)]
    pub assisters: Vec<Assister>,
    /// Spark steps to spend.
    #[serde(default)]
    pub spark_used: u32,
}

impl Decision {
    /// Roll the suggested dice with no thorns, assists, or spark.
    pub fn accept_defaults(snapshot: &RollSnapshot) -> Self {
        Self {
            dice: snapshot.dice_default,
            ..Self::default()
        }
    }
}

/// The answer to a decision request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionResponse {
    /// The player made their choices.
    Decided(Decision),
    /// The player dismissed the prompt.
    Cancelled,
}

/// Gathers a player's roll choices.
///
/// `request` may wait indefinitely for the player; the resolver changes
/// nothing while it is pending.
#[async_trait]
pub trait RollDecisionInterface: Send + Sync {
    /// Ask for choices given the snapshot.
    async fn request(&self, snapshot: &RollSnapshot) -> DecisionResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RollSnapshot {
        RollSnapshot {
            spark: 1,
            stat: "bra".to_string(),
            dice_default: 2,
            is_bloodied: false,
            is_rattled: true,
            is_marked: false,
        }
    }

    #[test]
    fn accept_defaults_uses_stat_dice() {
        let d = Decision::accept_defaults(&snapshot());
        assert_eq!(d.dice, 2);
        assert_eq!(d.thorns, 0);
        assert_eq!(d.spark_used, 0);
        assert!(d.assisters.is_empty());
    }

    #[test]
    fn snapshot_field_names() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["diceDefault"], 2);
        assert_eq!(json["isRattled"], true);
    }

    #[test]
    fn decision_from_dialog_json() {
        let d: Decision = serde_json::from_str(
            r#"{ "dice": 3, "thorns": 1, "assisters": [{ "name": "Ash" }], "sparkUsed": 1 }"#,
        )
        .unwrap();
        assert_eq!(d.assisters, vec![Assister::named("Ash")]);
        assert_eq!(d.spark_used, 1);
    }
}
