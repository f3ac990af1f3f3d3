//! Dice roll results and aggregation.

use gw_core::Die;
use serde::{Deserialize, Serialize};

use super::DiceTag;

/// The result of rolling a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// The size of die that was rolled.
    pub die: Die,
    /// The tag on this die.
    pub tag: DiceTag,
    /// The value rolled (1 to die.sides()).
    pub value: u32,
}

/// The result of rolling an entire roll pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Build a result from stat and thorn values, in that order.
    pub fn from_values(stat: &[u32], thorns: &[u32]) -> Self {
        let stat = stat.iter().map(|&value| DieResult {
            die: Die::D6,
            tag: DiceTag::Stat,
            value,
        });
        let thorns = thorns.iter().map(|&value| DieResult {
            die: Die::D8,
            tag: DiceTag::Thorn,
            value,
        });
        Self {
            dice: stat.chain(thorns).collect(),
        }
    }

    /// Get all die results with a specific tag.
    pub fn by_tag(&self, tag: DiceTag) -> impl Iterator<Item = &DieResult> {
        self.dice.iter().filter(move |d| d.tag == tag)
    }

    /// The highest value among dice with a specific tag, or 0 if none.
    pub fn highest_by_tag(&self, tag: DiceTag) -> u32 {
        self.by_tag(tag).map(|d| d.value).max().unwrap_or(0)
    }

    /// Count dice with a specific tag at or above the given threshold.
    pub fn count_at_or_above(&self, tag: DiceTag, threshold: u32) -> u32 {
        self.by_tag(tag).filter(|d| d.value >= threshold).count() as u32
    }

    /// Values of dice with a specific tag, in roll order.
    pub fn values(&self, tag: DiceTag) -> Vec<u32> {
        self.by_tag(tag).map(|d| d.value).collect()
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |tag| {
            self.values(tag)
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "[{}] thorns [{}]", join(DiceTag::Stat), join(DiceTag::Thorn))
    }
}
