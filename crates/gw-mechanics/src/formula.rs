//! The stat-roll dice formula.
//!
//! A stat roll is `{Nd6kh, Md8}`: N six-sided stat dice keeping the highest,
//! alongside M eight-sided thorn dice that are all kept.

use std::str::FromStr;

use gw_core::Die;
use serde::{Deserialize, Serialize};

use crate::dice::{DiceTag, RollPool};
use crate::error::MechError;

/// Die size used for stat dice.
pub const STAT_DIE: Die = Die::D6;
/// Die size used for thorn dice.
pub const THORN_DIE: Die = Die::D8;
/// Most dice of either kind a single roll may use.
pub const MAX_DICE: u32 = 20;

/// Dice counts for one stat roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollFormula {
    /// Number of stat dice.
    pub stat_dice: u32,
    /// Number of thorn dice.
    pub thorns: u32,
}

impl RollFormula {
    /// Create a formula.
    pub fn new(stat_dice: u32, thorns: u32) -> Self {
        Self { stat_dice, thorns }
    }

    /// Create a formula, rejecting counts above [`MAX_DICE`].
    pub fn checked(stat_dice: u32, thorns: u32) -> Result<Self, MechError> {
        for (kind, requested) in [(DiceTag::Stat, stat_dice), (DiceTag::Thorn, thorns)] {
            if requested > MAX_DICE {
                return Err(MechError::TooManyDice {
                    kind,
                    requested,
                    max: MAX_DICE,
                });
            }
        }
        Ok(Self::new(stat_dice, thorns))
    }

    /// The tagged dice to roll.
    pub fn to_pool(&self) -> RollPool {
        RollPool::new()
            .add(STAT_DIE, DiceTag::Stat, self.stat_dice)
            .add(THORN_DIE, DiceTag::Thorn, self.thorns)
    }
}

impl std::fmt::Display for RollFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}{}kh, {}{}}}",
            self.stat_dice, STAT_DIE, self.thorns, THORN_DIE
        )
    }
}

impl FromStr for RollFormula {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MechError::InvalidFormula(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(invalid)?;
        let (stat, thorn) = inner.split_once(',').ok_or_else(invalid)?;

        let stat_suffix = format!("{STAT_DIE}kh");
        let stat_dice = stat
            .trim()
            .strip_suffix(stat_suffix.as_str())
            .and_then(|n| n.parse().ok())
            .ok_or_else(invalid)?;

        let thorn_suffix = THORN_DIE.to_string();
        let thorns = thorn
            .trim()
            .strip_suffix(thorn_suffix.as_str())
            .and_then(|n| n.parse().ok())
            .ok_or_else(invalid)?;

        Self::checked(stat_dice, thorns)
    }
}
