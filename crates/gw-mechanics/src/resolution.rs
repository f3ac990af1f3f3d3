//! Reading a stat roll.
//!
//! The highest stat die sets the base result:
//! - two or more dice at `perfect_min`: critical
//! - highest at or above `perfect_min`: perfect
//! - highest at or above `messy_min`: messy
//! - anything lower, or no stat dice: grim
//!
//! Every thorn die at or above `cut_min` then cuts the result one step.

use serde::{Deserialize, Serialize};

use crate::dice::{DiceTag, RollResult};

/// The result tier of a stat roll, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Two or more perfect dice.
    Critical,
    /// Full success.
    Perfect,
    /// Success with a cost.
    Messy,
    /// Failure.
    Grim,
}

impl Outcome {
    /// One step worse, stopping at grim.
    pub fn cut(self) -> Self {
        match self {
            Self::Critical => Self::Perfect,
            Self::Perfect => Self::Messy,
            Self::Messy | Self::Grim => Self::Grim,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "Critical"),
            Self::Perfect => write!(f, "Perfect"),
            Self::Messy => write!(f, "Messy"),
            Self::Grim => write!(f, "Grim"),
        }
    }
}

/// A resolved reading of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Result before thorns.
    pub base: Outcome,
    /// How many thorns cut the result.
    pub cuts: u32,
    /// Final result after cuts.
    pub outcome: Outcome,
}

/// Thresholds for reading a stat roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighestDie {
    /// Minimum stat die for a perfect result (default: 6).
    pub perfect_min: u32,
    /// Minimum stat die for a messy result (default: 4).
    pub messy_min: u32,
    /// Minimum thorn die that cuts the result (default: 7).
    pub cut_min: u32,
}

impl Default for HighestDie {
    fn default() -> Self {
        Self {
            perfect_min: 6,
            messy_min: 4,
            cut_min: 7,
        }
    }
}

impl HighestDie {
    /// Read a roll.
    pub fn resolve(&self, roll: &RollResult) -> Resolution {
        let highest = roll.highest_by_tag(DiceTag::Stat);
        let perfect_dice = roll.count_at_or_above(DiceTag::Stat, self.perfect_min);

        let base = if perfect_dice >= 2 {
            Outcome::Critical
        } else if highest >= self.perfect_min {
            Outcome::Perfect
        } else if highest >= self.messy_min {
            Outcome::Messy
        } else {
            Outcome::Grim
        };

        let cuts = roll.count_at_or_above(DiceTag::Thorn, self.cut_min);
        let outcome = (0..cuts).fold(base, |o, _| o.cut());

        Resolution {
            base,
            cuts,
            outcome,
        }
    }
}
