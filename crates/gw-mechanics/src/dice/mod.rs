//! Rollable dice: tagged pools, roll results, and the default roller.
//!
//! A stat roll mixes two kinds of dice. Stat dice are six-sided and only
//! the highest counts; thorn dice are eight-sided risk dice that are all
//! kept. Each rolled die remembers its tag so resolution can tell them
//! apart.

pub mod pool;
pub mod roll;
pub mod roller;

pub use pool::RollPool;
pub use roll::{DieResult, RollResult};
pub use roller::{DiceRoller, StdRngRoller};

use serde::{Deserialize, Serialize};

/// What a die in a stat roll stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiceTag {
    /// A stat die: highest result decides the outcome.
    Stat,
    /// A thorn die: a high result cuts the outcome.
    Thorn,
}

impl std::fmt::Display for DiceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stat => write!(f, "stat"),
            Self::Thorn => write!(f, "thorn"),
        }
    }
}
