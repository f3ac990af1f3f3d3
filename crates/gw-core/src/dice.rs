//! Die sizes and sized dice pools.
//!
//! A [`DicePool`] is the persisted shape behind every stress track and
//! condition: a count of dice and the size of each die. A pool with no dice
//! is empty and contributes nothing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A polyhedral die size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    #[default]
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
        }
    }

    /// Parse a die from a string like "d6" or "D8".
    pub fn from_str_tag(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "d4" => Ok(Self::D4),
            "d6" => Ok(Self::D6),
            "d8" => Ok(Self::D8),
            "d10" => Ok(Self::D10),
            "d12" => Ok(Self::D12),
            "d20" => Ok(Self::D20),
            _ => Err(CoreError::InvalidDieSize(s.to_string())),
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A count of same-sized dice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePool {
    /// Number of dice in the pool.
    #[serde(default)]
    pub dice_num: u32,
    /// Size of each die.
    #[serde(default)]
    pub dice_size: Die,
}

impl DicePool {
    /// Create a pool of `dice_num` dice of the given size.
    pub fn new(dice_num: u32, dice_size: Die) -> Self {
        Self {
            dice_num,
            dice_size,
        }
    }

    /// Create a pool of `dice_num` six-sided dice.
    pub fn d6(dice_num: u32) -> Self {
        Self::new(dice_num, Die::D6)
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice_num == 0
    }

    /// Add dice to the pool. Returns the new count.
    pub fn add(&mut self, n: u32) -> u32 {
        self.dice_num = self.dice_num.saturating_add(n);
        self.dice_num
    }

    /// Remove dice from the pool, stopping at zero. Returns the new count.
    pub fn reduce(&mut self, n: u32) -> u32 {
        self.dice_num = self.dice_num.saturating_sub(n);
        self.dice_num
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.dice_num, self.dice_size)
    }
}
