//! Stress tracks (bloodied, rattled) and step tracks (spark, story).
//!
//! A [`StressTrack`] is a dice pool plus a "seen" mark. A [`StepTrack`] is an
//! ordered row of boxes; its value is the number of checked boxes and
//! spending always clears the lowest-index checked boxes first.

use serde::{Deserialize, Serialize};

use crate::dice::{DicePool, Die};

/// A dice pool with a player-acknowledged mark.
///
/// Also loads from the legacy flat pool shape (`{ "diceNum": 2, "diceSize":
/// "d6" }`), unmarked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredStressTrack")]
pub struct StressTrack {
    /// Accumulated stress dice.
    #[serde(default)]
    pub pool: DicePool,
    /// Whether the player has marked the track as seen.
    #[serde(default)]
    pub marked: bool,
}

impl StressTrack {
    /// Create an unmarked track from a pool.
    pub fn new(pool: DicePool) -> Self {
        Self {
            pool,
            marked: false,
        }
    }

    /// True when the pool holds at least one die, regardless of the mark.
    pub fn is_active(&self) -> bool {
        !self.pool.is_empty()
    }

    /// Set the mark.
    pub fn mark(&mut self) {
        self.marked = true;
    }

    /// Clear the mark.
    pub fn unmark(&mut self) {
        self.marked = false;
    }

    /// Empty the pool and clear the mark.
    pub fn clear(&mut self) {
        self.pool.dice_num = 0;
        self.marked = false;
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredStressTrack {
    Nested {
        pool: DicePool,
        #[serde(default)]
        marked: bool,
    },
    Legacy {
        #[serde(rename = "diceNum")]
        dice_num: u32,
        #[serde(default, rename = "diceSize")]
        dice_size: Die,
    },
    Bare {
        #[serde(default)]
        marked: bool,
    },
}

impl From<StoredStressTrack> for StressTrack {
    fn from(stored: StoredStressTrack) -> Self {
        match stored {
            StoredStressTrack::Nested { pool, marked } => Self { pool, marked },
            StoredStressTrack::Legacy {
                dice_num,
                dice_size,
            } => Self::new(DicePool::new(dice_num, dice_size)),
            StoredStressTrack::Bare { marked } => Self {
                pool: DicePool::default(),
                marked,
            },
        }
    }
}

/// An ordered sequence of checkable steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTrack {
    /// The boxes, lowest index first.
    #[serde(default)]
    pub steps: Vec<bool>,
}

impl StepTrack {
    /// Create a track of `len` unchecked steps.
    pub fn with_len(len: usize) -> Self {
        Self {
            steps: vec![false; len],
        }
    }

    /// Create a track from explicit step states.
    pub fn from_steps(steps: impl Into<Vec<bool>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    /// Number of checked steps. Computed on every call.
    pub fn value(&self) -> u32 {
        self.steps.iter().filter(|s| **s).count() as u32
    }

    /// Total number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the track has no steps at all.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns true if every step is checked.
    pub fn is_full(&self) -> bool {
        self.steps.iter().all(|s| *s)
    }

    /// Uncheck up to `n` checked steps in index order.
    ///
    /// Returns how many steps were actually cleared, which is
    /// `min(n, self.value())`.
    pub fn consume(&mut self, n: u32) -> u32 {
        let mut remaining = n;
        for step in self.steps.iter_mut() {
            if remaining == 0 {
                break;
            }
            if *step {
                *step = false;
                remaining -= 1;
            }
        }
        n - remaining
    }

    /// Check up to `n` unchecked steps in index order. Returns how many were
    /// checked.
    pub fn fill(&mut self, n: u32) -> u32 {
        let mut remaining = n;
        for step in self.steps.iter_mut() {
            if remaining == 0 {
                break;
            }
            if !*step {
                *step = true;
                remaining -= 1;
            }
        }
        n - remaining
    }

    /// Set a single step. Returns false if `index` is out of range.
    pub fn set(&mut self, index: usize, checked: bool) -> bool {
        match self.steps.get_mut(index) {
            Some(step) => {
                *step = checked;
                true
            }
            None => false,
        }
    }

    /// Append `n` unchecked steps.
    pub fn grow(&mut self, n: usize) {
        self.steps.extend(std::iter::repeat_n(false, n));
    }
}

impl std::fmt::Display for StepTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value(), self.len())
    }
}
