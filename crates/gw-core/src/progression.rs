//! Experience and the triangular level curve.
//!
//! Level thresholds are the cumulative sums 2, 2+3, 2+3+4, ... so a
//! character reaches level 2 at 2 xp, level 3 at 5, level 4 at 9, level 5
//! at 14 and so on. Level is always derived from the stored xp total and
//! never persisted.

use serde::{Deserialize, Serialize};

/// Map accumulated experience to a character level (1-based).
pub fn level(xp: u32) -> u32 {
    if xp < 2 {
        return 1;
    }

    let xp = u64::from(xp);
    let mut step: u64 = 2;
    let mut threshold: u64 = 2;
    while xp >= threshold {
        step += 1;
        threshold += step;
    }

    // step is bounded by roughly sqrt(2 * u32::MAX)
    (step - 1) as u32
}

/// Minimum experience needed to reach `level`. Level 0 and 1 need none.
pub fn threshold_for(level: u32) -> u64 {
    if level < 2 {
        return 0;
    }
    let l = u64::from(level);
    l * (l + 1) / 2 - 1
}

/// How the sheet groups xp pips into rows. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpPipLayout {
    /// Number of rows.
    pub rows: usize,
    /// Number of pips in the first row; each later row has one more.
    pub first_row: usize,
}

impl Default for XpPipLayout {
    fn default() -> Self {
        Self {
            rows: 6,
            first_row: 2,
        }
    }
}

impl XpPipLayout {
    /// Pip numbers grouped by row, numbered from 1 across all rows.
    pub fn pips(&self) -> Vec<Vec<u32>> {
        let mut tally = 1;
        (0..self.rows)
            .map(|row| {
                (0..row + self.first_row)
                    .map(|_| {
                        let pip = tally;
                        tally += 1;
                        pip
                    })
                    .collect()
            })
            .collect()
    }

    /// Total number of pips across all rows.
    pub fn total(&self) -> u32 {
        self.pips().iter().map(|row| row.len() as u32).sum()
    }
}

/// Stored experience total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xp {
    /// Accumulated experience points.
    #[serde(default)]
    pub value: u32,
}

impl Xp {
    /// Wrap an experience total.
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// The level this total corresponds to.
    pub fn level(&self) -> u32 {
        level(self.value)
    }

    /// Apply a click on xp pip `pip`.
    ///
    /// Clicking any pip other than the current total jumps to it; clicking
    /// the current total steps back by one, so the last pip toggles.
    pub fn toggle_pip(&mut self, pip: u32) -> u32 {
        self.value = if pip != self.value {
            pip
        } else {
            self.value.saturating_sub(1)
        };
        self.value
    }

    /// Add experience. Returns the new level.
    pub fn gain(&mut self, amount: u32) -> u32 {
        self.value = self.value.saturating_add(amount);
        self.level()
    }
}
