//! Tagged dice pool construction and rolling.

use gw_core::Die;
use rand::Rng;

use super::DiceTag;
use super::roll::{DieResult, RollResult};

/// A collection of tagged dice to be rolled together.
#[derive(Debug, Clone, Default)]
pub struct RollPool {
    /// The dice in this pool with their tags.
    pub dice: Vec<(Die, DiceTag)>,
}

impl RollPool {
    /// Create an empty roll pool.
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    /// Add `count` dice of the given size with a tag.
    pub fn add(mut self, die: Die, tag: DiceTag, count: u32) -> Self {
        for _ in 0..count {
            self.dice.push((die, tag));
        }
        self
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns how many dice carry the given tag.
    pub fn count_tagged(&self, tag: DiceTag) -> usize {
        self.dice.iter().filter(|(_, t)| *t == tag).count()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Roll all dice in the pool using the given RNG.
    pub fn roll<R: Rng>(&self, rng: &mut R) -> RollResult {
        let dice = self
            .dice
            .iter()
            .map(|(die, tag)| DieResult {
                die: *die,
                tag: *tag,
                value: rng.random_range(1..=die.sides()),
            })
            .collect();
        RollResult { dice }
    }
}
