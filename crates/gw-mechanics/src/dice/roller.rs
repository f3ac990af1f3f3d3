//! The dice-roller collaborator and a seeded default implementation.

use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::roll::RollResult;
use crate::formula::RollFormula;
use crate::resolver::RollContext;

/// Evaluates a roll formula.
///
/// Hosts with their own dice engine implement this; the context carries the
/// character values a formula may reference.
pub trait DiceRoller: Send + Sync {
    /// Roll the formula.
    fn roll(&self, formula: &RollFormula, context: &RollContext) -> anyhow::Result<RollResult>;
}

/// A [`DiceRoller`] backed by a seeded standard RNG.
#[derive(Debug)]
pub struct StdRngRoller {
    rng: Mutex<StdRng>,
}

impl StdRngRoller {
    /// Create a roller with a fixed seed for reproducible rolls.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Create a roller seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl DiceRoller for StdRngRoller {
    fn roll(&self, formula: &RollFormula, _context: &RollContext) -> anyhow::Result<RollResult> {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Ok(formula.to_pool().roll(&mut *rng))
    }
}
