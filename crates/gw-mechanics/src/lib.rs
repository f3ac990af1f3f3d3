//! Stat rolls for Grimwild characters.
//!
//! Builds the `{Nd6kh, Md8}` stat-roll formula, rolls it, reads the result
//! into an outcome tier, and drives the full roll sequence: ask the player
//! for their choices, spend spark, roll, and post the result. Persistence,
//! chat, and the decision prompt are supplied by the host through ports.

pub mod decision;
pub mod dice;
pub mod error;
pub mod formula;
pub mod ports;
pub mod resolution;
pub mod resolver;

pub use decision::{Assister, Decision, DecisionResponse, RollDecisionInterface, RollSnapshot};
pub use dice::{DiceRoller, DiceTag, DieResult, RollPool, RollResult, StdRngRoller};
pub use error::{MechError, MechResult};
pub use formula::{MAX_DICE, RollFormula, STAT_DIE, THORN_DIE};
pub use ports::{MessagePort, PersistencePort, RollMessage, RollMode, Speaker};
pub use resolution::{HighestDie, Outcome, Resolution};
pub use resolver::{
    PreparedRoll, ResolvedRoll, ResolverConfig, RollContext, RollOutcome, RollPhase, RollResolver,
};
