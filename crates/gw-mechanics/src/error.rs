//! Error types for roll resolution.

use gw_core::CoreError;

use crate::resolver::ResolvedRoll;

/// Alias for `Result<T, MechError>`.
pub type MechResult<T> = Result<T, MechError>;

/// Errors that can occur while resolving a roll.
///
/// A cancelled decision is not an error; see
/// [`RollOutcome::Cancelled`](crate::resolver::RollOutcome::Cancelled).
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The requested stat is not on the character. Nothing was changed.
    #[error("invalid stat: {0}")]
    InvalidStat(String),

    /// A dice formula could not be parsed.
    #[error("invalid formula: {0}")]
    InvalidFormula(String),

    /// A roll asked for more dice of one kind than a pool may hold.
    /// Nothing was changed.
    #[error("too many {kind} dice: {requested} (at most {max})")]
    TooManyDice {
        /// Which dice were requested.
        kind: crate::dice::DiceTag,
        /// How many were requested.
        requested: u32,
        /// The allowed maximum.
        max: u32,
    },

    /// The decision interface did not answer within the configured timeout.
    /// Nothing was changed.
    #[error("roll decision timed out")]
    DecisionTimedOut,

    /// Persisting the spark spend failed. The actor keeps its spark.
    #[error("failed to persist character update: {0}")]
    Persistence(#[source] anyhow::Error),

    /// The dice roller failed after spark was already spent.
    #[error("dice roller failed: {0}")]
    Roller(#[source] anyhow::Error),

    /// The roll resolved and spark was spent, but posting the message failed.
    /// The resolved roll is returned so the caller can retry posting.
    #[error("failed to post roll message: {source}")]
    MessagePost {
        /// The resolved roll that was not posted.
        roll: Box<ResolvedRoll>,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// A character model error.
    #[error(transparent)]
    Core(#[from] CoreError),
}
