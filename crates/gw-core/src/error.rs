use crate::id::EntryId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when reading or editing a character.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The stat key is not part of the character's stat block.
    #[error("unknown stat: {0}")]
    UnknownStat(String),

    /// A stat value lies outside the configured range.
    #[error("stat '{key}' value {value} is out of range {min}..={max}")]
    StatOutOfRange {
        /// The stat key.
        key: String,
        /// The rejected value.
        value: u32,
        /// Lowest allowed value.
        min: u32,
        /// Highest allowed value.
        max: u32,
    },

    /// A positional removal pointed past the end of a list.
    #[error("{kind} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// Which list was addressed (e.g. "condition", "bond").
        kind: &'static str,
        /// The requested index.
        index: usize,
        /// The list length at the time of the request.
        len: usize,
    },

    /// No entry with the given identifier exists.
    #[error("{kind} not found: {id}")]
    EntryNotFound {
        /// Which list was addressed.
        kind: &'static str,
        /// The missing identifier.
        id: EntryId,
    },

    /// A die size string could not be parsed.
    #[error("invalid die size: {0}")]
    InvalidDieSize(String),

    /// The operation needs a character but the actor is another kind.
    #[error("actor is not a character")]
    NotACharacter,

    /// Persisted data could not be migrated to the current shape.
    #[error("migration failed: {0}")]
    Migration(String),

    /// Persisted data could not be (de)serialized.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
