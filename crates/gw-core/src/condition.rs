//! Named conditions, each with its own dice pool and a severity.

use serde::{Deserialize, Serialize};

use crate::dice::DicePool;
use crate::entries::{Entry, EntryList};
use crate::id::EntryId;

/// How long a condition is expected to last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    /// Must be dealt with right away.
    #[default]
    Urgent,
    /// Clears after a short rest or scene.
    ShortTerm,
    /// Lingers across sessions.
    LongTerm,
    /// Never clears on its own.
    Permanent,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Urgent => write!(f, "Urgent"),
            Self::ShortTerm => write!(f, "Short Term"),
            Self::LongTerm => write!(f, "Long Term"),
            Self::Permanent => write!(f, "Permanent"),
        }
    }
}

/// A named ongoing condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Stable identifier.
    #[serde(default)]
    pub id: EntryId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Dice representing how severe the condition currently is.
    #[serde(default)]
    pub pool: DicePool,
    /// Expected duration class.
    #[serde(default)]
    pub severity: Severity,
}

impl Condition {
    /// Create a condition with an empty pool.
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            pool: DicePool::default(),
            severity,
        }
    }
}

impl Entry for Condition {
    const KIND: &'static str = "condition";

    fn id(&self) -> EntryId {
        self.id
    }
}

/// The character's conditions, in the order they were added.
pub type ConditionSet = EntryList<Condition>;

impl EntryList<Condition> {
    /// Append a new condition with an empty pool. Returns its identifier.
    pub fn append(&mut self, name: impl Into<String>, severity: Severity) -> EntryId {
        self.push(Condition::new(name, severity))
    }

    /// Conditions of a given severity, in order.
    pub fn by_severity(&self, severity: Severity) -> Vec<&Condition> {
        self.iter().filter(|c| c.severity == severity).collect()
    }
}
