//! Ordered sheet lists whose entries carry stable identifiers.
//!
//! Entries can be removed by position (the sheet's row index) or by
//! [`EntryId`]. Removal always keeps the remaining entries in order.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::EntryId;

/// An element of an [`EntryList`].
pub trait Entry {
    /// Human-readable list kind, used in error messages.
    const KIND: &'static str;

    /// The entry's stable identifier.
    fn id(&self) -> EntryId;
}

/// An ordered list of identified entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T> {
    entries: Vec<T>,
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Entry> EntryList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end. Returns its identifier.
    pub fn push(&mut self, entry: T) -> EntryId {
        let id = entry.id();
        self.entries.push(entry);
        id
    }

    /// Remove the entry at `index`, shifting later entries down.
    pub fn remove_at(&mut self, index: usize) -> CoreResult<T> {
        if index >= self.entries.len() {
            return Err(CoreError::IndexOutOfBounds {
                kind: T::KIND,
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Remove the entry with the given identifier.
    pub fn remove(&mut self, id: EntryId) -> CoreResult<T> {
        let index = self
            .position(id)
            .ok_or(CoreError::EntryNotFound { kind: T::KIND, id })?;
        Ok(self.entries.remove(index))
    }

    /// Position of the entry with the given identifier.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    /// Look up an entry by identifier.
    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Look up an entry by identifier for editing.
    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.entries.iter_mut().find(|e| e.id() == id)
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// All entries in order.
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T: Entry> IntoIterator for &'a EntryList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Entry> FromIterator<T> for EntryList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
