//! Narrative sheet entries: backgrounds, traits, desires, and bonds.
//!
//! These carry no dice but are part of the persisted character and are
//! seeded with blank rows when a character is created.

use serde::{Deserialize, Serialize};

use crate::entries::{Entry, EntryList};
use crate::id::EntryId;

/// A background with its associated areas of knowledge ("wises").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// Background name.
    #[serde(default)]
    pub name: String,
    /// Things this background makes the character wise about.
    #[serde(default)]
    pub wises: Vec<String>,
}

impl Background {
    /// A blank background with `wises` empty slots.
    pub fn blank(wises: usize) -> Self {
        Self {
            name: String::new(),
            wises: vec![String::new(); wises],
        }
    }
}

/// A trait or desire, phrased as "are" or "are not".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drive {
    /// True for "you are ...", false for "you are not ...".
    #[serde(default)]
    pub are: bool,
    /// The trait or desire text.
    #[serde(default)]
    pub value: String,
}

impl Drive {
    /// A blank entry with the given polarity.
    pub fn blank(are: bool) -> Self {
        Self {
            are,
            value: String::new(),
        }
    }

    /// The three starting rows: two "are", one "are not".
    pub fn starting_set() -> Vec<Self> {
        vec![Self::blank(true), Self::blank(true), Self::blank(false)]
    }
}

/// A bond with another character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// Stable identifier.
    #[serde(default)]
    pub id: EntryId,
    /// Who the bond is with.
    #[serde(default)]
    pub name: String,
    /// What the bond means.
    #[serde(default)]
    pub description: String,
}

impl Entry for Bond {
    const KIND: &'static str = "bond";

    fn id(&self) -> EntryId {
        self.id
    }
}

/// The character's bonds, in the order they were added.
pub type BondList = EntryList<Bond>;

impl EntryList<Bond> {
    /// Append a blank bond. Returns its identifier.
    pub fn create(&mut self) -> EntryId {
        self.push(Bond::default())
    }
}
