//! The actor aggregate and its kind-specific profile.
//!
//! Fields shared by every actor live on [`Actor`]; what differs between a
//! player character and other kinds lives in the [`TypeProfile`].

use serde::{Deserialize, Serialize};

use crate::character::CharacterData;
use crate::config::SystemConfig;
use crate::error::{CoreError, CoreResult};
use crate::id::ActorId;

/// Kind-specific actor data, tagged by the host document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "system", rename_all = "lowercase")]
pub enum TypeProfile {
    /// A player character with the full sheet.
    Character(Box<CharacterData>),
    /// A non-player character.
    Npc(NpcData),
}

/// Data kept for non-player characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcData {
    /// Free-text notes for the GM.
    pub notes: String,
}

/// An actor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Free-text biography.
    #[serde(default)]
    pub biography: String,
    /// Kind-specific data.
    pub profile: TypeProfile,
}

impl Actor {
    /// Create a player character with starting values from `config`.
    pub fn new_character(name: impl Into<String>, config: &SystemConfig) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            biography: String::new(),
            profile: TypeProfile::Character(Box::new(CharacterData::new(config))),
        }
    }

    /// Create a non-player character.
    pub fn new_npc(name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            biography: String::new(),
            profile: TypeProfile::Npc(NpcData::default()),
        }
    }

    /// Returns true if this actor is a player character.
    pub fn is_character(&self) -> bool {
        matches!(self.profile, TypeProfile::Character(_))
    }

    /// The character sheet, if this actor is a player character.
    pub fn character(&self) -> CoreResult<&CharacterData> {
        match &self.profile {
            TypeProfile::Character(data) => Ok(&**data),
            TypeProfile::Npc(_) => Err(CoreError::NotACharacter),
        }
    }

    /// The character sheet for editing, if this actor is a player character.
    pub fn character_mut(&mut self) -> CoreResult<&mut CharacterData> {
        match &mut self.profile {
            TypeProfile::Character(data) => Ok(&mut **data),
            TypeProfile::Npc(_) => Err(CoreError::NotACharacter),
        }
    }
}
