//! Collaborator ports used by the resolver.
//!
//! Persistence and chat messaging belong to the hosting application. The
//! resolver awaits each call but does not make the two writes atomic.

use anyhow::Result;
use async_trait::async_trait;
use gw_core::{ActorId, FieldUpdate};
use serde::{Deserialize, Serialize};

use crate::resolver::ResolvedRoll;

/// Who can see a posted roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollMode {
    /// Everyone.
    #[default]
    PublicRoll,
    /// The roller and the GM.
    GmRoll,
    /// Only the GM; hidden from the roller.
    BlindRoll,
    /// Only the roller.
    SelfRoll,
}

/// The chat identity a roll is posted as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// The speaking actor.
    pub actor: ActorId,
    /// Name shown on the message.
    pub alias: String,
}

/// A resolved roll ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollMessage {
    /// Who the roll is posted as.
    pub speaker: Speaker,
    /// Visibility.
    pub roll_mode: RollMode,
    /// The roll itself.
    pub roll: ResolvedRoll,
}

/// Writes partial character updates.
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// Persist one field of an actor's system data.
    async fn update(&self, actor: ActorId, update: &FieldUpdate) -> Result<()>;
}

/// Posts resolved rolls to chat.
#[async_trait]
pub trait MessagePort: Send + Sync {
    /// Post a roll message.
    async fn post_roll_message(&self, message: &RollMessage) -> Result<()>;
}
