//! Typed partial updates to a character, for delivery to persistence.
//!
//! Each update names one top-level field of the character system data and
//! renders to the host's dotted path form (`system.spark`).

use serde_json::{Map, Value};

use crate::character::{CharacterData, Stat};
use crate::condition::ConditionSet;
use crate::error::{CoreError, CoreResult};
use crate::narrative::BondList;
use crate::progression::Xp;
use crate::track::{StepTrack, StressTrack};

/// A replacement value for one character field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replace the spark track.
    Spark(StepTrack),
    /// Replace the story track.
    Story(StepTrack),
    /// Replace the xp total.
    Xp(Xp),
    /// Replace one stat.
    Stat {
        /// Stat key.
        key: String,
        /// New value and mark.
        stat: Stat,
    },
    /// Replace the bloodied track.
    Bloodied(StressTrack),
    /// Replace the rattled track.
    Rattled(StressTrack),
    /// Replace the condition list.
    Conditions(ConditionSet),
    /// Replace the bond list.
    Bonds(BondList),
}

impl FieldUpdate {
    /// Dotted document path of the updated field.
    pub fn path(&self) -> String {
        match self {
            Self::Spark(_) => "system.spark".to_string(),
            Self::Story(_) => "system.story".to_string(),
            Self::Xp(_) => "system.xp".to_string(),
            Self::Stat { key, .. } => format!("system.stats.{key}"),
            Self::Bloodied(_) => "system.bloodied".to_string(),
            Self::Rattled(_) => "system.rattled".to_string(),
            Self::Conditions(_) => "system.conditions".to_string(),
            Self::Bonds(_) => "system.bonds".to_string(),
        }
    }

    /// The new field value as JSON.
    pub fn value(&self) -> CoreResult<Value> {
        let value = match self {
            Self::Spark(track) | Self::Story(track) => serde_json::to_value(track)?,
            Self::Xp(xp) => serde_json::to_value(xp)?,
            Self::Stat { stat, .. } => serde_json::to_value(stat)?,
            Self::Bloodied(track) | Self::Rattled(track) => serde_json::to_value(track)?,
            Self::Conditions(list) => serde_json::to_value(list)?,
            Self::Bonds(list) => serde_json::to_value(list)?,
        };
        Ok(value)
    }

    /// Render as a one-entry `{ path: value }` map.
    pub fn to_partial(&self) -> CoreResult<Map<String, Value>> {
        let mut map = Map::new();
        map.insert(self.path(), self.value()?);
        Ok(map)
    }

    /// Apply the update to in-memory character data.
    pub fn apply(&self, character: &mut CharacterData) -> CoreResult<()> {
        match self {
            Self::Spark(track) => character.spark = track.clone(),
            Self::Story(track) => character.story = track.clone(),
            Self::Xp(xp) => character.xp = *xp,
            Self::Stat { key, stat } => {
                let slot = character
                    .stats
                    .get_mut(key)
                    .ok_or_else(|| CoreError::UnknownStat(key.clone()))?;
                *slot = *stat;
            }
            Self::Bloodied(track) => character.bloodied = *track,
            Self::Rattled(track) => character.rattled = *track,
            Self::Conditions(list) => character.conditions = list.clone(),
            Self::Bonds(list) => character.bonds = list.clone(),
        }
        Ok(())
    }
}
