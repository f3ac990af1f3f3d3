//! Upgrades persisted character data to the current shape.
//!
//! Older saves stored the bloodied and rattled tracks as a flat pool
//! (`{ "diceNum": 2, "diceSize": "d6" }`). The current shape nests the pool
//! and adds a mark: `{ "pool": { ... }, "marked": false }`. Migration works on
//! raw JSON before typed deserialization and is idempotent.

use serde_json::{Map, Value};

use crate::actor::Actor;
use crate::character::CharacterData;
use crate::error::{CoreError, CoreResult};

/// What happened to one stress track during migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMigration {
    /// The legacy flat pool was wrapped into the nested shape.
    Migrated,
    /// Nothing to do: already nested, absent, or not a legacy pool.
    Skipped,
}

/// Per-track result of a migration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    /// Outcome for the bloodied track.
    pub bloodied: TrackMigration,
    /// Outcome for the rattled track.
    pub rattled: TrackMigration,
}

impl MigrationReport {
    /// Returns true if any track was rewritten.
    pub fn changed(&self) -> bool {
        self.bloodied == TrackMigration::Migrated || self.rattled == TrackMigration::Migrated
    }
}

/// Rewrites legacy character data in place.
pub struct SchemaMigrator;

impl SchemaMigrator {
    /// Migrate raw character system data.
    ///
    /// Fails only when `source` is not a JSON object.
    pub fn migrate(source: &mut Value) -> CoreResult<MigrationReport> {
        let object = source
            .as_object_mut()
            .ok_or_else(|| CoreError::Migration("character data is not an object".to_string()))?;

        let report = MigrationReport {
            bloodied: migrate_stress_track(object, "bloodied"),
            rattled: migrate_stress_track(object, "rattled"),
        };

        if report.changed() {
            tracing::debug!(
                bloodied = ?report.bloodied,
                rattled = ?report.rattled,
                "migrated legacy stress tracks"
            );
        }
        Ok(report)
    }

    /// Migrate raw character system data and deserialize it.
    pub fn load_character(mut source: Value) -> CoreResult<CharacterData> {
        Self::migrate(&mut source)?;
        Ok(serde_json::from_value(source)?)
    }

    /// Migrate a raw actor document and deserialize it.
    ///
    /// Only character profiles are migrated; other actor kinds load as-is.
    pub fn load_actor(mut source: Value) -> CoreResult<Actor> {
        let system = source
            .get_mut("profile")
            .filter(|profile| profile.get("type").and_then(Value::as_str) == Some("character"))
            .and_then(|profile| profile.get_mut("system"));
        if let Some(system) = system {
            Self::migrate(system)?;
        }
        Ok(serde_json::from_value(source)?)
    }
}

fn migrate_stress_track(object: &mut Map<String, Value>, key: &str) -> TrackMigration {
    let Some(Value::Object(track)) = object.get(key) else {
        return TrackMigration::Skipped;
    };

    let has_pool = track.get("pool").is_some_and(|p| !p.is_null());
    if has_pool || !track.contains_key("diceNum") {
        return TrackMigration::Skipped;
    }

    let legacy = Value::Object(track.clone());
    let mut nested = Map::new();
    nested.insert("pool".to_string(), legacy);
    nested.insert("marked".to_string(), Value::Bool(false));
    object.insert(key.to_string(), Value::Object(nested));
    TrackMigration::Migrated
}
