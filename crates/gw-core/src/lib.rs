//! Character data model for Grimwild sheets.
//!
//! Dice pools, stress and step tracks, conditions, the xp level curve, and
//! the actor aggregate, together with schema migration for older saves.
//! Nothing here rolls dice; see `gw-mechanics` for that.

/// The actor aggregate and its kind-specific profile.
pub mod actor;
/// Player character system data and derived values.
pub mod character;
/// Named conditions with severities.
pub mod condition;
/// Recognised stats and starting values.
pub mod config;
/// Die sizes and dice pools.
pub mod dice;
/// Ordered lists with stable entry identifiers.
pub mod entries;
/// Error types used throughout the crate.
pub mod error;
/// Actor and entry identifiers.
pub mod id;
/// Upgrades for older persisted data.
pub mod migrate;
/// Backgrounds, traits, desires, and bonds.
pub mod narrative;
/// Experience and levels.
pub mod progression;
/// Stress tracks and step tracks.
pub mod track;
/// Typed partial updates for persistence.
pub mod update;

pub use actor::{Actor, NpcData, TypeProfile};
pub use character::{CharacterData, RollData, Stat, StatLabel, StatView};
pub use condition::{Condition, ConditionSet, Severity};
pub use config::{StatDefinition, SystemConfig};
pub use dice::{DicePool, Die};
pub use entries::{Entry, EntryList};
pub use error::{CoreError, CoreResult};
pub use id::{ActorId, EntryId};
pub use migrate::{MigrationReport, SchemaMigrator, TrackMigration};
pub use narrative::{Background, Bond, BondList, Drive};
pub use progression::{Xp, XpPipLayout, level, threshold_for};
pub use track::{StepTrack, StressTrack};
pub use update::FieldUpdate;
