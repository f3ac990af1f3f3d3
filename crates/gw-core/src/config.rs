//! System configuration: recognised stats and starting values.
//!
//! Passed explicitly to character creation, validation, and the roll
//! resolver instead of being looked up from a global registry.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::progression::XpPipLayout;

/// Display metadata for one stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDefinition {
    /// Persisted key (e.g. "bra").
    pub key: String,
    /// Full display name (e.g. "Brawn").
    pub label: String,
    /// Short display name (e.g. "BRA").
    pub abbr: String,
}

impl StatDefinition {
    /// Create a stat definition.
    pub fn new(key: impl Into<String>, label: impl Into<String>, abbr: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            abbr: abbr.into(),
        }
    }
}

/// Game-system configuration for characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Recognised stats, in display order.
    pub stats: Vec<StatDefinition>,
    /// Value every stat starts at.
    pub initial_stat: u32,
    /// Highest allowed stat value; the lowest is 0.
    pub max_stat: u32,
    /// Number of spark steps on a new character.
    pub spark_steps: usize,
    /// Number of story steps on a new character.
    pub story_steps: usize,
    /// Number of blank backgrounds on a new character.
    pub backgrounds: usize,
    /// Number of wise slots per background.
    pub wises_per_background: usize,
    /// How xp pips are grouped on the sheet.
    pub xp_pips: XpPipLayout,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            stats: vec![
                StatDefinition::new("bra", "Brawn", "BRA"),
                StatDefinition::new("agi", "Agility", "AGI"),
                StatDefinition::new("wis", "Wits", "WIS"),
                StatDefinition::new("pre", "Presence", "PRE"),
            ],
            initial_stat: 1,
            max_stat: 3,
            spark_steps: 2,
            story_steps: 2,
            backgrounds: 2,
            wises_per_background: 3,
            xp_pips: XpPipLayout::default(),
        }
    }
}

impl SystemConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace the stat list.
    pub fn with_stats(mut self, stats: Vec<StatDefinition>) -> Self {
        self.stats = stats;
        self
    }

    /// Set the starting stat value (clamped to the maximum).
    pub fn with_initial_stat(mut self, value: u32) -> Self {
        self.initial_stat = value.min(self.max_stat);
        self
    }

    /// Set the spark and story track lengths.
    pub fn with_step_tracks(mut self, spark: usize, story: usize) -> Self {
        self.spark_steps = spark;
        self.story_steps = story;
        self
    }

    /// Look up a stat definition by key.
    pub fn stat(&self, key: &str) -> Option<&StatDefinition> {
        self.stats.iter().find(|s| s.key == key)
    }

    /// Returns true if the key names a recognised stat.
    pub fn is_known(&self, key: &str) -> bool {
        self.stat(key).is_some()
    }

    /// Sort position of a stat; unknown keys sort after every known one.
    pub fn order_of(&self, key: &str) -> usize {
        self.stats
            .iter()
            .position(|s| s.key == key)
            .unwrap_or(usize::MAX)
    }
}
