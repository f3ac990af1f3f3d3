//! The character system data: stats, stress, conditions, and resources.
//!
//! Everything derived (level, spark value, bloodied/rattled flags, stat
//! labels) is computed on demand from the stored fields and never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::condition::ConditionSet;
use crate::config::SystemConfig;
use crate::error::{CoreError, CoreResult};
use crate::id::ActorId;
use crate::narrative::{Background, BondList, Drive};
use crate::progression::Xp;
use crate::track::{StepTrack, StressTrack};

/// A single stat score with its mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Score, 0 to the configured maximum.
    #[serde(default)]
    pub value: u32,
    /// Whether the stat is marked.
    #[serde(default)]
    pub marked: bool,
}

/// A stat together with its display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatView<'a> {
    /// Persisted key.
    pub key: &'a str,
    /// Display name, or the key when the stat is not configured.
    pub label: &'a str,
    /// Short display name, or the key when the stat is not configured.
    pub abbr: &'a str,
    /// The stat itself.
    pub stat: Stat,
}

/// Display names for one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatLabel<'a> {
    /// Display name, or the key when the stat is not configured.
    pub label: &'a str,
    /// Short display name, or the key when the stat is not configured.
    pub abbr: &'a str,
}

impl<'a> StatLabel<'a> {
    fn resolve(key: &'a str, config: &'a SystemConfig) -> Self {
        match config.stat(key) {
            Some(def) => Self {
                label: &def.label,
                abbr: &def.abbr,
            },
            None => Self {
                label: key,
                abbr: key,
            },
        }
    }
}

/// The persisted state of a player character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterData {
    /// The character's path (class).
    pub path: String,
    /// Accumulated experience.
    pub xp: Xp,
    /// Stat scores by key.
    pub stats: BTreeMap<String, Stat>,
    /// Physical stress.
    pub bloodied: StressTrack,
    /// Mental stress.
    pub rattled: StressTrack,
    /// Ongoing conditions in the order they were added.
    pub conditions: ConditionSet,
    /// Spendable spark.
    pub spark: StepTrack,
    /// Story progress.
    pub story: StepTrack,
    /// Free-text features.
    pub features: String,
    /// Backgrounds and their wises.
    pub backgrounds: Vec<Background>,
    /// Traits.
    pub traits: Vec<Drive>,
    /// Desires.
    pub desires: Vec<Drive>,
    /// Bonds with other characters.
    pub bonds: BondList,
}

impl CharacterData {
    /// Create a character with the documented starting values.
    pub fn new(config: &SystemConfig) -> Self {
        let stats = config
            .stats
            .iter()
            .map(|def| {
                let stat = Stat {
                    value: config.initial_stat,
                    marked: false,
                };
                (def.key.clone(), stat)
            })
            .collect();

        Self {
            stats,
            spark: StepTrack::with_len(config.spark_steps),
            story: StepTrack::with_len(config.story_steps),
            backgrounds: (0..config.backgrounds)
                .map(|_| Background::blank(config.wises_per_background))
                .collect(),
            traits: Drive::starting_set(),
            desires: Drive::starting_set(),
            ..Self::default()
        }
    }

    /// The level derived from xp.
    pub fn level(&self) -> u32 {
        self.xp.level()
    }

    /// True when the bloodied pool holds any dice.
    pub fn is_bloodied(&self) -> bool {
        self.bloodied.is_active()
    }

    /// True when the rattled pool holds any dice.
    pub fn is_rattled(&self) -> bool {
        self.rattled.is_active()
    }

    /// Current spark.
    pub fn spark_value(&self) -> u32 {
        self.spark.value()
    }

    /// Current story.
    pub fn story_value(&self) -> u32 {
        self.story.value()
    }

    /// Look up a stat.
    pub fn stat(&self, key: &str) -> CoreResult<Stat> {
        self.stats
            .get(key)
            .copied()
            .ok_or_else(|| CoreError::UnknownStat(key.to_string()))
    }

    /// Set a stat score, rejecting values above the configured maximum.
    pub fn set_stat(&mut self, key: &str, value: u32, config: &SystemConfig) -> CoreResult<()> {
        if value > config.max_stat {
            return Err(CoreError::StatOutOfRange {
                key: key.to_string(),
                value,
                min: 0,
                max: config.max_stat,
            });
        }
        let stat = self
            .stats
            .get_mut(key)
            .ok_or_else(|| CoreError::UnknownStat(key.to_string()))?;
        stat.value = value;
        Ok(())
    }

    /// Flip a stat's mark. Returns the new mark.
    pub fn toggle_stat_mark(&mut self, key: &str) -> CoreResult<bool> {
        let stat = self
            .stats
            .get_mut(key)
            .ok_or_else(|| CoreError::UnknownStat(key.to_string()))?;
        stat.marked = !stat.marked;
        Ok(stat.marked)
    }

    /// Stats in configured display order, with labels.
    pub fn ordered_stats<'a>(&'a self, config: &'a SystemConfig) -> Vec<StatView<'a>> {
        let mut views: Vec<StatView<'a>> = self
            .stats
            .iter()
            .map(|(key, stat)| {
                let names = StatLabel::resolve(key, config);
                StatView {
                    key: key.as_str(),
                    label: names.label,
                    abbr: names.abbr,
                    stat: *stat,
                }
            })
            .collect();
        views.sort_by_key(|v| config.order_of(v.key));
        views
    }

    /// Label and abbreviation for every stat on the character, by key.
    pub fn stat_labels<'a>(
        &'a self,
        config: &'a SystemConfig,
    ) -> BTreeMap<&'a str, StatLabel<'a>> {
        self.stats
            .keys()
            .map(|key| (key.as_str(), StatLabel::resolve(key, config)))
            .collect()
    }

    /// Check stat keys and values against the configuration.
    pub fn validate(&self, config: &SystemConfig) -> CoreResult<()> {
        for (key, stat) in &self.stats {
            if !config.is_known(key) {
                tracing::warn!(stat = %key, "character has a stat the system does not define");
                return Err(CoreError::UnknownStat(key.clone()));
            }
            if stat.value > config.max_stat {
                return Err(CoreError::StatOutOfRange {
                    key: key.clone(),
                    value: stat.value,
                    min: 0,
                    max: config.max_stat,
                });
            }
        }
        Ok(())
    }

    /// Snapshot of the values a dice roller may reference.
    pub fn roll_data(&self, id: ActorId) -> RollData {
        RollData {
            id,
            stats: self.stats.clone(),
            is_bloodied: self.is_bloodied(),
            is_rattled: self.is_rattled(),
            spark: self.spark_value(),
            level: self.level(),
        }
    }
}

/// Contextual data handed to the dice roller alongside a formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollData {
    /// The rolling actor.
    pub id: ActorId,
    /// Stat scores by key.
    pub stats: BTreeMap<String, Stat>,
    /// Whether the bloodied pool holds dice.
    pub is_bloodied: bool,
    /// Whether the rattled pool holds dice.
    pub is_rattled: bool,
    /// Spark available before the roll.
    pub spark: u32,
    /// Derived level.
    pub level: u32,
}
