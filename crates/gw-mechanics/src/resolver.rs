//! Stat-roll resolution.
//!
//! A roll moves through `Idle → AwaitingDecision → (Cancelled | Resolved)`:
//!
//! 1. [`PreparedRoll::prepare`] checks the stat exists and builds the
//!    snapshot shown to the player. An unknown stat stops here with
//!    [`MechError::InvalidStat`].
//! 2. The decision interface is asked for the player's choices. This is the
//!    only suspension point. Cancelling ends the roll with nothing changed.
//! 3. Spark is spent and persisted before any dice are rolled, so a spend
//!    stands even if rolling or posting fails afterwards. If persisting
//!    fails, the actor keeps its spark.
//! 4. The formula is rolled, read, and posted as a message.

use std::sync::Arc;
use std::time::Duration;

use gw_core::{Actor, ActorId, FieldUpdate, RollData};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decision::{Assister, DecisionResponse, RollDecisionInterface, RollSnapshot};
use crate::dice::{DiceRoller, RollResult};
use crate::error::{MechError, MechResult};
use crate::formula::RollFormula;
use crate::ports::{MessagePort, PersistencePort, RollMessage, RollMode, Speaker};
use crate::resolution::{HighestDie, Outcome, Resolution};

/// Where a roll is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollPhase {
    /// Not started, or rejected before asking the player.
    Idle,
    /// Waiting on the decision interface.
    AwaitingDecision,
    /// The player dismissed the prompt.
    Cancelled,
    /// Dice were rolled and read.
    Resolved,
}

impl std::fmt::Display for RollPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::AwaitingDecision => write!(f, "awaiting-decision"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// Resolver settings.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Give up on a pending decision after this long. `None` waits forever.
    ///
    /// A timeout uses `tokio::time`, so rolls must then run inside a tokio
    /// runtime with the time driver enabled. Without one, the roll panics.
    pub decision_timeout: Option<Duration>,
    /// Visibility of posted rolls.
    pub roll_mode: RollMode,
    /// Thresholds for reading rolls.
    pub reading: HighestDie,
}

impl ResolverConfig {
    /// Set the decision timeout.
    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = Some(timeout);
        self
    }

    /// Set the roll mode.
    pub fn with_roll_mode(mut self, mode: RollMode) -> Self {
        self.roll_mode = mode;
        self
    }
}

/// Character values and player choices available to the dice roller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollContext {
    /// Character values captured before the roll.
    #[serde(flatten)]
    pub data: RollData,
    /// Stat dice chosen.
    pub stat_dice: u32,
    /// Thorn dice chosen.
    pub thorns: u32,
    /// Who assisted.
    pub assists: Vec<Assister>,
}

impl RollContext {
    /// Combine character values with the chosen dice.
    pub fn new(data: RollData, stat_dice: u32, thorns: u32, assists: Vec<Assister>) -> Self {
        Self {
            data,
            stat_dice,
            thorns,
            assists,
        }
    }
}

/// A completed stat roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoll {
    /// The rolling actor.
    pub actor: ActorId,
    /// The stat rolled.
    pub stat: String,
    /// Dice counts rolled.
    pub formula: RollFormula,
    /// Values the roller was given.
    pub context: RollContext,
    /// The dice as rolled.
    pub dice: RollResult,
    /// How the dice were read.
    pub resolution: Resolution,
    /// Spark steps actually spent.
    pub spark_spent: u32,
}

impl ResolvedRoll {
    /// The final result after thorns.
    pub fn outcome(&self) -> Outcome {
        self.resolution.outcome
    }
}

/// How a roll request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// The player dismissed the prompt; nothing changed.
    Cancelled,
    /// The roll resolved and was posted.
    Resolved(Box<ResolvedRoll>),
}

impl RollOutcome {
    /// The terminal phase this outcome represents.
    pub fn phase(&self) -> RollPhase {
        match self {
            Self::Cancelled => RollPhase::Cancelled,
            Self::Resolved(_) => RollPhase::Resolved,
        }
    }

    /// The resolved roll, if there is one.
    pub fn resolved(&self) -> Option<&ResolvedRoll> {
        match self {
            Self::Cancelled => None,
            Self::Resolved(roll) => Some(roll),
        }
    }
}

/// A roll that passed the precondition check and awaits a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRoll {
    stat: String,
    snapshot: RollSnapshot,
    data: RollData,
}

impl PreparedRoll {
    /// Check the stat and capture the snapshot. Reads only.
    pub fn prepare(actor: &Actor, stat: &str) -> MechResult<Self> {
        let character = actor.character()?;
        let Some(score) = character.stats.get(stat) else {
            warn!(actor = %actor.id, stat, "roll requested for unknown stat");
            return Err(MechError::InvalidStat(stat.to_string()));
        };

        let snapshot = RollSnapshot {
            spark: character.spark_value(),
            stat: stat.to_string(),
            dice_default: score.value,
            is_bloodied: character.is_bloodied(),
            is_rattled: character.is_rattled(),
            is_marked: score.marked,
        };

        Ok(Self {
            stat: stat.to_string(),
            snapshot,
            data: character.roll_data(actor.id),
        })
    }

    /// What the player is shown.
    pub fn snapshot(&self) -> &RollSnapshot {
        &self.snapshot
    }

    /// The stat being rolled.
    pub fn stat(&self) -> &str {
        &self.stat
    }
}

/// Runs stat rolls against the hosting application's collaborators.
pub struct RollResolver {
    config: ResolverConfig,
    persistence: Arc<dyn PersistencePort>,
    messages: Arc<dyn MessagePort>,
    roller: Arc<dyn DiceRoller>,
}

impl RollResolver {
    /// Create a resolver.
    pub fn new(
        config: ResolverConfig,
        persistence: Arc<dyn PersistencePort>,
        messages: Arc<dyn MessagePort>,
        roller: Arc<dyn DiceRoller>,
    ) -> Self {
        Self {
            config,
            persistence,
            messages,
            roller,
        }
    }

    /// The resolver's settings.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Roll `stat` for `actor`, asking `decisions` for the player's choices.
    ///
    /// On success the actor's spark reflects any spend. Cancellation, an
    /// unknown stat, a decision timeout, an oversized dice request, and a
    /// failed spark save leave the actor untouched.
    pub async fn roll_stat(
        &self,
        actor: &mut Actor,
        stat: &str,
        decisions: &dyn RollDecisionInterface,
    ) -> MechResult<RollOutcome> {
        let prepared = PreparedRoll::prepare(actor, stat)?;
        debug!(
            actor = %actor.id,
            stat,
            phase = %RollPhase::AwaitingDecision,
            spark = prepared.snapshot.spark,
            dice_default = prepared.snapshot.dice_default,
            "requesting roll decision"
        );

        let decision = match self.await_decision(decisions, &prepared.snapshot).await? {
            DecisionResponse::Decided(decision) => decision,
            DecisionResponse::Cancelled => {
                debug!(actor = %actor.id, stat, phase = %RollPhase::Cancelled, "roll cancelled");
                return Ok(RollOutcome::Cancelled);
            }
        };

        let formula = RollFormula::checked(decision.dice, decision.thorns).inspect_err(|e| {
            warn!(actor = %actor.id, stat, error = %e, "roll decision rejected");
        })?;
        let spark_spent = self.settle_spark(actor, decision.spark_used).await?;
        let roll = self.resolve(prepared, formula, decision.assisters, spark_spent)?;
        debug!(
            actor = %actor.id,
            stat,
            phase = %RollPhase::Resolved,
            formula = %roll.formula,
            outcome = %roll.outcome(),
            spark_spent,
            "roll resolved"
        );

        let roll = self.post_roll(actor, roll).await?;
        Ok(RollOutcome::Resolved(Box::new(roll)))
    }

    /// Post a resolved roll as `actor`.
    ///
    /// Used by [`roll_stat`](Self::roll_stat) and to retry a post that
    /// failed with [`MechError::MessagePost`]. Returns the roll on success.
    pub async fn post_roll(&self, actor: &Actor, roll: ResolvedRoll) -> MechResult<ResolvedRoll> {
        let message = RollMessage {
            speaker: Speaker {
                actor: actor.id,
                alias: actor.name.clone(),
            },
            roll_mode: self.config.roll_mode,
            roll,
        };
        match self.messages.post_roll_message(&message).await {
            Ok(()) => Ok(message.roll),
            Err(source) => {
                warn!(actor = %actor.id, error = %source, "roll message not posted");
                Err(MechError::MessagePost {
                    roll: Box::new(message.roll),
                    source,
                })
            }
        }
    }

    async fn await_decision(
        &self,
        decisions: &dyn RollDecisionInterface,
        snapshot: &RollSnapshot,
    ) -> MechResult<DecisionResponse> {
        let request = decisions.request(snapshot);
        match self.config.decision_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .map_err(|_| MechError::DecisionTimedOut),
            None => Ok(request.await),
        }
    }

    /// Spend up to `requested` spark and persist the track. Returns the
    /// number of steps actually spent.
    ///
    /// The actor only changes once the store has accepted the new track, so
    /// a failed save can be retried without spending twice.
    async fn settle_spark(&self, actor: &mut Actor, requested: u32) -> MechResult<u32> {
        if requested == 0 {
            return Ok(0);
        }

        let id = actor.id;
        let mut spark = actor.character()?.spark.clone();
        let spent = spark.consume(requested);
        if spent < requested {
            warn!(
                actor = %id,
                requested,
                spent,
                "spark spend clamped to available steps"
            );
        }
        let update = FieldUpdate::Spark(spark);

        self.persistence
            .update(id, &update)
            .await
            .map_err(MechError::Persistence)?;
        update.apply(actor.character_mut()?)?;
        debug!(actor = %id, spent, "spark settled");
        Ok(spent)
    }

    fn resolve(
        &self,
        prepared: PreparedRoll,
        formula: RollFormula,
        assisters: Vec<Assister>,
        spark_spent: u32,
    ) -> MechResult<ResolvedRoll> {
        let context = RollContext::new(
            prepared.data,
            formula.stat_dice,
            formula.thorns,
            assisters,
        );
        let dice = self
            .roller
            .roll(&formula, &context)
            .map_err(MechError::Roller)?;
        let resolution = self.config.reading.resolve(&dice);

        Ok(ResolvedRoll {
            actor: context.data.id,
            stat: prepared.stat,
            formula,
            context,
            dice,
            resolution,
            spark_spent,
        })
    }
}
