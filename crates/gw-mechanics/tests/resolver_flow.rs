//! End-to-end stat rolls against in-memory ports.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gw_core::{Actor, ActorId, DicePool, FieldUpdate, StepTrack, SystemConfig};
use gw_mechanics::{
    Assister, Decision, DecisionResponse, DiceRoller, DiceTag, MechError, MessagePort, Outcome,
    PersistencePort, ResolverConfig, RollContext, RollDecisionInterface, RollFormula, RollMessage,
    MAX_DICE, RollMode, RollOutcome, RollResolver, RollResult, RollSnapshot, StdRngRoller,
};

#[derive(Default)]
struct RecordingStore {
    updates: Mutex<Vec<(ActorId, FieldUpdate)>>,
    /// Number of upcoming updates to reject.
    failures: AtomicU32,
}

impl RecordingStore {
    fn failing(times: u32) -> Self {
        Self {
            failures: AtomicU32::new(times),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PersistencePort for RecordingStore {
    async fn update(&self, actor: ActorId, update: &FieldUpdate) -> anyhow::Result<()> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            anyhow::bail!("store offline");
        }
        self.updates.lock().unwrap().push((actor, update.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingChat {
    messages: Mutex<Vec<RollMessage>>,
    fail: bool,
}

#[async_trait]
impl MessagePort for RecordingChat {
    async fn post_roll_message(&self, message: &RollMessage) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("chat unavailable");
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Answers every request the same way and remembers what it was shown.
struct Scripted {
    response: DecisionResponse,
    seen: Mutex<Vec<RollSnapshot>>,
}

impl Scripted {
    fn decide(decision: Decision) -> Self {
        Self {
            response: DecisionResponse::Decided(decision),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn cancel() -> Self {
        Self {
            response: DecisionResponse::Cancelled,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RollDecisionInterface for Scripted {
    async fn request(&self, snapshot: &RollSnapshot) -> DecisionResponse {
        self.seen.lock().unwrap().push(snapshot.clone());
        self.response.clone()
    }
}

struct NeverAnswers;

#[async_trait]
impl RollDecisionInterface for NeverAnswers {
    async fn request(&self, _snapshot: &RollSnapshot) -> DecisionResponse {
        std::future::pending().await
    }
}

/// Returns fixed dice regardless of the formula.
struct FixedDice(RollResult);

impl DiceRoller for FixedDice {
    fn roll(&self, _formula: &RollFormula, _context: &RollContext) -> anyhow::Result<RollResult> {
        Ok(self.0.clone())
    }
}

struct BrokenDice;

impl DiceRoller for BrokenDice {
    fn roll(&self, _formula: &RollFormula, _context: &RollContext) -> anyhow::Result<RollResult> {
        anyhow::bail!("dice engine crashed")
    }
}

fn wren() -> Actor {
    let mut actor = Actor::new_character("Wren", &SystemConfig::default());
    let c = actor.character_mut().unwrap();
    c.stats.get_mut("bra").unwrap().value = 2;
    c.spark = StepTrack::from_steps([true, true, false]);
    actor
}

fn resolver(
    store: Arc<RecordingStore>,
    chat: Arc<RecordingChat>,
    roller: Arc<dyn DiceRoller>,
) -> RollResolver {
    RollResolver::new(ResolverConfig::default(), store, chat, roller)
}

fn decision(dice: u32, thorns: u32, spark_used: u32) -> Decision {
    Decision {
        dice,
        thorns,
        assisters: Vec::new(),
        spark_used,
    }
}

#[tokio::test]
async fn spending_spark_clears_lowest_step_and_persists_first() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(StdRngRoller::seeded(3)));
    let mut actor = wren();

    let outcome = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(decision(2, 1, 1)))
        .await
        .unwrap();

    let roll = outcome.resolved().unwrap();
    assert_eq!(roll.spark_spent, 1);
    assert_eq!(roll.formula.to_string(), "{2d6kh, 1d8}");
    assert_eq!(roll.dice.values(DiceTag::Stat).len(), 2);
    assert_eq!(roll.dice.values(DiceTag::Thorn).len(), 1);

    let expected = StepTrack::from_steps([false, true, false]);
    assert_eq!(actor.character().unwrap().spark, expected);

    let updates = store.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0], (actor.id, FieldUpdate::Spark(expected)));

    let messages = chat.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].speaker.alias, "Wren");
    assert_eq!(messages[0].roll_mode, RollMode::PublicRoll);
    assert_eq!(&messages[0].roll, roll);
}

#[tokio::test]
async fn decision_sees_character_snapshot() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store, chat, Arc::new(StdRngRoller::seeded(1)));
    let mut actor = wren();
    {
        let c = actor.character_mut().unwrap();
        c.bloodied.pool = DicePool::d6(2);
        c.stats.get_mut("bra").unwrap().marked = true;
    }
    let decisions = Scripted::decide(decision(2, 0, 0));

    resolver.roll_stat(&mut actor, "bra", &decisions).await.unwrap();

    let seen = decisions.seen.lock().unwrap();
    assert_eq!(
        seen[0],
        RollSnapshot {
            spark: 2,
            stat: "bra".to_string(),
            dice_default: 2,
            is_bloodied: true,
            is_rattled: false,
            is_marked: true,
        }
    );
}

#[tokio::test]
async fn no_spark_spent_means_no_update() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(StdRngRoller::seeded(5)));
    let mut actor = wren();
    let before = actor.clone();

    let mut d = decision(2, 0, 0);
    d.assisters.push(Assister::named("Ash"));
    let outcome = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(d))
        .await
        .unwrap();

    assert_eq!(actor, before);
    assert!(store.updates.lock().unwrap().is_empty());
    let roll = outcome.resolved().unwrap();
    assert_eq!(roll.context.assists, vec![Assister::named("Ash")]);
    assert_eq!(chat.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn cancel_changes_nothing() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(StdRngRoller::seeded(2)));
    let mut actor = wren();
    let before = actor.clone();

    let outcome = resolver
        .roll_stat(&mut actor, "bra", &Scripted::cancel())
        .await
        .unwrap();

    assert_eq!(outcome, RollOutcome::Cancelled);
    assert_eq!(actor, before);
    assert!(store.updates.lock().unwrap().is_empty());
    assert!(chat.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_stat_is_rejected_before_asking() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(StdRngRoller::seeded(2)));
    let mut actor = wren();
    let before = actor.clone();
    let decisions = Scripted::decide(decision(2, 0, 1));

    let err = resolver
        .roll_stat(&mut actor, "luck", &decisions)
        .await
        .unwrap_err();

    assert!(matches!(err, MechError::InvalidStat(ref s) if s == "luck"));
    assert!(decisions.seen.lock().unwrap().is_empty());
    assert_eq!(actor, before);
    assert!(store.updates.lock().unwrap().is_empty());
    assert!(chat.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn overspending_spark_is_clamped() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat, Arc::new(StdRngRoller::seeded(9)));
    let mut actor = wren();

    let outcome = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(decision(2, 0, 5)))
        .await
        .unwrap();

    assert_eq!(outcome.resolved().unwrap().spark_spent, 2);
    let spark = &actor.character().unwrap().spark;
    assert_eq!(spark.value(), 0);
    assert_eq!(spark.len(), 3);
    assert_eq!(store.updates.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn decision_timeout_changes_nothing() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = RollResolver::new(
        ResolverConfig::default().with_decision_timeout(Duration::from_millis(20)),
        store.clone(),
        chat.clone(),
        Arc::new(StdRngRoller::seeded(2)),
    );
    let mut actor = wren();
    let before = actor.clone();

    let err = resolver
        .roll_stat(&mut actor, "bra", &NeverAnswers)
        .await
        .unwrap_err();

    assert!(matches!(err, MechError::DecisionTimedOut));
    assert_eq!(actor, before);
    assert!(store.updates.lock().unwrap().is_empty());
    assert!(chat.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_post_returns_roll_for_retry() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat {
        fail: true,
        ..RecordingChat::default()
    });
    let resolver = resolver(store.clone(), chat, Arc::new(StdRngRoller::seeded(4)));
    let mut actor = wren();

    let err = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(decision(2, 0, 1)))
        .await
        .unwrap_err();

    let MechError::MessagePost { roll, .. } = err else {
        panic!("expected a message post failure");
    };
    assert_eq!(roll.spark_spent, 1);
    assert_eq!(actor.character().unwrap().spark.value(), 1);
    assert_eq!(store.updates.lock().unwrap().len(), 1);

    let healthy_chat = Arc::new(RecordingChat::default());
    let retry = RollResolver::new(
        ResolverConfig::default(),
        store,
        healthy_chat.clone(),
        Arc::new(StdRngRoller::seeded(4)),
    );
    let posted = retry.post_roll(&actor, *roll.clone()).await.unwrap();
    assert_eq!(posted, *roll);
    assert_eq!(healthy_chat.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn roller_failure_keeps_spent_spark() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(BrokenDice));
    let mut actor = wren();

    let err = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(decision(2, 0, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, MechError::Roller(_)));
    assert_eq!(actor.character().unwrap().spark.value(), 1);
    assert_eq!(store.updates.lock().unwrap().len(), 1);
    assert!(chat.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn persistence_failure_stops_before_rolling() {
    let store = Arc::new(RecordingStore::failing(u32::MAX));
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(StdRngRoller::seeded(4)));
    let mut actor = wren();
    let before = actor.clone();

    let err = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(decision(2, 0, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, MechError::Persistence(_)));
    assert_eq!(actor, before);
    assert!(store.updates.lock().unwrap().is_empty());
    assert!(chat.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn retry_after_failed_save_spends_spark_once() {
    let store = Arc::new(RecordingStore::failing(1));
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(StdRngRoller::seeded(4)));
    let mut actor = wren();
    let decisions = Scripted::decide(decision(2, 0, 1));

    let err = resolver
        .roll_stat(&mut actor, "bra", &decisions)
        .await
        .unwrap_err();
    assert!(matches!(err, MechError::Persistence(_)));
    assert_eq!(actor.character().unwrap().spark.value(), 2);

    let outcome = resolver
        .roll_stat(&mut actor, "bra", &decisions)
        .await
        .unwrap();

    assert_eq!(outcome.resolved().unwrap().spark_spent, 1);
    let expected = StepTrack::from_steps([false, true, false]);
    assert_eq!(actor.character().unwrap().spark, expected);
    let updates = store.updates.lock().unwrap();
    assert_eq!(updates.as_slice(), [(actor.id, FieldUpdate::Spark(expected))]);
    assert_eq!(chat.messages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn oversized_dice_request_changes_nothing() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store.clone(), chat.clone(), Arc::new(StdRngRoller::seeded(4)));
    let mut actor = wren();
    let before = actor.clone();

    let err = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(decision(u32::MAX, 0, 1)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MechError::TooManyDice {
            kind: DiceTag::Stat,
            requested: u32::MAX,
            max: MAX_DICE,
        }
    ));
    assert_eq!(actor, before);
    assert!(store.updates.lock().unwrap().is_empty());
    assert!(chat.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fixed_dice_read_through_thorns() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let dice = RollResult::from_values(&[6, 3], &[8]);
    let resolver = RollResolver::new(
        ResolverConfig::default().with_roll_mode(RollMode::GmRoll),
        store,
        chat.clone(),
        Arc::new(FixedDice(dice)),
    );
    let mut actor = wren();

    let outcome = resolver
        .roll_stat(&mut actor, "bra", &Scripted::decide(decision(2, 1, 0)))
        .await
        .unwrap();

    let roll = outcome.resolved().unwrap();
    assert_eq!(roll.resolution.base, Outcome::Perfect);
    assert_eq!(roll.outcome(), Outcome::Messy);
    assert_eq!(chat.messages.lock().unwrap()[0].roll_mode, RollMode::GmRoll);
}

#[tokio::test]
async fn npc_cannot_roll_stats() {
    let store = Arc::new(RecordingStore::default());
    let chat = Arc::new(RecordingChat::default());
    let resolver = resolver(store, chat, Arc::new(StdRngRoller::seeded(2)));
    let mut goblin = Actor::new_npc("Goblin");

    let err = resolver
        .roll_stat(&mut goblin, "bra", &Scripted::cancel())
        .await
        .unwrap_err();

    assert!(matches!(err, MechError::Core(_)));
}
