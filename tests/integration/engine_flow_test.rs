//! Integration tests for the full logging flow over the in-memory store

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;
use waste_progress::gamification::{Celebration, CelebrationKind};
use waste_progress::storage::KeyValueStore;
use waste_progress::{
    points_for, EngineConfig, MemoryStore, ProgressEngine, ProgressError, UserContext, WasteTally,
    WasteType,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

fn engine_over(store: Arc<MemoryStore>) -> ProgressEngine {
    ProgressEngine::new(store, &EngineConfig::default())
}

/// Log one entry the way the app does and return the outcome.
async fn log(
    engine: &ProgressEngine,
    user: &UserContext,
    tally: &mut WasteTally,
    waste_type: WasteType,
    now: DateTime<Utc>,
) -> waste_progress::ProgressOutcome {
    tally.record(points_for(waste_type, 1.0));
    engine
        .on_waste_logged(
            user,
            now,
            tally.total_entries as f64,
            tally.total_points as f64,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_first_entry_earns_badge_and_starts_streak() {
    let engine = engine_over(Arc::new(MemoryStore::new()));
    let user = UserContext::new(Uuid::new_v4());
    let mut tally = WasteTally::default();

    engine.start_session(&user, start()).await.unwrap();
    let outcome = log(&engine, &user, &mut tally, WasteType::Plastic, start()).await;

    assert!(outcome.streak_increased);
    assert_eq!(outcome.streak.current_streak, 1);
    let ids: Vec<_> = outcome.new_badges.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["first_entry"]);

    let celebration = Celebration::select(&outcome, points_for(WasteType::Plastic, 1.0));
    assert_eq!(celebration.kind, CelebrationKind::Badge);

    let journal = engine.achievements(&user).await.unwrap();
    assert_eq!(journal.len(), 1);
    assert_eq!(journal[0].title, "Badge unlocked: Getting Started");
}

#[tokio::test]
async fn test_week_of_logging() {
    let engine = engine_over(Arc::new(MemoryStore::new()));
    let user = UserContext::new(Uuid::new_v4());
    let mut tally = WasteTally::default();

    for day in 0..7 {
        let now = start() + Duration::days(day);
        engine.start_session(&user, now).await.unwrap();
        for _ in 0..3 {
            log(&engine, &user, &mut tally, WasteType::Glass, now).await;
        }
    }

    let snapshot = engine
        .snapshot(&user, start() + Duration::days(6))
        .await
        .unwrap();
    assert_eq!(snapshot.streak.current_streak, 7);
    assert_eq!(snapshot.streak.longest_streak, 7);

    let earned: Vec<_> = snapshot
        .badges
        .iter()
        .filter(|s| s.earned)
        .map(|s| s.badge.id.as_str())
        .collect();
    assert!(earned.contains(&"first_entry"));
    assert!(earned.contains(&"streak_legend"));
    assert!(earned.contains(&"eco_warrior"));

    // 21 entries this week clears the weekly entries goal of 15.
    let weekly = snapshot
        .challenges
        .iter()
        .find(|c| c.id.ends_with("_recycler"))
        .unwrap();
    assert!(weekly.completed);
}

#[tokio::test]
async fn test_gap_resets_streak_but_keeps_longest() {
    let engine = engine_over(Arc::new(MemoryStore::new()));
    let user = UserContext::new(Uuid::new_v4());
    let mut tally = WasteTally::default();

    for day in 0..3 {
        log(&engine, &user, &mut tally, WasteType::Paper, start() + Duration::days(day)).await;
    }
    let outcome = log(&engine, &user, &mut tally, WasteType::Paper, start() + Duration::days(5)).await;

    assert!(!outcome.streak_increased);
    assert_eq!(outcome.streak.current_streak, 1);
    assert_eq!(outcome.streak.longest_streak, 3);
}

#[tokio::test]
async fn test_invalid_counters_leave_state_untouched() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_over(store.clone());
    let user = UserContext::new(Uuid::new_v4());

    let err = engine
        .on_waste_logged(&user, start(), -1.0, 0.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::InvalidInput(_)));

    let err = engine
        .on_waste_logged(&user, start(), 1.0, f64::NAN)
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::InvalidInput(_)));

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_users_do_not_share_state() {
    let engine = engine_over(Arc::new(MemoryStore::new()));
    let alice = UserContext::new(Uuid::new_v4());
    let bob = UserContext::new(Uuid::new_v4());
    let mut tally = WasteTally::default();

    log(&engine, &alice, &mut tally, WasteType::Metal, start()).await;

    let streak = engine.streak(&bob, start()).await.unwrap();
    assert_eq!(streak.current_streak, 0);
    assert!(engine
        .badges(&bob)
        .await
        .unwrap()
        .iter()
        .all(|s| !s.earned));
}

#[tokio::test]
async fn test_award_special_badge_once() {
    let engine = engine_over(Arc::new(MemoryStore::new()));
    let user = UserContext::new(Uuid::new_v4());

    assert!(engine
        .award_badge(&user, "early_adopter", start())
        .await
        .unwrap());
    assert!(!engine
        .award_badge(&user, "early_adopter", start())
        .await
        .unwrap());

    let err = engine
        .award_badge(&user, "no_such_badge", start())
        .await
        .unwrap_err();
    assert!(matches!(err, ProgressError::UnknownBadge(_)));
}

#[tokio::test]
async fn test_prune_drops_expired_challenges() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_over(store.clone());
    let user = UserContext::new(Uuid::new_v4());

    engine.start_session(&user, start()).await.unwrap();
    let before = engine
        .repository()
        .load_challenges(&user)
        .await
        .unwrap()
        .len();

    // Two days on, the daily set has expired but the week and month remain.
    let removed = engine
        .prune_challenges(&user, start() + Duration::days(2))
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let after = engine.repository().load_challenges(&user).await.unwrap();
    assert_eq!(after.len(), before - 2);
    assert!(store.get(&format!("{}:challenges", user.user_id)).await.unwrap().is_some());
}
