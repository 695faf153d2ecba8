//! Integration tests for the engine over the SQLite store

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use tempfile::tempdir;
use uuid::Uuid;
use waste_progress::storage::config::{load_config_from, save_config_to};
use waste_progress::storage::{KeyValueStore, StateKey};
use waste_progress::{EngineConfig, ProgressEngine, SqliteStore, UserContext};

#[tokio::test]
async fn test_progress_survives_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("progress.db");
    let user = UserContext::new(Uuid::new_v4());
    let day1 = Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap();

    {
        let store = SqliteStore::open(&db_path).unwrap();
        let engine = ProgressEngine::new(Arc::new(store), &EngineConfig::default());
        engine.start_session(&user, day1).await.unwrap();
        engine.on_waste_logged(&user, day1, 1.0, 10.0).await.unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    let engine = ProgressEngine::new(Arc::new(store), &EngineConfig::default());
    let outcome = engine
        .on_waste_logged(&user, day1 + Duration::days(1), 2.0, 20.0)
        .await
        .unwrap();

    assert!(outcome.streak_increased);
    assert_eq!(outcome.streak.current_streak, 2);
    // Already earned before the reopen.
    assert!(outcome.new_badges.iter().all(|b| b.id != "first_entry"));
}

#[tokio::test]
async fn test_corrupt_blob_falls_back_to_default() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let user = UserContext::new(Uuid::new_v4());
    store
        .set(&StateKey::Streak.for_user(&user), "{not json".to_string())
        .await
        .unwrap();

    let engine = ProgressEngine::new(store.clone(), &EngineConfig::default());
    let now = Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap();
    let outcome = engine.on_waste_logged(&user, now, 1.0, 5.0).await.unwrap();

    assert_eq!(outcome.streak.current_streak, 1);
    let raw = store
        .get(&StateKey::Streak.for_user(&user))
        .await
        .unwrap()
        .unwrap();
    assert!(raw.contains("\"current_streak\":1"));
}

#[tokio::test]
async fn test_config_offset_moves_day_boundary() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let config = EngineConfig {
        utc_offset_minutes: -300,
        ..Default::default()
    };
    save_config_to(&config, &config_path).unwrap();

    let config = load_config_from(&config_path).unwrap();
    assert_eq!(config.utc_offset_minutes, -300);

    let engine = ProgressEngine::new(
        Arc::new(SqliteStore::open_in_memory().unwrap()),
        &config,
    );
    let user = UserContext::new(Uuid::new_v4());

    // 23:00 and 03:00 UTC are 18:00 and 22:00 on the same local day at UTC-5.
    let evening = Utc.with_ymd_and_hms(2024, 3, 4, 23, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2024, 3, 5, 3, 0, 0).unwrap();
    engine.on_waste_logged(&user, evening, 1.0, 5.0).await.unwrap();
    let outcome = engine.on_waste_logged(&user, later, 2.0, 10.0).await.unwrap();

    assert!(!outcome.streak_increased);
    assert_eq!(outcome.streak.current_streak, 1);
}
