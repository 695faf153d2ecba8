//! Unit tests for challenge generation and progress

use chrono::{DateTime, Duration, Offset, TimeZone, Utc};
use waste_progress::gamification::{
    Challenge, ChallengeManager, ChallengeMetric, ChallengePeriod, ChallengeStatus,
};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn entries_challenge(goal: f64, progress: f64) -> Challenge {
    Challenge {
        id: "daily_test".to_string(),
        name: "Daily Logger".to_string(),
        description: "Log 3 waste entries today".to_string(),
        period: ChallengePeriod::Daily,
        metric: ChallengeMetric::Entries,
        goal,
        progress,
        reward: 50,
        icon: "checkmark-circle".to_string(),
        color: "#10b981".to_string(),
        start_at: at(5, 0),
        end_at: at(6, 0),
        completed: false,
        completed_at: None,
    }
}

/// Challenge {goal 3, progress 2} reaches 3 entries
#[test]
fn test_completion_scenario() {
    let manager = ChallengeManager::default();
    let mut challenges = vec![entries_challenge(3.0, 2.0)];

    let done = manager.update_progress(&mut challenges, 3.0, 0.0, at(5, 12));
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].progress, 3.0);
    assert!(done[0].completed);
    assert!(challenges[0].completed);
}

#[test]
fn test_frozen_after_completion() {
    let manager = ChallengeManager::default();
    let mut challenges = vec![entries_challenge(3.0, 2.0)];
    manager.update_progress(&mut challenges, 3.0, 0.0, at(5, 12));

    for entries in [4.0, 10.0, 100.0] {
        let done = manager.update_progress(&mut challenges, entries, 1000.0, at(5, 13));
        assert!(done.is_empty());
        assert_eq!(challenges[0].progress, 3.0);
        assert_eq!(challenges[0].status(at(5, 13)), ChallengeStatus::Completed);
    }
}

#[test]
fn test_name_does_not_decide_metric() {
    // Named like a points challenge but bound to entries.
    let manager = ChallengeManager::default();
    let mut challenge = entries_challenge(5.0, 0.0);
    challenge.name = "Point Hunter".to_string();
    let mut challenges = vec![challenge];

    manager.update_progress(&mut challenges, 2.0, 400.0, at(5, 12));
    assert_eq!(challenges[0].progress, 2.0);
    assert!(!challenges[0].completed);
}

#[test]
fn test_generate_twice_same_day_yields_one_set() {
    let manager = ChallengeManager::new(Utc.fix(), vec![ChallengePeriod::Daily]);
    let mut challenges = Vec::new();

    manager.generate(&mut challenges, at(5, 7));
    manager.generate(&mut challenges, at(5, 7) + Duration::hours(12));

    let daily: Vec<_> = challenges
        .iter()
        .filter(|c| c.period == ChallengePeriod::Daily)
        .collect();
    assert_eq!(daily.len(), 2);
}

#[test]
fn test_weekly_set_survives_across_days() {
    let manager = ChallengeManager::new(Utc.fix(), vec![ChallengePeriod::Weekly]);
    let mut challenges = Vec::new();

    // Jan 1 2024 is a Monday; Jan 7 is the Sunday of that week.
    assert_eq!(manager.generate(&mut challenges, at(1, 9)), 2);
    assert_eq!(manager.generate(&mut challenges, at(7, 23)), 0);
    assert_eq!(manager.generate(&mut challenges, at(8, 0)), 2);
}
