//! Unit tests for streak continuation and breakage

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use waste_progress::gamification::{StreakState, StreakTracker};

fn jan(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

/// Streak {3, 5, Jan 5} advanced on Jan 6 10:00
#[test]
fn test_continuation_scenario() {
    let tracker = StreakTracker::default();
    let state = StreakState {
        current_streak: 3,
        longest_streak: 5,
        last_log_date: Some(jan(5, 17)),
        active: true,
    };

    let update = tracker.advance(&state, jan(6, 10));
    assert!(update.increased);
    assert_eq!(update.state.current_streak, 4);
    assert_eq!(update.state.longest_streak, 5);
    assert!(update.state.active);
}

#[test]
fn test_break_after_three_days() {
    let tracker = StreakTracker::default();
    let state = StreakState {
        current_streak: 6,
        longest_streak: 6,
        last_log_date: Some(jan(5, 8)),
        active: true,
    };

    let update = tracker.advance(&state, jan(5, 8) + Duration::days(3));
    assert!(!update.increased);
    assert_eq!(update.state.current_streak, 1);
    assert_eq!(update.state.longest_streak, 6);
}

#[test]
fn test_many_logs_same_day() {
    let tracker = StreakTracker::default();
    let mut state = tracker.advance(&StreakState::default(), jan(10, 0)).state;

    for hour in 1..24 {
        let update = tracker.advance(&state, jan(10, hour));
        assert!(!update.increased);
        assert_eq!(update.state.current_streak, 1);
        state = update.state;
    }
}

#[test]
fn test_midnight_boundary_counts_as_next_day() {
    let tracker = StreakTracker::default();
    let late = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap();
    let early = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 1).unwrap();

    let first = tracker.advance(&StreakState::default(), late);
    let second = tracker.advance(&first.state, early);
    assert!(second.increased);
    assert_eq!(second.state.current_streak, 2);
}

#[test]
fn test_calendar_day_in_negative_offset() {
    let tracker = StreakTracker::new(FixedOffset::west_opt(8 * 3600).unwrap());
    // 06:00 UTC on Jan 6 is 22:00 on Jan 5 at UTC-8.
    assert_eq!(
        tracker.calendar_day(jan(6, 6)),
        chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    );
}
