//! Day-based streak tracking.
//!
//! A streak counts consecutive calendar days with at least one logged
//! entry. Calendar days are taken in the user's configured UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use super::types::StreakState;

/// Result of advancing a streak with a new log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakUpdate {
    pub state: StreakState,
    /// True only when the streak grew by one day (or started).
    pub increased: bool,
}

/// Streak tracker.
#[derive(Debug, Clone, Copy)]
pub struct StreakTracker {
    offset: FixedOffset,
}

impl Default for StreakTracker {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl StreakTracker {
    /// Create a tracker that computes calendar days in `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar day of a timestamp in the tracker's offset.
    pub fn calendar_day(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.offset).date_naive()
    }

    /// Advance the streak for a log event at `now`.
    ///
    /// `last_log_date` moves to `now` on every branch except a `now` on an
    /// earlier calendar day than the last log, which leaves the state as is.
    pub fn advance(&self, state: &StreakState, now: DateTime<Utc>) -> StreakUpdate {
        let mut next = state.clone();
        next.active = true;

        let Some(last) = state.last_log_date else {
            next.current_streak = 1;
            next.longest_streak = state.longest_streak.max(1);
            next.last_log_date = Some(now);
            tracing::debug!("Streak started");
            return StreakUpdate {
                state: next,
                increased: true,
            };
        };

        let delta = (self.calendar_day(now) - self.calendar_day(last)).num_days();
        let increased = match delta {
            d if d < 0 => {
                // Out-of-order event: leave the streak and its anchor untouched.
                tracing::warn!(
                    "Ignoring streak event {} days before last log at {}",
                    -d,
                    last
                );
                return StreakUpdate {
                    state: next,
                    increased: false,
                };
            }
            0 => false,
            1 => {
                next.current_streak = state.current_streak.saturating_add(1);
                next.longest_streak = state.longest_streak.max(next.current_streak);
                true
            }
            gap => {
                tracing::debug!(
                    "Streak of {} broken after {} days",
                    state.current_streak,
                    gap
                );
                next.current_streak = 1;
                next.longest_streak = state.longest_streak.max(1);
                false
            }
        };

        next.last_log_date = Some(now);
        StreakUpdate {
            state: next,
            increased,
        }
    }

    /// Streak as it should be displayed at `now`.
    ///
    /// A streak whose last log is older than yesterday shows as inactive
    /// with a current count of zero. The stored record is left alone.
    pub fn view(&self, state: &StreakState, now: DateTime<Utc>) -> StreakState {
        let mut view = state.clone();
        match state.last_log_date {
            None => {
                view.current_streak = 0;
                view.active = false;
            }
            Some(last) => {
                let delta = (self.calendar_day(now) - self.calendar_day(last)).num_days();
                if delta > 1 {
                    view.current_streak = 0;
                    view.active = false;
                }
            }
        }
        view
    }
}
