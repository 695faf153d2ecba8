//! Core types for the progress engine.
//!
//! Defines badge definitions and earned state, the streak record,
//! challenges and the achievement journal entries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which cumulative counter gates a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeMetric {
    /// Total logged waste entries
    Entries,
    /// Total points earned
    Points,
    /// Current consecutive-day streak
    Streak,
    /// Awarded out of band, never by threshold comparison
    Special,
}

impl BadgeMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeMetric::Entries => "entries",
            BadgeMetric::Points => "points",
            BadgeMetric::Streak => "streak",
            BadgeMetric::Special => "special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "entries" => Some(BadgeMetric::Entries),
            "points" => Some(BadgeMetric::Points),
            "streak" => Some(BadgeMetric::Streak),
            "special" => Some(BadgeMetric::Special),
            _ => None,
        }
    }
}

/// Badge definition from the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Threshold the metric must reach.
    pub requirement: f64,
    pub metric: BadgeMetric,
    pub color: String,
}

/// Earned state of a single badge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BadgeRecord {
    pub earned: bool,
    pub earned_at: Option<DateTime<Utc>>,
}

/// Per-user earned state keyed by badge id.
///
/// A record only ever moves from unearned to earned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeState {
    records: BTreeMap<String, BadgeRecord>,
}

impl BadgeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the badge has been earned.
    pub fn is_earned(&self, badge_id: &str) -> bool {
        self.records.get(badge_id).is_some_and(|r| r.earned)
    }

    pub fn get(&self, badge_id: &str) -> Option<&BadgeRecord> {
        self.records.get(badge_id)
    }

    /// Ids of every earned badge.
    pub fn earned_ids(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|(_, r)| r.earned)
            .map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert an unearned record if none exists. Returns true if inserted.
    pub(crate) fn ensure(&mut self, badge_id: &str) -> bool {
        if self.records.contains_key(badge_id) {
            return false;
        }
        self.records
            .insert(badge_id.to_string(), BadgeRecord::default());
        true
    }

    /// Mark a badge earned. Returns false if it already was.
    pub(crate) fn mark_earned(&mut self, badge_id: &str, at: DateTime<Utc>) -> bool {
        let record = self.records.entry(badge_id.to_string()).or_default();
        if record.earned {
            return false;
        }
        record.earned = true;
        record.earned_at = Some(at);
        true
    }
}

/// A catalog badge joined with the user's earned state, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeStatus {
    pub badge: BadgeDefinition,
    pub earned: bool,
    pub earned_at: Option<DateTime<Utc>>,
}

/// Cumulative counters fed to badge evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub entries: f64,
    pub points: f64,
    pub streak: u32,
}

impl Metrics {
    pub fn new(entries: f64, points: f64, streak: u32) -> Self {
        Self {
            entries,
            points,
            streak,
        }
    }

    /// Value compared against a badge requirement. `None` for special badges.
    pub fn value(&self, metric: BadgeMetric) -> Option<f64> {
        match metric {
            BadgeMetric::Entries => Some(self.entries),
            BadgeMetric::Points => Some(self.points),
            BadgeMetric::Streak => Some(f64::from(self.streak)),
            BadgeMetric::Special => None,
        }
    }
}

/// Per-user streak record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    /// Never below `current_streak`.
    pub longest_streak: u32,
    pub last_log_date: Option<DateTime<Utc>>,
    pub active: bool,
}

/// Challenge period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengePeriod {
    Daily,
    Weekly,
    Monthly,
}

impl ChallengePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengePeriod::Daily => "daily",
            ChallengePeriod::Weekly => "weekly",
            ChallengePeriod::Monthly => "monthly",
        }
    }

    pub fn all() -> [ChallengePeriod; 3] {
        [
            ChallengePeriod::Daily,
            ChallengePeriod::Weekly,
            ChallengePeriod::Monthly,
        ]
    }
}

impl std::fmt::Display for ChallengePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counter a challenge tracks, fixed when the challenge is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeMetric {
    Entries,
    Points,
}

impl ChallengeMetric {
    pub fn value(&self, entries: f64, points: f64) -> f64 {
        match self {
            ChallengeMetric::Entries => entries,
            ChallengeMetric::Points => points,
        }
    }
}

/// Lifecycle position of a challenge at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeStatus {
    Pending,
    InProgress,
    Completed,
    /// Implied by the clock, never stored.
    Expired,
}

/// A time-boxed goal for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub period: ChallengePeriod,
    pub metric: ChallengeMetric,
    pub goal: f64,
    pub progress: f64,
    /// Points granted on completion.
    pub reward: u32,
    pub icon: String,
    pub color: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Challenge {
    /// Expired means incomplete and past its end. Completed challenges never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.completed && now > self.end_at
    }

    pub fn status(&self, now: DateTime<Utc>) -> ChallengeStatus {
        if self.completed {
            ChallengeStatus::Completed
        } else if now > self.end_at {
            ChallengeStatus::Expired
        } else if self.progress > 0.0 {
            ChallengeStatus::InProgress
        } else {
            ChallengeStatus::Pending
        }
    }

    /// Fraction of the goal reached, clamped to 0..=1.
    pub fn completion_ratio(&self) -> f64 {
        if self.goal <= 0.0 {
            return 1.0;
        }
        (self.progress / self.goal).clamp(0.0, 1.0)
    }
}

/// Journal entry shown in the user's achievement feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub timestamp: DateTime<Utc>,
    pub icon: String,
    pub color: String,
}

/// Identity of the user whose state an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserContext {
    pub user_id: uuid::Uuid,
}

impl UserContext {
    pub fn new(user_id: uuid::Uuid) -> Self {
        Self { user_id }
    }
}
