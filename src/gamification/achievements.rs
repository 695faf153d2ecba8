//! Achievement journal.
//!
//! A newest-first feed of badges earned and challenges completed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::types::{Achievement, BadgeDefinition, Challenge};

impl Achievement {
    /// Journal entry for a newly earned badge.
    pub fn from_badge(badge: &BadgeDefinition, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: format!("Badge unlocked: {}", badge.name),
            description: badge.description.clone(),
            points: 0,
            timestamp: at,
            icon: badge.icon.clone(),
            color: badge.color.clone(),
        }
    }

    /// Journal entry for a completed challenge, worth its reward.
    pub fn from_challenge(challenge: &Challenge, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: format!("Challenge complete: {}", challenge.name),
            description: challenge.description.clone(),
            points: challenge.reward,
            timestamp: at,
            icon: challenge.icon.clone(),
            color: challenge.color.clone(),
        }
    }
}

/// Prepend `entries` to `log` (newest first) and cap it at `limit`.
///
/// Returns the number of entries dropped by the cap.
pub fn record(log: &mut Vec<Achievement>, entries: Vec<Achievement>, limit: usize) -> usize {
    let mut merged = entries;
    merged.reverse();
    merged.append(log);
    let dropped = merged.len().saturating_sub(limit);
    merged.truncate(limit);
    *log = merged;
    dropped
}
