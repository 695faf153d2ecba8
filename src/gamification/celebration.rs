//! Choosing the single message shown after a logged entry.
//!
//! When several things happen at once the badge wins, then the streak,
//! then a completed challenge.

use super::engine::ProgressOutcome;

/// What the headline is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationKind {
    Badge,
    Streak,
    Challenge,
    Points,
}

/// Headline for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    pub kind: CelebrationKind,
    pub title: String,
    pub message: String,
    pub icon: String,
    pub color: String,
}

impl Celebration {
    /// Pick the headline for `outcome`, where `points` is what the entry earned.
    pub fn select(outcome: &ProgressOutcome, points: u32) -> Self {
        if let Some(badge) = outcome.new_badges.first() {
            return Self {
                kind: CelebrationKind::Badge,
                title: "New Badge Unlocked!".to_string(),
                message: format!("You earned \"{}\"! Plus {} points!", badge.name, points),
                icon: badge.icon.clone(),
                color: badge.color.clone(),
            };
        }

        if outcome.streak_increased {
            return Self {
                kind: CelebrationKind::Streak,
                title: "Streak Extended!".to_string(),
                message: format!("Keep it going! +{} points", points),
                icon: "flame".to_string(),
                color: "#f97316".to_string(),
            };
        }

        if let Some(challenge) = outcome.completed_challenges.first() {
            let total = u64::from(points) + u64::from(challenge.reward);
            return Self {
                kind: CelebrationKind::Challenge,
                title: "Challenge Complete!".to_string(),
                message: format!("{} done! +{} points total!", challenge.name, total),
                icon: "trophy".to_string(),
                color: "#f59e0b".to_string(),
            };
        }

        Self {
            kind: CelebrationKind::Points,
            title: "Great Job!".to_string(),
            message: format!("You earned {} points!", points),
            icon: "checkmark-circle".to_string(),
            color: "#10b981".to_string(),
        }
    }
}
