//! Gamification progress engine.
//!
//! Derives streaks, badges and challenge completion from a stream of
//! waste-logging events.

pub mod achievements;
pub mod badges;
pub mod catalog;
pub mod celebration;
pub mod challenges;
pub mod engine;
pub mod error;
pub mod streak;
pub mod types;

// Re-export commonly used types
pub use badges::BadgeEvaluator;
pub use catalog::{BadgeCatalog, ChallengeTemplate};
pub use celebration::{Celebration, CelebrationKind};
pub use challenges::ChallengeManager;
pub use engine::{ProgressEngine, ProgressOutcome, ProgressSnapshot};
pub use error::ProgressError;
pub use streak::{StreakTracker, StreakUpdate};
pub use types::*;
