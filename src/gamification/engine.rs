//! Progress engine: the single entry point for logged waste events.
//!
//! Sequences the streak tracker, badge evaluator and challenge manager
//! for one user and persists each one's state independently. There is no
//! transaction across the three; a failure in a later step leaves the
//! earlier steps' writes in place.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::achievements;
use super::badges::BadgeEvaluator;
use super::catalog::BadgeCatalog;
use super::challenges::ChallengeManager;
use super::error::ProgressError;
use super::streak::StreakTracker;
use super::types::{
    Achievement, BadgeDefinition, BadgeStatus, Challenge, Metrics, StreakState, UserContext,
};
use crate::storage::{EngineConfig, KeyValueStore, StateRepository};

/// Aggregate result of one logged waste entry.
#[derive(Debug, Clone, Default)]
pub struct ProgressOutcome {
    pub new_badges: Vec<BadgeDefinition>,
    pub completed_challenges: Vec<Challenge>,
    pub streak_increased: bool,
    /// Streak after this event.
    pub streak: StreakState,
}

impl ProgressOutcome {
    /// Whether anything worth celebrating happened.
    pub fn has_news(&self) -> bool {
        self.streak_increased
            || !self.new_badges.is_empty()
            || !self.completed_challenges.is_empty()
    }

    /// Reward points granted by the challenges completed in this event.
    pub fn challenge_reward(&self) -> u64 {
        self.completed_challenges
            .iter()
            .map(|c| u64::from(c.reward))
            .sum()
    }
}

/// Everything the UI shows for a user at one instant.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub badges: Vec<BadgeStatus>,
    pub streak: StreakState,
    pub challenges: Vec<Challenge>,
    pub achievements: Vec<Achievement>,
}

/// Progress engine.
pub struct ProgressEngine {
    repo: StateRepository,
    streaks: StreakTracker,
    badges: BadgeEvaluator,
    challenges: ChallengeManager,
    achievement_limit: usize,
    completed_retention: Duration,
}

impl ProgressEngine {
    /// Create an engine over `store` with the built-in catalog.
    pub fn new(store: Arc<dyn KeyValueStore>, config: &EngineConfig) -> Self {
        Self::with_catalog(store, config, BadgeCatalog::builtin())
    }

    /// Create an engine with a custom badge catalog.
    pub fn with_catalog(
        store: Arc<dyn KeyValueStore>,
        config: &EngineConfig,
        catalog: BadgeCatalog,
    ) -> Self {
        let offset = config.day_offset();
        Self {
            repo: StateRepository::new(store),
            streaks: StreakTracker::new(offset),
            badges: BadgeEvaluator::new(catalog),
            challenges: ChallengeManager::new(offset, config.challenges.periods.clone()),
            achievement_limit: config.achievements.log_limit,
            completed_retention: config.completed_retention(),
        }
    }

    pub fn repository(&self) -> &StateRepository {
        &self.repo
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        self.badges.catalog()
    }

    /// Prepare a user's state at login: seed badge records and generate
    /// this period's challenges.
    ///
    /// Returns the number of challenges created.
    pub async fn start_session(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
    ) -> Result<usize, ProgressError> {
        validate_time(now)?;

        let mut badges = self.repo.load_badges(user).await?;
        if self.badges.initialize(&mut badges) {
            self.repo.save_badges(user, &badges).await?;
        }

        self.generate_challenges(user, now).await
    }

    /// Generate challenges for the periods containing `now`.
    pub async fn generate_challenges(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
    ) -> Result<usize, ProgressError> {
        validate_time(now)?;

        let mut challenges = self.repo.load_challenges(user).await?;
        let created = self.challenges.generate(&mut challenges, now);
        if created > 0 {
            self.repo.save_challenges(user, &challenges).await?;
        }
        Ok(created)
    }

    /// Handle a successfully logged waste entry.
    ///
    /// `total_entries` and `total_points` are the user's cumulative counters
    /// including this entry. Inputs are validated before any state changes.
    pub async fn on_waste_logged(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
        total_entries: f64,
        total_points: f64,
    ) -> Result<ProgressOutcome, ProgressError> {
        validate_counter("total_entries", total_entries)?;
        validate_counter("total_points", total_points)?;
        validate_time(now)?;

        tracing::debug!(
            "Waste logged for {}: entries={} points={}",
            user.user_id,
            total_entries,
            total_points
        );

        // 1. Streak. Badges below read the advanced value.
        let streak = self.repo.load_streak(user).await?;
        let update = self.streaks.advance(&streak, now);
        self.repo.save_streak(user, &update.state).await?;

        // 2. Badges.
        let mut badge_state = self.repo.load_badges(user).await?;
        let metrics = Metrics::new(total_entries, total_points, update.state.current_streak);
        let new_badges = self.badges.evaluate(&mut badge_state, &metrics, now);
        if !new_badges.is_empty() {
            self.repo.save_badges(user, &badge_state).await?;
        }

        // 3. Challenges.
        let mut challenges = self.repo.load_challenges(user).await?;
        let completed_challenges =
            self.challenges
                .update_progress(&mut challenges, total_entries, total_points, now);
        self.repo.save_challenges(user, &challenges).await?;

        let entries: Vec<Achievement> = new_badges
            .iter()
            .map(|b| Achievement::from_badge(b, now))
            .chain(
                completed_challenges
                    .iter()
                    .map(|c| Achievement::from_challenge(c, now)),
            )
            .collect();
        self.record_achievements(user, entries).await;

        Ok(ProgressOutcome {
            new_badges,
            completed_challenges,
            streak_increased: update.increased,
            streak: update.state,
        })
    }

    /// Award a badge out of band (e.g. early adopter).
    ///
    /// Returns true if this call earned it.
    pub async fn award_badge(
        &self,
        user: &UserContext,
        badge_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ProgressError> {
        validate_time(now)?;

        let mut state = self.repo.load_badges(user).await?;
        if !self.badges.award(&mut state, badge_id, now)? {
            return Ok(false);
        }
        self.repo.save_badges(user, &state).await?;

        if let Some(badge) = self.catalog().get(badge_id) {
            self.record_achievements(user, vec![Achievement::from_badge(badge, now)])
                .await;
        }
        Ok(true)
    }

    /// Append to the journal. Failures are logged and not returned, since
    /// the badge and challenge writes they describe are already committed.
    async fn record_achievements(&self, user: &UserContext, entries: Vec<Achievement>) {
        if entries.is_empty() {
            return;
        }
        let result = async {
            let mut log = self.repo.load_achievements(user).await?;
            achievements::record(&mut log, entries, self.achievement_limit);
            self.repo.save_achievements(user, &log).await
        }
        .await;

        if let Err(e) = result {
            tracing::warn!("Achievement journal write failed for {}: {}", user.user_id, e);
        }
    }

    /// Every catalog badge with the user's earned state.
    pub async fn badges(&self, user: &UserContext) -> Result<Vec<BadgeStatus>, ProgressError> {
        let state = self.repo.load_badges(user).await?;
        Ok(self.badges.statuses(&state))
    }

    /// The user's streak as displayed at `now`.
    pub async fn streak(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
    ) -> Result<StreakState, ProgressError> {
        let state = self.repo.load_streak(user).await?;
        Ok(self.streaks.view(&state, now))
    }

    /// Completed and unexpired challenges.
    pub async fn challenges(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<Challenge>, ProgressError> {
        let challenges = self.repo.load_challenges(user).await?;
        Ok(self.challenges.visible(&challenges, now))
    }

    /// Achievement journal, newest first.
    pub async fn achievements(&self, user: &UserContext) -> Result<Vec<Achievement>, ProgressError> {
        Ok(self.repo.load_achievements(user).await?)
    }

    /// Read all display state concurrently.
    pub async fn snapshot(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
    ) -> Result<ProgressSnapshot, ProgressError> {
        let (badges, streak, challenges, achievements) = futures::try_join!(
            self.badges(user),
            self.streak(user, now),
            self.challenges(user, now),
            self.achievements(user),
        )?;

        Ok(ProgressSnapshot {
            badges,
            streak,
            challenges,
            achievements,
        })
    }

    /// Delete expired challenges and completed ones past retention.
    ///
    /// Returns the number removed.
    pub async fn prune_challenges(
        &self,
        user: &UserContext,
        now: DateTime<Utc>,
    ) -> Result<usize, ProgressError> {
        validate_time(now)?;

        let mut challenges = self.repo.load_challenges(user).await?;
        let removed = self
            .challenges
            .prune(&mut challenges, now, self.completed_retention);
        if removed > 0 {
            tracing::info!("Pruned {} challenges for {}", removed, user.user_id);
            self.repo.save_challenges(user, &challenges).await?;
        }
        Ok(removed)
    }
}

fn validate_counter(name: &str, value: f64) -> Result<(), ProgressError> {
    if !value.is_finite() || value < 0.0 {
        tracing::warn!("Rejected {} = {}", name, value);
        return Err(ProgressError::InvalidInput(format!(
            "{name} must be a finite, non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn validate_time(now: DateTime<Utc>) -> Result<(), ProgressError> {
    if now.timestamp() < 0 {
        tracing::warn!("Rejected timestamp {}", now);
        return Err(ProgressError::InvalidInput(format!(
            "timestamp {now} is before the Unix epoch"
        )));
    }
    Ok(())
}
