//! Badge evaluation and awarding.
//!
//! Evaluation is a pure comparison of cumulative metrics against the
//! catalog. Persisting the resulting state is left to the caller.

use chrono::{DateTime, Utc};

use super::catalog::BadgeCatalog;
use super::error::ProgressError;
use super::types::{BadgeDefinition, BadgeState, BadgeStatus, Metrics};

/// Badge evaluator.
#[derive(Debug, Clone, Default)]
pub struct BadgeEvaluator {
    catalog: BadgeCatalog,
}

impl BadgeEvaluator {
    /// Create an evaluator over the given catalog.
    pub fn new(catalog: BadgeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    /// Add an unearned record for every catalog badge missing from `state`.
    ///
    /// Returns true if anything was added.
    pub fn initialize(&self, state: &mut BadgeState) -> bool {
        let mut changed = false;
        for badge in self.catalog.iter() {
            changed |= state.ensure(&badge.id);
        }
        changed
    }

    /// Award every unearned badge whose metric has reached its requirement.
    ///
    /// All badges earned in one pass share `now` as their earned time.
    /// Special badges are never awarded here.
    pub fn evaluate(
        &self,
        state: &mut BadgeState,
        metrics: &Metrics,
        now: DateTime<Utc>,
    ) -> Vec<BadgeDefinition> {
        let mut newly_earned = Vec::new();

        for badge in self.catalog.iter() {
            if state.is_earned(&badge.id) {
                continue;
            }

            let meets_requirement = metrics
                .value(badge.metric)
                .is_some_and(|value| value >= badge.requirement);

            if meets_requirement && state.mark_earned(&badge.id, now) {
                tracing::info!("Badge earned: {} ({})", badge.name, badge.id);
                newly_earned.push(badge.clone());
            }
        }

        newly_earned
    }

    /// Award a badge out of band.
    ///
    /// Returns `Ok(true)` if this call earned it and `Ok(false)` if it was
    /// already earned.
    pub fn award(
        &self,
        state: &mut BadgeState,
        badge_id: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ProgressError> {
        let badge = self
            .catalog
            .get(badge_id)
            .ok_or_else(|| ProgressError::UnknownBadge(badge_id.to_string()))?;

        let earned_now = state.mark_earned(&badge.id, now);
        if earned_now {
            tracing::info!("Badge awarded: {} ({})", badge.name, badge.id);
        }
        Ok(earned_now)
    }

    /// Every catalog badge joined with its earned state, in catalog order.
    pub fn statuses(&self, state: &BadgeState) -> Vec<BadgeStatus> {
        self.catalog
            .iter()
            .map(|badge| {
                let record = state.get(&badge.id);
                BadgeStatus {
                    badge: badge.clone(),
                    earned: record.is_some_and(|r| r.earned),
                    earned_at: record.and_then(|r| r.earned_at),
                }
            })
            .collect()
    }
}
