//! Time-boxed challenge management.
//!
//! Handles challenge generation at period boundaries, progress tracking
//! and completion. Expiry is derived from the clock and never stored.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

use super::catalog::{default_challenge_templates, ChallengeTemplate};
use super::types::{Challenge, ChallengePeriod};

/// Challenge manager.
#[derive(Debug, Clone)]
pub struct ChallengeManager {
    offset: FixedOffset,
    periods: Vec<ChallengePeriod>,
    templates: Vec<ChallengeTemplate>,
}

impl Default for ChallengeManager {
    fn default() -> Self {
        Self::new(Utc.fix(), ChallengePeriod::all().to_vec())
    }
}

impl ChallengeManager {
    /// Create a manager generating the default templates for `periods`.
    pub fn new(offset: FixedOffset, periods: Vec<ChallengePeriod>) -> Self {
        Self::with_templates(offset, periods, default_challenge_templates())
    }

    /// Create a manager with custom templates.
    pub fn with_templates(
        offset: FixedOffset,
        mut periods: Vec<ChallengePeriod>,
        templates: Vec<ChallengeTemplate>,
    ) -> Self {
        periods.sort();
        periods.dedup();
        Self {
            offset,
            periods,
            templates,
        }
    }

    pub fn periods(&self) -> &[ChallengePeriod] {
        &self.periods
    }

    /// Start and end of the period containing `now`.
    ///
    /// Days start at local midnight, weeks on Monday and months on the 1st.
    /// `None` only for dates at the edge of the representable range.
    pub fn period_bounds(
        &self,
        period: ChallengePeriod,
        now: DateTime<Utc>,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.with_timezone(&self.offset).date_naive();

        let (start, end) = match period {
            ChallengePeriod::Daily => (today, today.succ_opt()?),
            ChallengePeriod::Weekly => {
                let monday =
                    today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
                (monday, monday + Duration::days(7))
            }
            ChallengePeriod::Monthly => {
                let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
                let next = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
                };
                (first, next)
            }
        };

        Some((self.local_midnight(start), self.local_midnight(end)))
    }

    fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let local = date.and_time(NaiveTime::MIN);
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc, Utc)
    }

    /// Instantiate this period's templates that are not present yet.
    ///
    /// Returns the number of challenges created. Calling this again within
    /// the same period creates nothing.
    pub fn generate(&self, challenges: &mut Vec<Challenge>, now: DateTime<Utc>) -> usize {
        let mut created = 0;

        for &period in &self.periods {
            let Some((start_at, end_at)) = self.period_bounds(period, now) else {
                tracing::warn!("Cannot compute {} period for {}", period, now);
                continue;
            };

            for template in self.templates.iter().filter(|t| t.period == period) {
                let id = challenge_id(template, start_at);
                let exists = challenges
                    .iter()
                    .any(|c| c.id == id && !c.is_expired(now));
                if exists {
                    continue;
                }

                challenges.push(Challenge {
                    id,
                    name: template.name.to_string(),
                    description: template.description.to_string(),
                    period,
                    metric: template.metric,
                    goal: template.goal,
                    progress: 0.0,
                    reward: template.reward,
                    icon: template.icon.to_string(),
                    color: template.color.to_string(),
                    start_at,
                    end_at,
                    completed: false,
                    completed_at: None,
                });
                created += 1;
            }
        }

        if created > 0 {
            tracing::info!("Generated {} challenges at {}", created, now);
        }
        created
    }

    /// Recompute progress of every open challenge from cumulative totals.
    ///
    /// Progress never decreases. Challenges reaching their goal are marked
    /// completed, frozen, and returned.
    pub fn update_progress(
        &self,
        challenges: &mut [Challenge],
        entries: f64,
        points: f64,
        now: DateTime<Utc>,
    ) -> Vec<Challenge> {
        let mut completed_now = Vec::new();

        for challenge in challenges
            .iter_mut()
            .filter(|c| !c.completed && !c.is_expired(now))
        {
            let value = challenge.metric.value(entries, points);
            if value > challenge.progress {
                challenge.progress = value;
            }

            if challenge.progress >= challenge.goal {
                challenge.completed = true;
                challenge.completed_at = Some(now);
                tracing::info!("Challenge completed: {} ({})", challenge.name, challenge.id);
                completed_now.push(challenge.clone());
            }
        }

        completed_now
    }

    /// Challenges a user can see at `now`: completed ones and unexpired ones.
    pub fn visible(&self, challenges: &[Challenge], now: DateTime<Utc>) -> Vec<Challenge> {
        challenges
            .iter()
            .filter(|c| !c.is_expired(now))
            .cloned()
            .collect()
    }

    /// Drop expired challenges and completed ones older than `retention`.
    ///
    /// Returns the number removed.
    pub fn prune(
        &self,
        challenges: &mut Vec<Challenge>,
        now: DateTime<Utc>,
        retention: Duration,
    ) -> usize {
        let before = challenges.len();
        challenges.retain(|c| {
            if c.completed {
                c.end_at
                    .checked_add_signed(retention)
                    .map_or(true, |keep_until| keep_until >= now)
            } else {
                !c.is_expired(now)
            }
        });
        before - challenges.len()
    }
}

fn challenge_id(template: &ChallengeTemplate, start_at: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}",
        template.period,
        start_at.format("%Y%m%dT%H%M"),
        template.key
    )
}
