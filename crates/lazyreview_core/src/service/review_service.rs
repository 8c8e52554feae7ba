//! Review aggregation use-case service.
//!
//! # Responsibility
//! - Own the `ReviewConfig` that tunes both rollup levels.
//! - Expose the daily→weekly and weekly→monthly aggregations.
//!
//! # Invariants
//! - Aggregations are pure over their input batch; the service holds no
//!   state besides its config.
//! - Empty batches fail with `ReviewError::Usage`.

use crate::config::ReviewConfig;
use crate::error::ReviewResult;
use crate::model::review::{DailyLog, MonthlyReview, WeeklyReview};
use crate::service::monthly::build_monthly_review;
use crate::service::weekly::build_weekly_review;
use log::debug;

/// Aggregation facade over a fixed config.
#[derive(Debug, Clone, Default)]
pub struct ReviewService {
    config: ReviewConfig,
}

impl ReviewService {
    /// Creates a service using the provided config.
    pub fn new(config: ReviewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Rolls daily logs up into one weekly review.
    pub fn aggregate_daily_to_weekly(&self, logs: Vec<DailyLog>) -> ReviewResult<WeeklyReview> {
        let review = build_weekly_review(logs, &self.config)?;
        debug!(
            "event=weekly_aggregated module=service status=ok week={} days={} rate={}",
            review.week_number,
            review.days_logged(),
            review.completion_rate
        );
        Ok(review)
    }

    /// Rolls weekly reviews up into one monthly review.
    pub fn aggregate_weekly_to_monthly(
        &self,
        weeks: Vec<WeeklyReview>,
    ) -> ReviewResult<MonthlyReview> {
        let review = build_monthly_review(weeks, &self.config)?;
        debug!(
            "event=monthly_aggregated module=service status=ok month={}-{:02} weeks={} rate={}",
            review.year,
            review.month,
            review.weekly_reviews.len(),
            review.completion_rate
        );
        Ok(review)
    }
}

/// Weekly rollup with default config.
pub fn aggregate_daily_to_weekly(logs: Vec<DailyLog>) -> ReviewResult<WeeklyReview> {
    ReviewService::default().aggregate_daily_to_weekly(logs)
}

/// Monthly rollup with default config.
pub fn aggregate_weekly_to_monthly(weeks: Vec<WeeklyReview>) -> ReviewResult<MonthlyReview> {
    ReviewService::default().aggregate_weekly_to_monthly(weeks)
}
