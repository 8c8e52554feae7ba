//! Daily → weekly rollup and weekly pattern detection.
//!
//! # Responsibility
//! - Sum task counts and derive the weekly completion rate.
//! - Collect first-seen wins up to the weekly cap.
//! - Tag productivity and workload patterns.
//!
//! # Invariants
//! - Output is identical for every permutation of the same input logs.
//! - An empty batch is a usage error, never a zero-value review.

use crate::config::ReviewConfig;
use crate::error::{ReviewError, ReviewResult};
use crate::model::review::{DailyLog, WeeklyReview};
use crate::stats::{coefficient_of_variation, completion_rate};
use chrono::Datelike;
use std::collections::HashSet;

pub const CONSISTENT_WORKLOAD_PATTERN: &str = "Consistent task workload";
pub const VARIABLE_WORKLOAD_PATTERN: &str = "Variable task workload";

pub(crate) fn build_weekly_review(
    mut logs: Vec<DailyLog>,
    config: &ReviewConfig,
) -> ReviewResult<WeeklyReview> {
    logs.sort();
    let (Some(first), Some(last)) = (logs.first(), logs.last()) else {
        return Err(ReviewError::Usage(
            "cannot aggregate an empty list of daily logs",
        ));
    };
    let start_date = first.date;
    let end_date = last.date;

    let daily_totals: Vec<u32> = logs.iter().map(DailyLog::total_tasks).collect();
    let total_tasks: u32 = daily_totals.iter().sum();
    let completed_tasks: u32 = logs.iter().map(DailyLog::completed_tasks).sum();
    let rate = completion_rate(completed_tasks, total_tasks);

    let top_wins = dedupe_capped(
        logs.iter().flat_map(|log| log.wins.iter()),
        config.weekly_top_wins,
    );
    let goals = logs
        .iter()
        .flat_map(|log| log.goals.iter().cloned())
        .collect();
    let patterns = detect_weekly_patterns(rate, &daily_totals, config);

    Ok(WeeklyReview {
        week_number: start_date.iso_week().week(),
        start_date,
        end_date,
        daily_logs: logs,
        total_tasks,
        completed_tasks,
        completion_rate: rate,
        top_wins,
        patterns,
        goals,
    })
}

/// Returns the pattern tags for one week. Tags are independent and may
/// co-occur.
pub fn detect_weekly_patterns(
    completion_rate: u32,
    daily_totals: &[u32],
    config: &ReviewConfig,
) -> Vec<String> {
    let mut patterns = Vec::new();

    if completion_rate > config.high_productivity_rate {
        patterns.push(format!(
            "High productivity week (>{}% completion rate)",
            config.high_productivity_rate
        ));
    }
    if completion_rate < config.low_productivity_rate {
        patterns.push(format!(
            "Low productivity week (<{}% completion rate)",
            config.low_productivity_rate
        ));
    }

    if let Some(variation) = coefficient_of_variation(daily_totals) {
        let tag = if variation < config.workload_variation_threshold {
            CONSISTENT_WORKLOAD_PATTERN
        } else {
            VARIABLE_WORKLOAD_PATTERN
        };
        patterns.push(tag.to_string());
    }

    patterns
}

/// Keeps the first occurrence of each trimmed, non-empty item, stopping at
/// `cap`.
pub(crate) fn dedupe_capped<'a>(items: impl Iterator<Item = &'a String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if out.len() >= cap {
            break;
        }
        let item = item.trim();
        if !item.is_empty() && seen.insert(item) {
            out.push(item.to_string());
        }
    }
    out
}
