//! Weekly → monthly rollup, win ranking and achievement narratives.
//!
//! # Invariants
//! - Weeks are ordered by `start_date` before anything is derived.
//! - `top_wins` ranks by the number of weeks a win appears in; ties keep
//!   first-seen order.
//! - An empty batch is a usage error.

use crate::config::ReviewConfig;
use crate::error::{ReviewError, ReviewResult};
use crate::model::review::{MonthlyReview, WeeklyReview};
use crate::service::weekly::dedupe_capped;
use crate::stats::completion_rate;
use chrono::Datelike;
use std::collections::{HashMap, HashSet};

pub(crate) fn build_monthly_review(
    mut weeks: Vec<WeeklyReview>,
    config: &ReviewConfig,
) -> ReviewResult<MonthlyReview> {
    weeks.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then(a.end_date.cmp(&b.end_date))
            .then(a.week_number.cmp(&b.week_number))
    });
    let Some(first) = weeks.first() else {
        return Err(ReviewError::Usage(
            "cannot aggregate an empty list of weekly reviews",
        ));
    };
    let month = first.start_date.month();
    let year = first.start_date.year();

    let total_tasks: u32 = weeks.iter().map(|week| week.total_tasks).sum();
    let completed_tasks: u32 = weeks.iter().map(|week| week.completed_tasks).sum();
    let rate = completion_rate(completed_tasks, total_tasks);

    let top_wins = rank_wins_by_frequency(&weeks, config.monthly_top_wins);
    let patterns = dedupe_capped(
        weeks.iter().flat_map(|week| week.patterns.iter()),
        usize::MAX,
    );
    let achievements = build_achievements(&weeks, completed_tasks, total_tasks, rate, config);

    Ok(MonthlyReview {
        month,
        year,
        weekly_reviews: weeks,
        total_tasks,
        completed_tasks,
        completion_rate: rate,
        top_wins,
        patterns,
        achievements,
    })
}

/// Ranks wins by how many weeks list them, most frequent first.
pub fn rank_wins_by_frequency(weeks: &[WeeklyReview], cap: usize) -> Vec<String> {
    let mut ranked: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for week in weeks {
        let mut seen_this_week = HashSet::new();
        for win in &week.top_wins {
            let win = win.trim();
            if win.is_empty() || !seen_this_week.insert(win) {
                continue;
            }
            match index.get(win) {
                Some(&slot) => ranked[slot].1 += 1,
                None => {
                    index.insert(win, ranked.len());
                    ranked.push((win, 1));
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(cap)
        .map(|(win, _)| win.to_string())
        .collect()
}

fn build_achievements(
    weeks: &[WeeklyReview],
    completed_tasks: u32,
    total_tasks: u32,
    rate: u32,
    config: &ReviewConfig,
) -> Vec<String> {
    let week_word = if weeks.len() == 1 { "week" } else { "weeks" };
    let mut achievements = vec![
        format!(
            "Completed {completed_tasks} of {total_tasks} tasks across {} {week_word}",
            weeks.len()
        ),
        format!("Achieved a {rate}% task completion rate"),
    ];

    if rate >= config.high_performance_rate {
        achievements.push(format!(
            "High performance month: sustained {rate}% completion rate"
        ));
    }

    if weeks.len() >= 2 {
        let strongest = weeks.iter().fold(None::<&WeeklyReview>, |best, week| match best {
            Some(current) if current.completion_rate >= week.completion_rate => Some(current),
            _ => Some(week),
        });
        if let Some(week) = strongest {
            achievements.push(format!(
                "Strongest week: Week {} at {}% completion",
                week.week_number, week.completion_rate
            ));
        }
    }

    achievements
}

#[cfg(test)]
mod tests {
    use super::rank_wins_by_frequency;
    use crate::model::review::WeeklyReview;
    use chrono::NaiveDate;

    fn week_with_wins(day: u32, wins: &[&str]) -> WeeklyReview {
        let start = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        WeeklyReview {
            week_number: 1,
            start_date: start,
            end_date: start,
            daily_logs: Vec::new(),
            total_tasks: 0,
            completed_tasks: 0,
            completion_rate: 0,
            top_wins: wins.iter().map(|win| win.to_string()).collect(),
            patterns: Vec::new(),
            goals: Vec::new(),
        }
    }

    #[test]
    fn ranks_by_week_count_then_first_seen() {
        let weeks = vec![
            week_with_wins(6, &["alpha", "beta"]),
            week_with_wins(13, &["gamma", "beta"]),
            week_with_wins(20, &["gamma", "beta", "delta"]),
        ];
        assert_eq!(
            rank_wins_by_frequency(&weeks, 15),
            vec!["beta", "gamma", "alpha", "delta"]
        );
        assert_eq!(rank_wins_by_frequency(&weeks, 2), vec!["beta", "gamma"]);
    }

    #[test]
    fn repeats_within_one_week_count_once() {
        let weeks = vec![
            week_with_wins(6, &["alpha", "alpha"]),
            week_with_wins(13, &["beta"]),
            week_with_wins(20, &["beta"]),
        ];
        assert_eq!(rank_wins_by_frequency(&weeks, 15), vec!["beta", "alpha"]);
    }
}
