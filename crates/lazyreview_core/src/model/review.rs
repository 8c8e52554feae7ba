//! Daily, weekly and monthly review records.
//!
//! # Responsibility
//! - Define the normalized daily-log record produced by the reader.
//! - Define the weekly/monthly rollups produced by the aggregators.
//!
//! # Invariants
//! - `completion_rate` is `round(completed / total * 100)`, 0 when `total == 0`.
//! - `daily_logs` and `weekly_reviews` are sorted ascending by date.
//! - `top_wins` is duplicate-free and capped (10 weekly, 15 monthly by default).

use crate::model::document::{Section, Task};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's normalized journal record.
///
/// Field order matters: the derived `Ord` compares `date` first, which is
/// what batch sorting relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    /// Plain list items found under win-like headings.
    pub wins: Vec<String>,
    /// Every checkbox task in the document, in document order.
    pub tasks: Vec<Task>,
    /// Trimmed content of the notes section, empty when absent.
    pub notes: String,
    /// Plain list items found under goal-like headings.
    pub goals: Vec<String>,
    pub sections: Vec<Section>,
}

impl DailyLog {
    /// Creates an empty log for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            wins: Vec::new(),
            tasks: Vec::new(),
            notes: String::new(),
            goals: Vec::new(),
            sections: Vec::new(),
        }
    }

    pub fn total_tasks(&self) -> u32 {
        self.tasks.len() as u32
    }

    pub fn completed_tasks(&self) -> u32 {
        self.tasks.iter().filter(|task| task.completed).count() as u32
    }
}

/// Rollup of one week of daily logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReview {
    /// ISO week number of `start_date`.
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Empty when the review was re-read from its rendered markdown.
    pub daily_logs: Vec<DailyLog>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_rate: u32,
    pub top_wins: Vec<String>,
    pub patterns: Vec<String>,
    pub goals: Vec<String>,
}

impl WeeklyReview {
    /// Number of daily logs that fed this review.
    pub fn days_logged(&self) -> usize {
        self.daily_logs.len()
    }
}

/// Rollup of one month of weekly reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReview {
    /// Calendar month, 1–12.
    pub month: u32,
    pub year: i32,
    pub weekly_reviews: Vec<WeeklyReview>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_rate: u32,
    pub top_wins: Vec<String>,
    pub patterns: Vec<String>,
    pub achievements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::DailyLog;
    use crate::model::document::Task;
    use chrono::NaiveDate;

    #[test]
    fn daily_log_counts_tasks() {
        let mut log = DailyLog::new(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        log.tasks = vec![
            Task::new("a", true),
            Task::new("b", false),
            Task::new("c", true),
        ];
        assert_eq!(log.total_tasks(), 3);
        assert_eq!(log.completed_tasks(), 2);
    }

    #[test]
    fn daily_logs_order_by_date_first() {
        let early = DailyLog::new(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        let mut late = DailyLog::new(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        late.wins.push("a".to_string());
        let mut early_with_win = early.clone();
        early_with_win.wins.push("z".to_string());

        assert!(early_with_win < late);
        assert!(early < early_with_win);
    }
}
