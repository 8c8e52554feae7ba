//! Core engine for LazyReview.
//! Parses journal-style daily markdown and rolls it up into weekly and
//! monthly reviews.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod repo;
pub mod service;
pub mod stats;

pub use config::{HeadingKeywords, ReviewConfig};
pub use error::{ReviewError, ReviewResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::document::{
    FrontMatter, FrontMatterValue, ParsedDocument, Priority, Section, Table, Task,
};
pub use model::review::{DailyLog, MonthlyReview, WeeklyReview};
pub use parser::document::{
    find_section, find_sections_containing, get_all_tasks, get_completion_rate, parse_document,
};
pub use parser::front_matter::split_front_matter;
pub use parser::structure::{extract_tables, extract_tasks, parse_sections};
pub use repo::daily_log_repo::{parse_daily_log, read_daily_logs, DailyLogReader, DateFallback};
pub use repo::review_repo::{parse_weekly_review, read_weekly_reviews, weeks_starting_in};
pub use service::render::{
    generate_monthly_review_markdown, generate_weekly_review_markdown, monthly_review_file_name,
    weekly_review_file_name,
};
pub use service::review_service::{
    aggregate_daily_to_weekly, aggregate_weekly_to_monthly, ReviewService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
