//! Rendered weekly review loading.
//!
//! # Responsibility
//! - Rebuild `WeeklyReview` records from `YYYY-Www.md` files so monthly
//!   rollups can run from persisted weekly documents.
//!
//! # Invariants
//! - Scalars come from front matter; lists come from the canonical headings.
//! - Placeholder list items are dropped.
//! - Re-read reviews carry no daily logs.

use crate::error::{ReviewError, ReviewResult};
use crate::model::document::{FrontMatter, Section};
use crate::model::review::WeeklyReview;
use crate::parser::document::{find_section, parse_document};
use crate::parser::structure::extract_list_items;
use crate::service::render::{
    NEXT_WEEK_GOALS_HEADING, NO_GOALS_PLACEHOLDER, NO_PATTERNS_PLACEHOLDER,
    NO_WINS_PLACEHOLDER, PATTERNS_OBSERVED_HEADING, TOP_WINS_HEADING,
};
use crate::stats::completion_rate;
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;

static WEEKLY_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-W\d{2}\.md$").expect("valid weekly file regex"));

const PLACEHOLDERS: &[&str] = &[
    NO_WINS_PLACEHOLDER,
    NO_PATTERNS_PLACEHOLDER,
    NO_GOALS_PLACEHOLDER,
];

/// Reads one rendered weekly review file.
pub fn parse_weekly_review(path: &Path) -> ReviewResult<WeeklyReview> {
    let content = std::fs::read_to_string(path).map_err(|err| ReviewError::io(path, err))?;
    parse_weekly_review_content(&content, path)
}

/// Rebuilds a weekly review from rendered markdown. `path` is used for
/// error context only.
pub fn parse_weekly_review_content(content: &str, path: &Path) -> ReviewResult<WeeklyReview> {
    let document = parse_document(content);
    let front_matter = &document.front_matter;
    let invalid = |reason: &str| ReviewError::InvalidReview {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let start_date = date_field(front_matter, "start_date")
        .ok_or_else(|| invalid("missing or invalid `start_date`"))?;
    let end_date = date_field(front_matter, "end_date")
        .ok_or_else(|| invalid("missing or invalid `end_date`"))?;
    let total_tasks = count_field(front_matter, "total_tasks")
        .ok_or_else(|| invalid("missing or invalid `total_tasks`"))?;
    let completed_tasks = count_field(front_matter, "completed_tasks")
        .ok_or_else(|| invalid("missing or invalid `completed_tasks`"))?;
    if completed_tasks > total_tasks {
        return Err(invalid("`completed_tasks` exceeds `total_tasks`"));
    }

    let week_number = count_field(front_matter, "week")
        .unwrap_or_else(|| start_date.iso_week().week());
    let rate = count_field(front_matter, "completion_rate")
        .unwrap_or_else(|| completion_rate(completed_tasks, total_tasks));

    Ok(WeeklyReview {
        week_number,
        start_date,
        end_date,
        daily_logs: Vec::new(),
        total_tasks,
        completed_tasks,
        completion_rate: rate,
        top_wins: section_items(&document.sections, TOP_WINS_HEADING),
        patterns: section_items(&document.sections, PATTERNS_OBSERVED_HEADING),
        goals: section_items(&document.sections, NEXT_WEEK_GOALS_HEADING),
    })
}

/// Reads every `YYYY-Www.md` file directly inside `dir`, sorted by start
/// date. Invalid review documents are logged and skipped; a missing
/// directory yields an empty list.
pub fn read_weekly_reviews(dir: &Path) -> ReviewResult<Vec<WeeklyReview>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(ReviewError::io(dir, err)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| ReviewError::io(dir, err))?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| WEEKLY_FILE_RE.is_match(name));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut reviews = Vec::with_capacity(paths.len());
    for path in &paths {
        match parse_weekly_review(path) {
            Ok(review) => reviews.push(review),
            Err(err @ ReviewError::InvalidReview { .. }) => {
                warn!(
                    "event=weekly_review_skipped module=repo status=degraded error={}",
                    err
                );
            }
            Err(err) => return Err(err),
        }
    }
    reviews.sort_by_key(|review| (review.start_date, review.end_date));
    debug!(
        "event=weekly_reviews_read module=repo status=ok dir={} count={}",
        dir.display(),
        reviews.len()
    );
    Ok(reviews)
}

/// Keeps weekly reviews whose start date falls in `year`-`month`.
pub fn weeks_starting_in(weeks: Vec<WeeklyReview>, year: i32, month: u32) -> Vec<WeeklyReview> {
    weeks
        .into_iter()
        .filter(|week| week.start_date.year() == year && week.start_date.month() == month)
        .collect()
}

fn date_field(front_matter: &FrontMatter, key: &str) -> Option<NaiveDate> {
    front_matter.get(key).and_then(|value| value.as_date())
}

fn count_field(front_matter: &FrontMatter, key: &str) -> Option<u32> {
    front_matter
        .get(key)
        .and_then(|value| value.as_i64())
        .and_then(|value| u32::try_from(value).ok())
}

fn section_items(sections: &[Section], heading: &str) -> Vec<String> {
    find_section(sections, heading)
        .map(|section| {
            extract_list_items(&section.content)
                .into_iter()
                .filter(|item| !PLACEHOLDERS.contains(&item.as_str()))
                .collect()
        })
        .unwrap_or_default()
}
