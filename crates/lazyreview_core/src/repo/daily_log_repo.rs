//! Daily log loading from a flat `YYYY-MM-DD.md` directory.
//!
//! # Responsibility
//! - Read one markdown file per day and normalize it into a `DailyLog`.
//! - List a directory of daily files in ascending date order.
//!
//! # Invariants
//! - Unstructured or malformed content degrades to empty derived fields;
//!   only an unreadable file is an error.
//! - A missing or empty directory lists as zero logs.
//! - Date precedence: front matter `date` → file name → `DateFallback`.

use crate::config::{HeadingKeywords, ReviewConfig};
use crate::error::{ReviewError, ReviewResult};
use crate::model::document::ParsedDocument;
use crate::model::review::DailyLog;
use crate::parser::document::{get_all_tasks, list_items_under, parse_document};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

static DAILY_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})\.md$").expect("valid daily file regex"));

/// What to do when neither front matter nor file name yields a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFallback {
    /// Use the local current date. Wrong for historical backfills.
    #[default]
    Today,
    /// Use a caller-chosen date.
    Fixed(NaiveDate),
    /// Fail with `ReviewError::UnresolvedDate`.
    Reject,
}

/// Reader that turns daily markdown files into `DailyLog` records.
#[derive(Debug, Clone, Default)]
pub struct DailyLogReader {
    headings: HeadingKeywords,
    date_fallback: DateFallback,
}

impl DailyLogReader {
    /// Creates a reader using the heading keywords from `config`.
    pub fn new(config: &ReviewConfig) -> Self {
        Self {
            headings: config.headings.clone(),
            date_fallback: DateFallback::default(),
        }
    }

    /// Replaces the date fallback policy.
    pub fn with_date_fallback(mut self, date_fallback: DateFallback) -> Self {
        self.date_fallback = date_fallback;
        self
    }

    /// Reads and parses one daily file. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn parse_daily_log(&self, path: &Path) -> ReviewResult<DailyLog> {
        let bytes = std::fs::read(path).map_err(|err| ReviewError::io(path, err))?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!(
                "event=daily_log_lossy_decode module=repo status=degraded path={}",
                path.display()
            );
        }
        self.parse_daily_log_content(&content, path)
    }

    /// Parses daily-log markdown already in memory. `path` is only used for
    /// file-name date resolution and error context.
    pub fn parse_daily_log_content(&self, content: &str, path: &Path) -> ReviewResult<DailyLog> {
        let document = parse_document(content);
        let date = self.resolve_date(&document, path)?;
        let log = self.build_log(document, date);
        debug!(
            "event=daily_log_parsed module=repo status=ok date={} tasks={} wins={}",
            log.date,
            log.tasks.len(),
            log.wins.len()
        );
        Ok(log)
    }

    /// Lists and parses every `YYYY-MM-DD.md` file directly inside `dir`,
    /// sorted ascending by date.
    pub fn read_daily_logs(&self, dir: &Path) -> ReviewResult<Vec<DailyLog>> {
        let paths = list_daily_files(dir)?;
        let mut logs = paths
            .iter()
            .map(|path| self.parse_daily_log(path))
            .collect::<ReviewResult<Vec<_>>>()?;
        logs.sort();
        debug!(
            "event=daily_logs_read module=repo status=ok dir={} count={}",
            dir.display(),
            logs.len()
        );
        Ok(logs)
    }

    /// Like [`Self::read_daily_logs`], restricted to `from..=to`.
    pub fn read_daily_logs_between(
        &self,
        dir: &Path,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ReviewResult<Vec<DailyLog>> {
        let mut logs = self.read_daily_logs(dir)?;
        logs.retain(|log| log.date >= from && log.date <= to);
        Ok(logs)
    }

    fn resolve_date(&self, document: &ParsedDocument, path: &Path) -> ReviewResult<NaiveDate> {
        if let Some(date) = document
            .front_matter
            .get("date")
            .and_then(|value| value.as_date())
        {
            return Ok(date);
        }
        if let Some(date) = date_from_file_name(path) {
            return Ok(date);
        }

        match self.date_fallback {
            DateFallback::Today => {
                let today = Local::now().date_naive();
                warn!(
                    "event=daily_log_date_fallback module=repo status=degraded path={} fallback=today date={}",
                    path.display(),
                    today
                );
                Ok(today)
            }
            DateFallback::Fixed(date) => Ok(date),
            DateFallback::Reject => Err(ReviewError::UnresolvedDate(path.to_path_buf())),
        }
    }

    fn build_log(&self, document: ParsedDocument, date: NaiveDate) -> DailyLog {
        let sections = document.sections;
        let notes = sections
            .iter()
            .find(|section| {
                let heading = section.heading.to_lowercase();
                self.headings
                    .notes
                    .iter()
                    .any(|keyword| heading.contains(&keyword.to_lowercase()))
            })
            .map(|section| section.content.trim().to_string())
            .unwrap_or_default();

        DailyLog {
            date,
            wins: list_items_under(&sections, &self.headings.wins),
            tasks: get_all_tasks(&sections),
            notes,
            goals: list_items_under(&sections, &self.headings.goals),
            sections,
        }
    }
}

/// Parses one daily file with default heading keywords and the `Today`
/// date fallback.
pub fn parse_daily_log(path: &Path) -> ReviewResult<DailyLog> {
    DailyLogReader::default().parse_daily_log(path)
}

/// Reads a daily directory with default heading keywords.
pub fn read_daily_logs(dir: &Path) -> ReviewResult<Vec<DailyLog>> {
    DailyLogReader::default().read_daily_logs(dir)
}

/// Extracts the date from a `YYYY-MM-DD.md` file name.
pub fn date_from_file_name(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let caps = DAILY_FILE_RE.captures(name)?;
    NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()
}

fn list_daily_files(dir: &Path) -> ReviewResult<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(
                "event=daily_dir_missing module=repo status=ok dir={}",
                dir.display()
            );
            return Ok(Vec::new());
        }
        Err(err) => return Err(ReviewError::io(dir, err)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ReviewError::io(dir, err))?;
        let path = entry.path();
        if path.is_file() && date_from_file_name(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
