//! Review engine tuning: caps, thresholds and heading keywords.
//!
//! # Responsibility
//! - Hold every tunable the readers and aggregators consult.
//! - Load overrides from a TOML file; missing keys keep their defaults.
//!
//! # Invariants
//! - `ReviewConfig::default()` reproduces the contractual thresholds
//!   (80/50 completion, 10/15 win caps).
//! - A loaded config is validated before it is returned.

use crate::error::{ReviewError, ReviewResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for readers and aggregators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    /// Cap on `WeeklyReview::top_wins`.
    pub weekly_top_wins: usize,
    /// Cap on `MonthlyReview::top_wins`.
    pub monthly_top_wins: usize,
    /// Weekly rate strictly above this earns the high-productivity tag.
    pub high_productivity_rate: u32,
    /// Weekly rate strictly below this earns the low-productivity tag.
    pub low_productivity_rate: u32,
    /// Monthly rate at or above this adds the high-performance achievement.
    pub high_performance_rate: u32,
    /// Coefficient of variation at or above which a week's workload is
    /// "variable"; below it is "consistent".
    pub workload_variation_threshold: f64,
    pub headings: HeadingKeywords,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            weekly_top_wins: 10,
            monthly_top_wins: 15,
            high_productivity_rate: 80,
            low_productivity_rate: 50,
            high_performance_rate: 80,
            workload_variation_threshold: 0.2,
            headings: HeadingKeywords::default(),
        }
    }
}

impl ReviewConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(source).map_err(|err| err.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML config file.
    pub fn load(path: &Path) -> ReviewResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|err| ReviewError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&source).map_err(|message| ReviewError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn validate(&self) -> Result<(), String> {
        if self.low_productivity_rate > self.high_productivity_rate {
            return Err(format!(
                "low_productivity_rate {} exceeds high_productivity_rate {}",
                self.low_productivity_rate, self.high_productivity_rate
            ));
        }
        if self.high_productivity_rate > 100 || self.high_performance_rate > 100 {
            return Err("rate thresholds must be within 0..=100".to_string());
        }
        if !self.workload_variation_threshold.is_finite() || self.workload_variation_threshold < 0.0
        {
            return Err(format!(
                "workload_variation_threshold must be a non-negative number, got {}",
                self.workload_variation_threshold
            ));
        }
        self.headings.validate()
    }
}

/// Case-insensitive substrings that classify daily-log sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadingKeywords {
    pub wins: Vec<String>,
    pub notes: Vec<String>,
    pub goals: Vec<String>,
}

impl Default for HeadingKeywords {
    fn default() -> Self {
        Self {
            wins: vec!["win".to_string()],
            notes: vec!["notes".to_string()],
            goals: vec!["goal".to_string(), "tomorrow".to_string()],
        }
    }
}

impl HeadingKeywords {
    fn validate(&self) -> Result<(), String> {
        for (name, keywords) in [
            ("wins", &self.wins),
            ("notes", &self.notes),
            ("goals", &self.goals),
        ] {
            if keywords.iter().any(|keyword| keyword.trim().is_empty()) {
                return Err(format!("headings.{name} contains an empty keyword"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ReviewConfig;
    use crate::error::ReviewError;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ReviewConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReviewConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = ReviewConfig::from_toml_str(
            "weekly_top_wins = 5\n[headings]\nwins = [\"highlight\"]\n",
        )
        .unwrap();
        assert_eq!(config.weekly_top_wins, 5);
        assert_eq!(config.monthly_top_wins, 15);
        assert_eq!(config.headings.wins, vec!["highlight"]);
        assert_eq!(config.headings.notes, vec!["notes"]);
    }

    #[test]
    fn rejects_unknown_keys_and_inverted_thresholds() {
        assert!(ReviewConfig::from_toml_str("top_wins = 3").is_err());
        let err = ReviewConfig::from_toml_str(
            "low_productivity_rate = 90\nhigh_productivity_rate = 80\n",
        )
        .unwrap_err();
        assert!(err.contains("exceeds"));
        assert!(ReviewConfig::from_toml_str("[headings]\ngoals = [\" \"]\n").is_err());
    }

    #[test]
    fn load_reports_path_on_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "weekly_top_wins = \"many\"").unwrap();

        let err = ReviewConfig::load(file.path()).unwrap_err();
        match err {
            ReviewError::Config { path, .. } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
