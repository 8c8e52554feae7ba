//! Engine-wide error taxonomy.
//!
//! # Responsibility
//! - Separate fail-fast usage errors from file-system failures.
//! - Keep degraded-parse outcomes out of the error channel entirely.
//!
//! # Invariants
//! - Parsing a readable daily document never produces an error.
//! - Aggregating an empty batch always produces `ReviewError::Usage`.

use std::path::PathBuf;

/// Result type for reader, aggregation and config APIs.
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Error surfaced by the review engine.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Caller invoked an aggregation with nothing to aggregate.
    #[error("usage error: {0}")]
    Usage(&'static str),

    /// A required single file could not be read.
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither front matter nor file name carries a date and the reader
    /// was configured to reject such documents.
    #[error("cannot resolve a date for `{}`", .0.display())]
    UnresolvedDate(PathBuf),

    /// A rendered review document lacks fields needed to rebuild it.
    #[error("invalid review document `{}`: {reason}", .path.display())]
    InvalidReview { path: PathBuf, reason: String },

    /// Config file is unreadable or not valid TOML for `ReviewConfig`.
    #[error("invalid config `{}`: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl ReviewError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns whether this is a caller-side precondition failure.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
