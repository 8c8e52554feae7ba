//! File-system readers for journal and review documents.
//!
//! # Responsibility
//! - Turn directories of markdown files into typed records.
//! - Keep file-system details out of the aggregation services.
//!
//! # Invariants
//! - Source directories are read-only from this layer.
//! - Missing directories list as empty; missing single files are errors.

pub mod daily_log_repo;
pub mod review_repo;
