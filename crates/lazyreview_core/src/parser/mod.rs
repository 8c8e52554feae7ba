//! Markdown parsers for journal documents.
//!
//! # Responsibility
//! - Turn raw markdown into typed front matter and structured sections.
//! - Degrade silently on malformed input; parsing never fails.
//!
//! # Invariants
//! - Parsers are pure functions over `&str`.

pub mod document;
pub mod front_matter;
pub mod structure;
