//! Domain model for parsed journal documents and review rollups.
//!
//! # Responsibility
//! - Define canonical data structures shared by parsers, readers and services.
//! - Keep the parsed-document shape separate from derived review records.
//!
//! # Invariants
//! - Records carry no persistent identity; each is created per call.
//! - Only their rendered markdown form outlives an aggregation call.

pub mod document;
pub mod review;
