//! Review aggregation and rendering services.
//!
//! # Responsibility
//! - Roll daily logs into weekly reviews and weekly reviews into monthly ones.
//! - Render reviews into canonical markdown.
//!
//! # See also
//! - `repo` for the readers that feed these services.

pub mod monthly;
pub mod render;
pub mod review_service;
pub mod weekly;
