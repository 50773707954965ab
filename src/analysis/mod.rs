//! Alignment reports
//!
//! Summaries of one alignment run:
//! - Result types (offsets, cost, trim windows)
//! - Metadata (feature strategy, analysis rates, timing)

pub mod metadata;
pub mod result;
