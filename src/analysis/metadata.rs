//! Alignment metadata structures

use crate::config::{DtwWindow, FeatureStrategy};
use serde::{Deserialize, Serialize};

/// How an alignment was computed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentMetadata {
    /// Crate version that produced the report
    pub algorithm_version: String,

    /// Feature strategy used
    pub feature: FeatureStrategy,

    /// DTW window used
    pub window: DtwWindow,

    /// Sample rate of A's analysis copy (after any resampling)
    pub analysis_rate_a: u32,

    /// Sample rate of B's analysis copy (after any resampling)
    pub analysis_rate_b: u32,

    /// True if either input was resampled for analysis
    pub resampled: bool,

    /// Wall-clock time spent in the pipeline, in milliseconds
    pub processing_time_ms: f32,
}

impl Default for AlignmentMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            feature: FeatureStrategy::Spectral,
            window: DtwWindow::Full,
            analysis_rate_a: 0,
            analysis_rate_b: 0,
            resampled: false,
            processing_time_ms: 0.0,
        }
    }
}
