//! Alignment result types

use super::metadata::AlignmentMetadata;
use crate::trim::TrimWindow;
use crate::waveform::Waveform;
use serde::{Deserialize, Serialize};

/// Summary of one alignment between recordings A and B
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Start frame in A's feature sequence
    pub start_frame_a: usize,

    /// Start frame in B's feature sequence
    pub start_frame_b: usize,

    /// Start sample in A, at A's original sample rate
    pub start_sample_a: usize,

    /// Start sample in B, at B's original sample rate
    pub start_sample_b: usize,

    /// Original sample rate of A in Hz
    pub sample_rate_a: u32,

    /// Original sample rate of B in Hz
    pub sample_rate_b: u32,

    /// Accumulated DTW cost (lower = more similar)
    pub cost: f64,

    /// DTW cost per path step
    ///
    /// Comparable across inputs of different lengths, unlike `cost`.
    pub normalized_cost: f64,

    /// Number of steps on the warping path
    pub path_length: usize,

    /// Feature frames extracted from A
    pub frames_a: usize,

    /// Feature frames extracted from B
    pub frames_b: usize,

    /// How the alignment was computed
    pub metadata: AlignmentMetadata,
}

impl AlignmentReport {
    /// Start of the matching region in A, in seconds
    pub fn start_seconds_a(&self) -> f64 {
        self.start_sample_a as f64 / self.sample_rate_a as f64
    }

    /// Start of the matching region in B, in seconds
    pub fn start_seconds_b(&self) -> f64 {
        self.start_sample_b as f64 / self.sample_rate_b as f64
    }

    /// How much later the match starts in B than in A, in seconds
    ///
    /// Negative when the matching region starts earlier in B.
    pub fn lag_seconds(&self) -> f64 {
        self.start_seconds_b() - self.start_seconds_a()
    }
}

/// Trimmed audio together with the alignment that produced it
#[derive(Debug, Clone)]
pub struct TrimOutcome {
    /// Segment cut from A, at A's sample rate
    pub trimmed_a: Waveform,

    /// Segment cut from B, at B's sample rate
    pub trimmed_b: Waveform,

    /// Sample range of `trimmed_a` within A
    pub window_a: TrimWindow,

    /// Sample range of `trimmed_b` within B
    pub window_b: TrimWindow,

    /// Alignment summary
    pub report: AlignmentReport,
}
