//! # Stratum Align
//!
//! An audio alignment engine: given two recordings of possibly different
//! sample rate and duration, find where they are most similar and cut a
//! matching fixed-length segment from each.
//!
//! ## Features
//!
//! - **Preprocessing**: peak normalization and linear resampling to a common analysis rate
//! - **Features**: short-time energy or 20 mel-cepstral coefficients per frame
//! - **Alignment**: dynamic time warping (full grid or Sakoe-Chiba band) with pluggable frame distances
//! - **Trimming**: percentile-based start frames mapped back to sample-accurate windows
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_align::{align_and_trim, AlignConfig, Waveform};
//!
//! // Decoded mono audio (see `stratum_align::io` for file decoding)
//! let a = Waveform::new(vec![0.0f32; 44100 * 60], 44100)?;
//! let b = Waveform::new(vec![0.0f32; 48000 * 45], 48000)?;
//!
//! let (trimmed_a, trimmed_b) = align_and_trim(&a, &b, 30.0, AlignConfig::default())?;
//! println!("A: {} samples, B: {} samples", trimmed_a.len(), trimmed_b.len());
//! # Ok::<(), stratum_align::AlignError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Waveforms → Normalize → (Resample) → Features ×2 → DTW → Percentile offsets → Trim
//! ```
//!
//! Trimming always cuts from the caller's original audio at its own sample
//! rate; normalization and resampling only affect the analysis copies.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alignment;
pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;
pub mod trim;
pub mod waveform;

// Re-export main types
pub use alignment::{AlignmentResult, FrameDistance, WarpPath};
pub use analysis::metadata::AlignmentMetadata;
pub use analysis::result::{AlignmentReport, TrimOutcome};
pub use config::{
    AlignConfig, DistanceMetric, DtwWindow, FeatureStrategy, DEFAULT_TRIM_SECONDS,
    MAX_TRIM_SECONDS, MIN_TRIM_SECONDS,
};
pub use error::AlignError;
pub use features::FeatureSequence;
pub use trim::TrimWindow;
pub use waveform::Waveform;

use std::time::Instant;

/// Alignment pipeline with a fixed configuration
///
/// Holds no state besides its configuration, so one instance can serve
/// concurrent requests from several threads.
#[derive(Debug, Clone)]
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    /// Create an aligner after validating `config`
    ///
    /// # Errors
    ///
    /// Returns `AlignError::ConfigurationError` if any parameter is invalid.
    pub fn new(config: AlignConfig) -> Result<Self, AlignError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Locate the matching region of `a` and `b` without trimming
    ///
    /// # Arguments
    ///
    /// * `a` - Recording A (mono)
    /// * `b` - Recording B (mono)
    ///
    /// # Returns
    ///
    /// `AlignmentReport` with the start frame and start sample of each
    /// recording plus DTW diagnostics
    ///
    /// # Errors
    ///
    /// Returns `AlignError::InvalidInput` if either recording is empty,
    /// contains a NaN or infinite sample, or is shorter than one analysis
    /// frame after resampling. When the rates differ and no target rate is
    /// set, both copies are resampled to the lower rate, so a recording that
    /// holds a full frame at its own rate can still fall short: 2048 samples
    /// at 44.1 kHz paired with an 8 kHz recording shrink to 372 samples.
    pub fn analyze(&self, a: &Waveform, b: &Waveform) -> Result<AlignmentReport, AlignError> {
        let start_time = Instant::now();
        let config = &self.config;

        check_recording(a, "A")?;
        check_recording(b, "B")?;

        log::debug!(
            "Aligning A ({} samples at {} Hz) with B ({} samples at {} Hz), feature={}",
            a.len(),
            a.sample_rate(),
            b.len(),
            b.sample_rate(),
            config.feature
        );

        let (rate_a, rate_b) =
            analysis_rates(a.sample_rate(), b.sample_rate(), config.target_sample_rate);
        let prepared_a = prepare(a, rate_a)?;
        let prepared_b = prepare(b, rate_b)?;

        let features_a = features::extract_features(&prepared_a, config)?;
        let features_b = features::extract_features(&prepared_b, config)?;
        for (features, prepared, name) in [(&features_a, &prepared_a, "A"), (&features_b, &prepared_b, "B")] {
            if features.is_empty() {
                return Err(AlignError::InvalidInput(format!(
                    "Recording {} is shorter than one analysis frame ({} < {} samples)",
                    name,
                    prepared.len(),
                    config.frame_size
                )));
            }
        }

        let alignment =
            alignment::compute_dtw(&features_a, &features_b, &config.distance, config.window)?;
        let (start_frame_a, start_frame_b) =
            alignment::select_offsets(&alignment.path, config.offset_percentile)?;

        let start_sample_a =
            trim::frame_to_sample(start_frame_a, config.hop_size, rate_a, a.sample_rate());
        let start_sample_b =
            trim::frame_to_sample(start_frame_b, config.hop_size, rate_b, b.sample_rate());

        let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
        log::debug!(
            "Alignment done in {:.1} ms: A starts at sample {}, B at sample {}",
            processing_time_ms,
            start_sample_a,
            start_sample_b
        );

        Ok(AlignmentReport {
            start_frame_a,
            start_frame_b,
            start_sample_a,
            start_sample_b,
            sample_rate_a: a.sample_rate(),
            sample_rate_b: b.sample_rate(),
            cost: alignment.cost,
            normalized_cost: alignment.normalized_cost(),
            path_length: alignment.path.len(),
            frames_a: features_a.len(),
            frames_b: features_b.len(),
            metadata: AlignmentMetadata {
                feature: config.feature,
                window: config.window,
                analysis_rate_a: rate_a,
                analysis_rate_b: rate_b,
                resampled: rate_a != a.sample_rate() || rate_b != b.sample_rate(),
                processing_time_ms,
                ..Default::default()
            },
        })
    }

    /// Align `a` and `b` and cut `trim_seconds` of matching audio from each
    ///
    /// Each output keeps the sample rate of its input and is at most
    /// `trim_seconds * sample_rate` samples long. It is shorter when the
    /// match starts less than `trim_seconds` before the end of the audio.
    ///
    /// # Errors
    ///
    /// Returns `AlignError::ConfigurationError` if `trim_seconds` is outside
    /// [`MIN_TRIM_SECONDS`, `MAX_TRIM_SECONDS`], and the errors of [`Aligner::analyze`].
    pub fn align_and_trim(
        &self,
        a: &Waveform,
        b: &Waveform,
        trim_seconds: f32,
    ) -> Result<(Waveform, Waveform), AlignError> {
        let outcome = self.align_and_trim_with_report(a, b, trim_seconds)?;
        Ok((outcome.trimmed_a, outcome.trimmed_b))
    }

    /// Like [`Aligner::align_and_trim`], also returning windows and the report
    ///
    /// # Errors
    ///
    /// Same as [`Aligner::align_and_trim`].
    pub fn align_and_trim_with_report(
        &self,
        a: &Waveform,
        b: &Waveform,
        trim_seconds: f32,
    ) -> Result<TrimOutcome, AlignError> {
        config::validate_trim_seconds(trim_seconds)?;

        let report = self.analyze(a, b)?;
        let hop_size = self.config.hop_size;

        let (trimmed_a, window_a) = trim::trim(
            a,
            report.start_frame_a,
            hop_size,
            report.metadata.analysis_rate_a,
            trim_seconds,
        );
        let (trimmed_b, window_b) = trim::trim(
            b,
            report.start_frame_b,
            hop_size,
            report.metadata.analysis_rate_b,
            trim_seconds,
        );

        Ok(TrimOutcome {
            trimmed_a,
            trimmed_b,
            window_a,
            window_b,
            report,
        })
    }
}

/// Main alignment function
///
/// Aligns two mono recordings and returns a `trim_seconds` segment of each,
/// starting where they match.
///
/// # Arguments
///
/// * `a` - Recording A (reference)
/// * `b` - Recording B
/// * `trim_seconds` - Segment duration, 5 to 120 seconds
/// * `config` - Alignment configuration parameters
///
/// # Returns
///
/// `(trimmed_a, trimmed_b)`, each at its input's sample rate
///
/// # Errors
///
/// Returns `AlignError` on invalid configuration, trim duration or input
///
/// # Example
///
/// ```no_run
/// use stratum_align::{align_and_trim, AlignConfig, FeatureStrategy, Waveform};
///
/// let a = Waveform::new(vec![0.0f32; 16000 * 30], 16000)?;
/// let b = Waveform::new(vec![0.0f32; 16000 * 32], 16000)?;
/// let config = AlignConfig {
///     feature: FeatureStrategy::Energy,
///     ..Default::default()
/// };
/// let (trimmed_a, trimmed_b) = align_and_trim(&a, &b, 10.0, config)?;
/// # Ok::<(), stratum_align::AlignError>(())
/// ```
pub fn align_and_trim(
    a: &Waveform,
    b: &Waveform,
    trim_seconds: f32,
    config: AlignConfig,
) -> Result<(Waveform, Waveform), AlignError> {
    Aligner::new(config)?.align_and_trim(a, b, trim_seconds)
}

fn check_recording(waveform: &Waveform, name: &str) -> Result<(), AlignError> {
    if waveform.is_empty() {
        return Err(AlignError::InvalidInput(format!(
            "Recording {} has no samples",
            name
        )));
    }
    if waveform.sample_rate() == 0 {
        return Err(AlignError::InvalidInput(format!(
            "Recording {} has an invalid sample rate",
            name
        )));
    }
    if let Some(index) = waveform.samples().iter().position(|s| !s.is_finite()) {
        return Err(AlignError::InvalidInput(format!(
            "Recording {} has a non-finite sample at index {}",
            name, index
        )));
    }
    Ok(())
}

/// Sample rates the two analysis copies are brought to
///
/// A fixed target applies to both. Without one, equal rates are kept and
/// different rates meet at the lower of the two.
fn analysis_rates(rate_a: u32, rate_b: u32, target: Option<u32>) -> (u32, u32) {
    match target {
        Some(rate) => (rate, rate),
        None if rate_a == rate_b => (rate_a, rate_b),
        None => {
            let common = rate_a.min(rate_b);
            (common, common)
        }
    }
}

/// Normalized (and if needed resampled) analysis copy of `waveform`
fn prepare(waveform: &Waveform, analysis_rate: u32) -> Result<Waveform, AlignError> {
    let normalized = preprocessing::normalization::peak_normalize(waveform);
    preprocessing::resample::resample(&normalized, analysis_rate)
}
