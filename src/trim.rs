//! Sample-accurate trimming
//!
//! Maps feature-frame offsets back to sample offsets of the original audio
//! and cuts fixed-duration windows. Windows are clamped to the buffer: a
//! request running past the end is shortened, and an offset beyond the end
//! yields an empty window. No fades or gain are applied.

use crate::waveform::Waveform;
use serde::{Deserialize, Serialize};

/// Half-open sample range `[start, end)` cut from a waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimWindow {
    /// First sample (inclusive)
    pub start: usize,
    /// Last sample (exclusive)
    pub end: usize,
}

impl TrimWindow {
    /// Number of samples in the window
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Convert a frame index to a sample offset in the original sample rate
///
/// The hop is measured at `analysis_rate`; when the audio was resampled for
/// analysis the offset is scaled by `original_rate / analysis_rate`.
pub fn frame_to_sample(
    frame: usize,
    hop_size: usize,
    analysis_rate: u32,
    original_rate: u32,
) -> usize {
    let offset = frame * hop_size;
    if analysis_rate == original_rate {
        offset
    } else {
        (offset as f64 * original_rate as f64 / analysis_rate as f64).round() as usize
    }
}

/// Number of samples in `seconds` at `sample_rate`, rounded down
pub fn duration_to_samples(seconds: f32, sample_rate: u32) -> usize {
    (seconds as f64 * sample_rate as f64).floor().max(0.0) as usize
}

/// Window of `trim_seconds` starting at `start_sample`, clamped to `[0, len]`
pub fn trim_window(len: usize, start_sample: usize, trim_seconds: f32, sample_rate: u32) -> TrimWindow {
    let start = start_sample.min(len);
    let end = start
        .saturating_add(duration_to_samples(trim_seconds, sample_rate))
        .min(len);
    TrimWindow { start, end }
}

/// Cut `trim_seconds` of audio from `waveform`, starting at frame `start_frame`
///
/// # Arguments
///
/// * `waveform` - Original (not resampled) audio
/// * `start_frame` - Feature frame where the window starts
/// * `hop_size` - Hop size in samples at `analysis_rate`
/// * `analysis_rate` - Sample rate the features were extracted at
/// * `trim_seconds` - Requested duration
///
/// # Returns
///
/// The trimmed audio (same sample rate as `waveform`) and its window.
/// The output may be shorter than requested, or empty, near the end of the
/// buffer; callers should check the returned length.
pub fn trim(
    waveform: &Waveform,
    start_frame: usize,
    hop_size: usize,
    analysis_rate: u32,
    trim_seconds: f32,
) -> (Waveform, TrimWindow) {
    let sample_rate = waveform.sample_rate();
    let start_sample = frame_to_sample(start_frame, hop_size, analysis_rate, sample_rate);
    let window = trim_window(waveform.len(), start_sample, trim_seconds, sample_rate);

    let requested = duration_to_samples(trim_seconds, sample_rate);
    if window.len() < requested {
        log::warn!(
            "Trim window shortened: requested {} samples from {}, got {} (audio has {})",
            requested,
            start_sample,
            window.len(),
            waveform.len()
        );
    }

    (waveform.slice(window.start, window.end), window)
}
