//! Peak normalization
//!
//! Scales audio so that its largest absolute sample is exactly 1.0, which
//! removes overall level differences between the two recordings before
//! features are compared. Silent input is left untouched.
//!
//! # Example
//!
//! ```
//! use stratum_align::preprocessing::normalization::peak_normalize;
//! use stratum_align::Waveform;
//!
//! let w = Waveform::new(vec![0.25, -0.5, 0.1], 16000)?;
//! let normalized = peak_normalize(&w);
//! assert_eq!(normalized.samples(), &[0.5, -1.0, 0.2]);
//! # Ok::<(), stratum_align::AlignError>(())
//! ```

use crate::waveform::Waveform;

/// Level information returned by in-place normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakMetadata {
    /// Largest absolute sample before normalization
    pub peak: f32,
    /// Peak level in dBFS before normalization
    pub peak_db: f32,
    /// Gain applied in dB (0.0 for silent input)
    pub gain_db: f32,
}

/// Largest absolute sample value (0.0 for empty input)
pub fn peak_amplitude(samples: &[f32]) -> f32 {
    samples.iter().map(|&x| x.abs()).fold(0.0f32, f32::max)
}

/// Normalize samples in place so the peak is 1.0
///
/// All-zero (or empty) input is left unchanged and reports a gain of 0 dB.
pub fn normalize_peak_in_place(samples: &mut [f32]) -> PeakMetadata {
    let peak = peak_amplitude(samples);

    if peak == 0.0 {
        log::warn!("Audio is silent, skipping peak normalization");
        return PeakMetadata {
            peak: 0.0,
            peak_db: f32::NEG_INFINITY,
            gain_db: 0.0,
        };
    }

    for sample in samples.iter_mut() {
        *sample /= peak;
    }

    let peak_db = 20.0 * peak.log10();
    log::debug!(
        "Peak normalization: peak={:.2} dB, gain={:.2} dB",
        peak_db,
        -peak_db
    );

    PeakMetadata {
        peak,
        peak_db,
        gain_db: -peak_db,
    }
}

/// Return a copy of `waveform` scaled to peak amplitude 1.0
///
/// Length and sample rate are preserved. Silent input is returned as-is.
pub fn peak_normalize(waveform: &Waveform) -> Waveform {
    let mut samples = waveform.samples().to_vec();
    normalize_peak_in_place(&mut samples);
    Waveform::from_parts(samples, waveform.sample_rate())
}
