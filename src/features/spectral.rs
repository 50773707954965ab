//! Mel-cepstral (MFCC-style) features
//!
//! Algorithm, per frame:
//! 1. Apply a Hann window and take the FFT (`frame_size` points)
//! 2. Power spectrum `|X[k]|^2` for `k = 0..=frame_size/2`
//! 3. Triangular mel filterbank (`n_mels` bands, 0 Hz to Nyquist)
//! 4. Power to dB: `10 * log10(max(p, 1e-10))`
//! 5. Orthonormal DCT-II, keep the first `n_coefficients`
//!
//! # Example
//!
//! ```no_run
//! use stratum_align::features::spectral::{extract_spectral_features, SpectralParams};
//!
//! let samples = vec![0.0f32; 16000 * 5];
//! let features = extract_spectral_features(&samples, 16000, &SpectralParams::default())?;
//! assert_eq!(features.dimension(), 20);
//! # Ok::<(), stratum_align::AlignError>(())
//! ```

use super::mel::{dct_basis, hann_window, mel_filter_bank};
use super::sequence::{frame_count, FeatureSequence};
use crate::error::AlignError;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Power floor before the dB conversion
const POWER_FLOOR: f32 = 1e-10;

/// Parameters of the cepstral feature extractor
#[derive(Debug, Clone)]
pub struct SpectralParams {
    /// Frame size in samples, also the FFT size (default: 2048)
    pub frame_size: usize,
    /// Hop size in samples (default: 512)
    pub hop_size: usize,
    /// Mel bands (default: 40)
    pub n_mels: usize,
    /// Coefficients kept per frame (default: 20)
    pub n_coefficients: usize,
}

impl Default for SpectralParams {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
            n_mels: 40,
            n_coefficients: 20,
        }
    }
}

/// Compute cepstral coefficients per frame
///
/// # Arguments
///
/// * `samples` - Mono audio samples (ideally peak-normalized)
/// * `sample_rate` - Sample rate in Hz, places the mel bands
/// * `params` - Framing and cepstral parameters
///
/// # Returns
///
/// `FeatureSequence` of dimension `n_coefficients`; empty if `samples` is
/// shorter than one frame
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` for a zero frame size, hop size or
/// sample rate, and `AlignError::ConfigurationError` if `n_coefficients` is
/// zero or exceeds `n_mels`
pub fn extract_spectral_features(
    samples: &[f32],
    sample_rate: u32,
    params: &SpectralParams,
) -> Result<FeatureSequence, AlignError> {
    let SpectralParams {
        frame_size,
        hop_size,
        n_mels,
        n_coefficients,
    } = *params;

    if frame_size == 0 {
        return Err(AlignError::InvalidInput(
            "Frame size must be > 0".to_string(),
        ));
    }
    if hop_size == 0 {
        return Err(AlignError::InvalidInput(
            "Hop size must be > 0".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(AlignError::InvalidInput(
            "Sample rate must be > 0".to_string(),
        ));
    }
    if n_coefficients == 0 || n_coefficients > n_mels {
        return Err(AlignError::ConfigurationError(format!(
            "Coefficient count must be in 1..={}, got {}",
            n_mels, n_coefficients
        )));
    }

    let num_frames = frame_count(samples.len(), frame_size, hop_size);
    if num_frames == 0 {
        log::warn!(
            "Frame size ({}) larger than audio length ({}), returning empty features",
            frame_size,
            samples.len()
        );
        return FeatureSequence::empty(n_coefficients, frame_size, hop_size, sample_rate);
    }

    log::debug!(
        "Extracting cepstral features: {} samples at {} Hz, frame={}, hop={}, mels={}, coeffs={}, {} frames",
        samples.len(),
        sample_rate,
        frame_size,
        hop_size,
        n_mels,
        n_coefficients,
        num_frames
    );

    let window = hann_window(frame_size);
    let filters = mel_filter_bank(n_mels, frame_size, sample_rate, 0.0, sample_rate as f32 / 2.0);
    let dct = dct_basis(n_coefficients, n_mels);

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(frame_size);

    let n_bins = frame_size / 2 + 1;
    let mut buffer = vec![Complex::new(0.0f32, 0.0); frame_size];
    let mut power = vec![0.0f32; n_bins];
    let mut log_mel = vec![0.0f32; n_mels];
    let mut data = Vec::with_capacity(num_frames * n_coefficients);

    for i in 0..num_frames {
        let start = i * hop_size;
        let frame = &samples[start..start + frame_size];

        for ((slot, &x), &w) in buffer.iter_mut().zip(frame).zip(&window) {
            *slot = Complex::new(x * w, 0.0);
        }
        fft.process(&mut buffer);

        for (p, c) in power.iter_mut().zip(&buffer[..n_bins]) {
            *p = c.norm_sqr();
        }

        for (band, filter) in log_mel.iter_mut().zip(&filters) {
            let energy: f32 = filter.iter().zip(&power).map(|(&w, &p)| w * p).sum();
            *band = 10.0 * energy.max(POWER_FLOOR).log10();
        }

        data.extend(
            dct.iter()
                .map(|row| row.iter().zip(&log_mel).map(|(&w, &v)| w * v).sum::<f32>()),
        );
    }

    FeatureSequence::from_flat(data, n_coefficients, frame_size, hop_size, sample_rate)
}
