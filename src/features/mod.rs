//! Feature extraction modules
//!
//! Turns a waveform into a [`FeatureSequence`] with one of two strategies:
//! - Short-time energy (1 value per frame)
//! - Mel-cepstral coefficients (20 values per frame by default)
//!
//! Both use the same framing: frames of `frame_size` samples every
//! `hop_size` samples, partial trailing frames dropped.

pub mod energy;
pub mod mel;
pub mod sequence;
pub mod spectral;

pub use sequence::{frame_count, FeatureSequence};

use crate::config::{AlignConfig, FeatureStrategy};
use crate::error::AlignError;
use crate::waveform::Waveform;
use spectral::SpectralParams;

/// Extract features from `waveform` with the strategy selected in `config`
///
/// # Errors
///
/// Propagates framing and parameter errors from the selected extractor.
/// A waveform shorter than one frame is not an error here: it yields an
/// empty sequence, which the DTW stage rejects.
pub fn extract_features(
    waveform: &Waveform,
    config: &AlignConfig,
) -> Result<FeatureSequence, AlignError> {
    match config.feature {
        FeatureStrategy::Energy => energy::extract_energy_features(
            waveform.samples(),
            waveform.sample_rate(),
            config.frame_size,
            config.hop_size,
        ),
        FeatureStrategy::Spectral => spectral::extract_spectral_features(
            waveform.samples(),
            waveform.sample_rate(),
            &SpectralParams {
                frame_size: config.frame_size,
                hop_size: config.hop_size,
                n_mels: config.n_mels,
                n_coefficients: config.n_coefficients,
            },
        ),
    }
}
