//! Short-time energy features
//!
//! One value per frame: the sum of squared samples. Cheap and rate-agnostic,
//! but sensitive to level differences, so inputs should be peak-normalized
//! first.
//!
//! Energy cannot locate the lag between stationary tones: every frame of a
//! steady sine has the same energy, so any warping path through the tone is
//! equally cheap. Use the spectral strategy for such material.
//!
//! # Example
//!
//! ```
//! use stratum_align::features::energy::extract_energy_features;
//!
//! let samples = vec![0.5f32; 4096];
//! let features = extract_energy_features(&samples, 16000, 2048, 512)?;
//! assert_eq!(features.len(), 5);
//! assert_eq!(features.dimension(), 1);
//! # Ok::<(), stratum_align::AlignError>(())
//! ```

use super::sequence::{frame_count, FeatureSequence};
use crate::error::AlignError;

/// Compute per-frame energy
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz (recorded on the sequence)
/// * `frame_size` - Frame size in samples (typically 2048)
/// * `hop_size` - Hop size in samples (typically 512)
///
/// # Returns
///
/// `FeatureSequence` of dimension 1; empty if `samples` is shorter than one frame
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` if `frame_size` or `hop_size` is zero
pub fn extract_energy_features(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
) -> Result<FeatureSequence, AlignError> {
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

    let num_frames = frame_count(samples.len(), frame_size, hop_size);
    if num_frames == 0 {
        log::warn!(
            "Frame size ({}) larger than audio length ({}), returning empty features",
            frame_size,
            samples.len()
        );
        return FeatureSequence::empty(1, frame_size, hop_size, sample_rate);
    }

    log::debug!(
        "Extracting energy features: {} samples, frame={}, hop={}, {} frames",
        samples.len(),
        frame_size,
        hop_size,
        num_frames
    );

    let energies: Vec<f32> = (0..num_frames)
        .map(|i| {
            let start = i * hop_size;
            samples[start..start + frame_size]
                .iter()
                .map(|&x| x * x)
                .sum()
        })
        .collect();

    FeatureSequence::from_flat(energies, 1, frame_size, hop_size, sample_rate)
}
