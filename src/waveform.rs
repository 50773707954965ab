//! Mono PCM waveform container

use crate::error::AlignError;

/// Mono audio samples with their sample rate
///
/// The engine only ever handles mono audio; multi-channel sources are
/// downmixed by the decoder (see [`crate::preprocessing::channel_mixer`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    /// Create a waveform from mono samples
    ///
    /// # Errors
    ///
    /// Returns `AlignError::InvalidInput` if `sample_rate` is zero.
    /// Empty sample buffers are accepted here; the aligner rejects them.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AlignError> {
        if sample_rate == 0 {
            return Err(AlignError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Samples as a slice
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the waveform holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Copy of the samples in `start..end`, with the same sample rate
    ///
    /// Bounds are clamped to the buffer, so an out-of-range request yields
    /// an empty waveform rather than a panic.
    pub fn slice(&self, start: usize, end: usize) -> Waveform {
        let end = end.min(self.samples.len());
        let start = start.min(end);
        Waveform {
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
        }
    }

    /// Consume the waveform and return its samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub(crate) fn from_parts(samples: Vec<f32>, sample_rate: u32) -> Self {
        debug_assert!(sample_rate > 0);
        Self {
            samples,
            sample_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_rate_rejected() {
        let result = Waveform::new(vec![0.0; 16], 0);
        assert!(matches!(result, Err(AlignError::InvalidInput(_))));
    }

    #[test]
    fn test_duration() {
        let w = Waveform::new(vec![0.0; 48000], 16000).unwrap();
        assert_eq!(w.len(), 48000);
        assert!((w.duration_seconds() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_slice_clamps_to_bounds() {
        let w = Waveform::new((0..10).map(|i| i as f32).collect(), 8000).unwrap();

        let s = w.slice(4, 100);
        assert_eq!(s.samples(), &[4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(s.sample_rate(), 8000);

        let empty = w.slice(50, 60);
        assert!(empty.is_empty());
    }
}
