//! Linear-interpolation resampling
//!
//! Not band-limited: this is only used to put both analysis copies on a
//! common rate so that a frame hop spans the same time in each feature
//! sequence. Trimmed output is always cut from the original-rate audio.

use crate::error::AlignError;
use crate::waveform::Waveform;

/// Output length for resampling `len` samples from `source_rate` to `target_rate`
pub fn resampled_len(len: usize, source_rate: u32, target_rate: u32) -> usize {
    (len as f64 * target_rate as f64 / source_rate as f64).round() as usize
}

/// Resample `waveform` to `target_rate` Hz
///
/// Output sample k is read at input position `k * (len - 1) / (out_len - 1)`,
/// so the first and last output samples coincide with the first and last
/// input samples. A waveform already at `target_rate` is returned unchanged.
///
/// # Errors
///
/// Returns `AlignError::ConfigurationError` if `target_rate` is zero.
pub fn resample(waveform: &Waveform, target_rate: u32) -> Result<Waveform, AlignError> {
    if target_rate == 0 {
        return Err(AlignError::ConfigurationError(
            "Target sample rate must be > 0".to_string(),
        ));
    }

    let source_rate = waveform.sample_rate();
    if source_rate == target_rate {
        return Ok(waveform.clone());
    }

    let input = waveform.samples();
    let out_len = resampled_len(input.len(), source_rate, target_rate);

    log::debug!(
        "Resampling {} samples {} Hz -> {} Hz ({} samples)",
        input.len(),
        source_rate,
        target_rate,
        out_len
    );

    let output = match (input.len(), out_len) {
        (_, 0) | (0, _) => Vec::new(),
        (_, 1) => vec![input[0]],
        (n, m) => {
            let step = (n - 1) as f64 / (m - 1) as f64;
            (0..m)
                .map(|k| {
                    let pos = k as f64 * step;
                    let left = (pos.floor() as usize).min(n - 1);
                    let right = (left + 1).min(n - 1);
                    let frac = (pos - left as f64) as f32;
                    input[left] + (input[right] - input[left]) * frac
                })
                .collect()
        }
    };

    Ok(Waveform::from_parts(output, target_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize, sample_rate: u32) -> Waveform {
        Waveform::new((0..len).map(|i| i as f32).collect(), sample_rate).unwrap()
    }

    #[test]
    fn test_same_rate_is_identity() {
        let w = Waveform::new(vec![0.1, -0.7, 0.3, 0.9], 16000).unwrap();
        assert_eq!(resample(&w, 16000).unwrap(), w);
    }

    #[test]
    fn test_output_length() {
        let w = ramp(44100, 44100);
        let out = resample(&w, 16000).unwrap();
        assert_eq!(out.len(), 16000);
        assert_eq!(out.sample_rate(), 16000);

        let w = ramp(1001, 8000);
        let out = resample(&w, 22050).unwrap();
        assert_eq!(out.len(), resampled_len(1001, 8000, 22050));
        assert_eq!(out.len(), 2759);
    }

    #[test]
    fn test_duration_preserved() {
        let w = ramp(30_000, 16000);
        let out = resample(&w, 44100).unwrap();
        let diff = (w.duration_seconds() - out.duration_seconds()).abs();
        assert!(diff <= 1.0 / 44100.0, "duration drifted by {}", diff);
    }

    #[test]
    fn test_linear_interpolation_of_ramp() {
        // A linear ramp stays linear under linear interpolation
        let w = ramp(5, 4);
        let out = resample(&w, 8).unwrap();
        assert_eq!(out.len(), 10);
        assert_eq!(out.samples()[0], 0.0);
        assert!((out.samples()[9] - 4.0).abs() < 1e-6);
        for pair in out.samples().windows(2) {
            assert!((pair[1] - pair[0] - 4.0 / 9.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_target_rate_rejected() {
        let w = ramp(10, 8000);
        assert!(matches!(
            resample(&w, 0),
            Err(AlignError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_tiny_inputs() {
        let w = Waveform::new(vec![0.5], 8000).unwrap();
        let out = resample(&w, 16000).unwrap();
        assert_eq!(out.samples(), &[0.5, 0.5]);

        let empty = Waveform::new(vec![], 8000).unwrap();
        assert!(resample(&empty, 16000).unwrap().is_empty());
    }
}
