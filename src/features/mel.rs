//! Mel-scale filterbank, analysis window and DCT basis for cepstral features

use std::f32::consts::PI;

/// Periodic Hann window of length `n`
pub fn hann_window(n: usize) -> Vec<f32> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / n as f32).cos())
        .collect()
}

/// Converts frequency in Hz to mel scale (HTK formula)
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Converts mel scale frequency back to Hz
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

/// Creates a triangular mel filterbank
///
/// Returns `n_mels` filters of `fft_size / 2 + 1` weights each, with centres
/// equally spaced on the mel scale between `low_hz` and `high_hz`. Weights
/// are interpolated on the continuous bin axis, so narrow low-frequency
/// filters still get non-zero support.
pub fn mel_filter_bank(
    n_mels: usize,
    fft_size: usize,
    sample_rate: u32,
    low_hz: f32,
    high_hz: f32,
) -> Vec<Vec<f32>> {
    let n_bins = fft_size / 2 + 1;
    let low_mel = hz_to_mel(low_hz);
    let high_mel = hz_to_mel(high_hz);

    // n_mels + 2 edges, expressed as fractional FFT bins
    let step = (high_mel - low_mel) / (n_mels + 1) as f32;
    let edges: Vec<f32> = (0..n_mels + 2)
        .map(|i| mel_to_hz(low_mel + i as f32 * step) * fft_size as f32 / sample_rate as f32)
        .collect();

    (0..n_mels)
        .map(|m| {
            let (left, center, right) = (edges[m], edges[m + 1], edges[m + 2]);
            (0..n_bins)
                .map(|k| {
                    let k = k as f32;
                    let rising = (k - left) / (center - left).max(f32::EPSILON);
                    let falling = (right - k) / (right - center).max(f32::EPSILON);
                    rising.min(falling).max(0.0)
                })
                .collect()
        })
        .collect()
}

/// Orthonormal DCT-II basis, `n_out` rows of `n_in` weights
///
/// Row `k` holds `s_k * cos(pi / n_in * (n + 0.5) * k)` with
/// `s_0 = sqrt(1 / n_in)` and `s_k = sqrt(2 / n_in)` otherwise.
pub fn dct_basis(n_out: usize, n_in: usize) -> Vec<Vec<f32>> {
    let n = n_in as f32;
    (0..n_out)
        .map(|k| {
            let scale = if k == 0 {
                (1.0 / n).sqrt()
            } else {
                (2.0 / n).sqrt()
            };
            (0..n_in)
                .map(|i| scale * (PI / n * (i as f32 + 0.5) * k as f32).cos())
                .collect()
        })
        .collect()
}
