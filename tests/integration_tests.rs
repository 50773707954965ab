//! Integration tests for the alignment engine

use stratum_align::io::{
    decode_audio_bytes, decode_audio_file, encode_wav, write_wav, AudioFormat, ChannelMixMode,
    WavEncoding,
};
use stratum_align::{
    align_and_trim, AlignConfig, AlignError, Aligner, DtwWindow, FeatureStrategy, Waveform,
};

const HOP: usize = 512;

/// Rising chirp (300 Hz + 90 Hz/s) with a linear level ramp from 0.2 to `peak`
fn chirp_samples(seconds: f32, sample_rate: u32, peak: f32) -> Vec<f32> {
    let n = (seconds * sample_rate as f32) as usize;
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let phase = 2.0 * std::f64::consts::PI * (300.0 * t + 45.0 * t * t);
            let level = 0.2 + (peak as f64 - 0.2) * t / seconds as f64;
            (level * phase.sin()) as f32
        })
        .collect()
}

/// Steady sine at `freq` Hz and amplitude 0.5
fn sine_samples(freq: f32, seconds: f32, sample_rate: u32) -> Vec<f32> {
    let n = (seconds * sample_rate as f32) as usize;
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (0.5 * (2.0 * std::f64::consts::PI * freq as f64 * t).sin()) as f32
        })
        .collect()
}

/// Same chirp preceded by `lead_seconds` of silence
fn delayed_chirp(lead_seconds: f32, seconds: f32, sample_rate: u32, peak: f32) -> Vec<f32> {
    let lead = (lead_seconds * sample_rate as f32) as usize;
    let mut samples = vec![0.0f32; lead];
    samples.extend(chirp_samples(seconds, sample_rate, peak));
    samples
}

fn temp_wav(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("stratum-align-{}-{}.wav", std::process::id(), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_two_second_lag(config: AlignConfig) {
        let sample_rate = 16000;
        let a = Waveform::new(chirp_samples(30.0, sample_rate, 1.0), sample_rate).unwrap();
        let b = Waveform::new(delayed_chirp(2.0, 30.0, sample_rate, 1.0), sample_rate).unwrap();

        let outcome = Aligner::new(config)
            .unwrap()
            .align_and_trim_with_report(&a, &b, 10.0)
            .expect("Alignment should succeed");
        let report = &outcome.report;

        let lag = report.start_sample_b as i64 - report.start_sample_a as i64;
        assert!(
            (lag - 32000).abs() <= HOP as i64,
            "B should start ~32000 samples after A, got {} (frames {} / {})",
            lag,
            report.start_frame_a,
            report.start_frame_b
        );

        let expected_len = 10 * sample_rate as usize;
        assert_eq!(outcome.trimmed_a.len(), expected_len);
        assert_eq!(outcome.trimmed_b.len(), expected_len);
        assert_eq!(outcome.trimmed_a.sample_rate(), sample_rate);
        assert_eq!(outcome.trimmed_b.sample_rate(), sample_rate);
        assert_eq!(report.frames_a, 934);
        assert_eq!(report.frames_b, 997);

        println!(
            "{} lag test: lag={} samples, normalized cost={:.4}, {:.1} ms",
            report.metadata.feature, lag, report.normalized_cost, report.metadata.processing_time_ms
        );
    }

    #[test]
    fn test_two_second_lead_in_spectral() {
        assert_two_second_lag(AlignConfig::default());
    }

    #[test]
    fn test_two_second_lead_in_pure_sine() {
        let sample_rate = 16000;
        let tone = sine_samples(440.0, 30.0, sample_rate);
        let mut delayed = vec![0.0f32; 2 * sample_rate as usize];
        delayed.extend_from_slice(&tone);

        let a = Waveform::new(tone, sample_rate).unwrap();
        let b = Waveform::new(delayed, sample_rate).unwrap();

        let outcome = Aligner::new(AlignConfig::default())
            .unwrap()
            .align_and_trim_with_report(&a, &b, 10.0)
            .unwrap();
        let report = &outcome.report;

        let lag = report.start_sample_b as i64 - report.start_sample_a as i64;
        assert!(
            (lag - 32000).abs() <= HOP as i64,
            "B should start ~32000 samples after A, got {}",
            lag
        );
        assert_eq!(outcome.trimmed_a.len(), 10 * sample_rate as usize);
        assert_eq!(outcome.trimmed_b.len(), 10 * sample_rate as usize);
    }

    #[test]
    fn test_two_second_lead_in_energy() {
        assert_two_second_lag(AlignConfig {
            feature: FeatureStrategy::Energy,
            ..Default::default()
        });
    }

    #[test]
    fn test_two_second_lead_in_banded() {
        assert_two_second_lag(AlignConfig {
            window: DtwWindow::SakoeChiba { radius: 200 },
            ..Default::default()
        });
    }

    #[test]
    fn test_trim_cuts_original_audio() {
        // Peak 0.5: analysis copies are normalized, outputs must not be
        let sample_rate = 16000;
        let a = Waveform::new(chirp_samples(12.0, sample_rate, 0.5), sample_rate).unwrap();
        let b = Waveform::new(delayed_chirp(1.0, 12.0, sample_rate, 0.5), sample_rate).unwrap();

        let outcome = Aligner::new(AlignConfig::default())
            .unwrap()
            .align_and_trim_with_report(&a, &b, 5.0)
            .unwrap();

        assert_eq!(
            outcome.trimmed_a.samples(),
            &a.samples()[outcome.window_a.start..outcome.window_a.end]
        );
        assert_eq!(
            outcome.trimmed_b.samples(),
            &b.samples()[outcome.window_b.start..outcome.window_b.end]
        );
        assert_eq!(outcome.window_a.start, outcome.report.start_sample_a);
        assert_eq!(outcome.window_b.start, outcome.report.start_sample_b);
    }

    #[test]
    fn test_mixed_sample_rates() {
        let a = Waveform::new(chirp_samples(20.0, 16000, 1.0), 16000).unwrap();
        let b = Waveform::new(delayed_chirp(2.0, 20.0, 8000, 1.0), 8000).unwrap();

        let outcome = Aligner::new(AlignConfig::default())
            .unwrap()
            .align_and_trim_with_report(&a, &b, 10.0)
            .unwrap();
        let report = &outcome.report;

        // Both analyzed at the lower rate, hop of 512 samples = 64 ms
        assert_eq!(report.metadata.analysis_rate_a, 8000);
        assert_eq!(report.metadata.analysis_rate_b, 8000);
        assert!(report.metadata.resampled);
        assert!(
            (report.lag_seconds() - 2.0).abs() <= 512.0 / 8000.0,
            "lag {:.3}s",
            report.lag_seconds()
        );

        assert_eq!(outcome.trimmed_a.sample_rate(), 16000);
        assert_eq!(outcome.trimmed_b.sample_rate(), 8000);
        assert_eq!(outcome.trimmed_a.len(), 160000);
        assert_eq!(outcome.trimmed_b.len(), 80000);
        assert_eq!(report.start_sample_a, report.start_frame_a * HOP * 2);
    }

    #[test]
    fn test_fixed_target_rate() {
        let a = Waveform::new(chirp_samples(10.0, 16000, 1.0), 16000).unwrap();
        let config = AlignConfig {
            target_sample_rate: Some(8000),
            ..Default::default()
        };
        let outcome = Aligner::new(config)
            .unwrap()
            .align_and_trim_with_report(&a, &a, 5.0)
            .unwrap();

        assert_eq!(outcome.report.metadata.analysis_rate_a, 8000);
        assert_eq!(outcome.report.start_sample_a, outcome.report.start_sample_b);
        assert_eq!(outcome.trimmed_a.len(), 80000);
    }

    #[test]
    fn test_long_trim_on_short_audio() {
        let a = Waveform::new(chirp_samples(10.0, 16000, 1.0), 16000).unwrap();

        let (trimmed_a, trimmed_b) =
            align_and_trim(&a, &a, 120.0, AlignConfig::default()).expect("Should not fail");

        assert!(!trimmed_a.is_empty());
        assert!(trimmed_a.len() < 120 * 16000);
        assert!(trimmed_a.len() < a.len());
        assert_eq!(trimmed_a.samples(), trimmed_b.samples());
    }

    #[test]
    fn test_output_never_exceeds_requested_duration() {
        let a = Waveform::new(chirp_samples(14.0, 11025, 1.0), 11025).unwrap();
        let b = Waveform::new(delayed_chirp(0.5, 13.0, 11025, 1.0), 11025).unwrap();

        for trim_seconds in [5.0f32, 7.3, 12.0] {
            let (ta, tb) = align_and_trim(&a, &b, trim_seconds, AlignConfig::default()).unwrap();
            let limit = (trim_seconds as f64 * 11025.0).floor() as usize;
            assert!(ta.len() <= limit);
            assert!(tb.len() <= limit);
        }
    }

    #[test]
    fn test_input_shorter_than_one_frame() {
        let short = Waveform::new(vec![0.1f32; 100], 16000).unwrap();
        let a = Waveform::new(chirp_samples(6.0, 16000, 1.0), 16000).unwrap();

        let result = align_and_trim(&short, &a, 10.0, AlignConfig::default());
        assert!(matches!(result, Err(AlignError::InvalidInput(_))));

        let result = align_and_trim(&a, &short, 10.0, AlignConfig::default());
        assert!(matches!(result, Err(AlignError::InvalidInput(_))));
    }

    #[test]
    fn test_silent_inputs_do_not_fail() {
        let silent = Waveform::new(vec![0.0f32; 16000 * 6], 16000).unwrap();
        let (ta, tb) = align_and_trim(&silent, &silent, 5.0, AlignConfig::default()).unwrap();
        assert_eq!(ta.len(), tb.len());
        assert!(ta.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_trim_seconds_out_of_range() {
        let a = Waveform::new(chirp_samples(6.0, 16000, 1.0), 16000).unwrap();
        for bad in [0.0f32, 4.99, 120.5, -10.0] {
            let result = align_and_trim(&a, &a, bad, AlignConfig::default());
            assert!(
                matches!(result, Err(AlignError::ConfigurationError(_))),
                "trim_seconds={} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_wav_files_end_to_end() {
        let sample_rate = 16000;
        let a = Waveform::new(chirp_samples(12.0, sample_rate, 0.9), sample_rate).unwrap();
        let b = Waveform::new(delayed_chirp(1.0, 12.0, sample_rate, 0.9), sample_rate).unwrap();

        // Decode from memory, as a caller receiving uploads would
        let bytes_a = encode_wav(&a, WavEncoding::Pcm16).unwrap();
        let decoded_a = decode_audio_bytes(bytes_a, Some(AudioFormat::Wav), ChannelMixMode::Average).unwrap();
        assert_eq!(decoded_a.len(), a.len());
        assert_eq!(decoded_a.sample_rate(), sample_rate);

        // And from disk
        let path_b = temp_wav("input-b");
        write_wav(&path_b, &b, WavEncoding::Pcm16).unwrap();
        let decoded_b = decode_audio_file(&path_b, ChannelMixMode::Average).unwrap();
        assert_eq!(decoded_b.len(), b.len());

        let (ta, tb) = align_and_trim(&decoded_a, &decoded_b, 5.0, AlignConfig::default()).unwrap();

        let out_a = temp_wav("trimmed-a");
        write_wav(&out_a, &ta, WavEncoding::Pcm16).unwrap();
        let reread = decode_audio_file(&out_a, ChannelMixMode::Average).unwrap();
        assert_eq!(reread.len(), ta.len());
        assert_eq!(reread.sample_rate(), sample_rate);
        assert_eq!(tb.len(), 5 * sample_rate as usize);

        let _ = std::fs::remove_file(&path_b);
        let _ = std::fs::remove_file(&out_a);
    }
}
