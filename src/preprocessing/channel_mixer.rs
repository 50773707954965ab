//! Channel mixing utilities (multi-channel to mono conversion)

use crate::error::AlignError;
use std::str::FromStr;

/// Channel mixing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMixMode {
    /// Average of all channels
    #[default]
    Average,
    /// Keep the channel with the highest RMS over the whole buffer
    Dominant,
    /// Keep the first channel only
    First,
}

impl FromStr for ChannelMixMode {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" | "mean" => Ok(ChannelMixMode::Average),
            "dominant" => Ok(ChannelMixMode::Dominant),
            "first" | "left" => Ok(ChannelMixMode::First),
            other => Err(AlignError::ConfigurationError(format!(
                "Unsupported channel mix mode '{}' (expected 'average', 'dominant' or 'first')",
                other
            ))),
        }
    }
}

/// Downmix interleaved samples to mono
///
/// # Arguments
///
/// * `interleaved` - Interleaved samples (`frame0_ch0, frame0_ch1, ...`)
/// * `channels` - Number of channels
/// * `mode` - Mixing mode
///
/// # Returns
///
/// Mono samples, one per frame
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` if `channels` is zero or the buffer
/// length is not a multiple of `channels`.
pub fn downmix_interleaved(
    interleaved: &[f32],
    channels: usize,
    mode: ChannelMixMode,
) -> Result<Vec<f32>, AlignError> {
    if channels == 0 {
        return Err(AlignError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }
    if interleaved.len() % channels != 0 {
        return Err(AlignError::InvalidInput(format!(
            "Interleaved buffer of {} samples is not a multiple of {} channels",
            interleaved.len(),
            channels
        )));
    }
    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    let mono = match mode {
        ChannelMixMode::Average => interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect(),
        ChannelMixMode::First => extract_channel(interleaved, channels, 0),
        ChannelMixMode::Dominant => {
            let mut energy = vec![0.0f64; channels];
            for frame in interleaved.chunks_exact(channels) {
                for (acc, &s) in energy.iter_mut().zip(frame) {
                    *acc += (s as f64) * (s as f64);
                }
            }
            let loudest = energy
                .iter()
                .enumerate()
                .fold((0, f64::MIN), |best, (ch, &e)| if e > best.1 { (ch, e) } else { best })
                .0;
            log::debug!("Dominant downmix keeps channel {} of {}", loudest, channels);
            extract_channel(interleaved, channels, loudest)
        }
    };

    Ok(mono)
}

fn extract_channel(interleaved: &[f32], channels: usize, channel: usize) -> Vec<f32> {
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame[channel])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_downmix() {
        let interleaved = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        let mono = downmix_interleaved(&interleaved, 2, ChannelMixMode::Average).unwrap();
        assert_eq!(mono, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_dominant_downmix() {
        let interleaved = [0.1, 0.9, -0.1, -0.8, 0.1, 0.7];
        let mono = downmix_interleaved(&interleaved, 2, ChannelMixMode::Dominant).unwrap();
        assert_eq!(mono, vec![0.9, -0.8, 0.7]);
    }

    #[test]
    fn test_mix_mode_from_str() {
        assert_eq!("Average".parse::<ChannelMixMode>().unwrap(), ChannelMixMode::Average);
        assert_eq!("dominant".parse::<ChannelMixMode>().unwrap(), ChannelMixMode::Dominant);
        assert_eq!("left".parse::<ChannelMixMode>().unwrap(), ChannelMixMode::First);
        assert!(matches!(
            "loudest".parse::<ChannelMixMode>(),
            Err(AlignError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_first_channel() {
        let interleaved = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mono = downmix_interleaved(&interleaved, 3, ChannelMixMode::First).unwrap();
        assert_eq!(mono, vec![1.0, 4.0]);
    }

    #[test]
    fn test_mono_passthrough() {
        let samples = [0.3, -0.2];
        let mono = downmix_interleaved(&samples, 1, ChannelMixMode::Dominant).unwrap();
        assert_eq!(mono, samples.to_vec());
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(downmix_interleaved(&[0.0; 4], 0, ChannelMixMode::Average).is_err());
        assert!(downmix_interleaved(&[0.0; 5], 2, ChannelMixMode::Average).is_err());
    }
}
