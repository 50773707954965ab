//! Configuration parameters for audio alignment

use crate::alignment::offset::DEFAULT_OFFSET_PERCENTILE;
use crate::error::AlignError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest trim duration accepted by [`crate::align_and_trim`], in seconds
pub const MIN_TRIM_SECONDS: f32 = 5.0;

/// Longest trim duration accepted by [`crate::align_and_trim`], in seconds
pub const MAX_TRIM_SECONDS: f32 = 120.0;

/// Trim duration used when the caller has no preference, in seconds
pub const DEFAULT_TRIM_SECONDS: f32 = 30.0;

/// Per-frame feature used for alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStrategy {
    /// Short-time energy (sum of squared samples), one value per frame
    Energy,
    /// Mel-cepstral coefficients, `n_coefficients` values per frame
    #[default]
    Spectral,
}

impl FeatureStrategy {
    /// Lowercase name, as accepted by `from_str`
    pub fn name(&self) -> &'static str {
        match self {
            FeatureStrategy::Energy => "energy",
            FeatureStrategy::Spectral => "spectral",
        }
    }
}

impl fmt::Display for FeatureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FeatureStrategy {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "energy" | "rms" => Ok(FeatureStrategy::Energy),
            "spectral" | "mfcc" => Ok(FeatureStrategy::Spectral),
            other => Err(AlignError::ConfigurationError(format!(
                "Unsupported feature strategy '{}' (expected 'energy' or 'spectral')",
                other
            ))),
        }
    }
}

/// Frame-to-frame distance used by DTW
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// L1 norm of the difference
    Manhattan,
    /// L-infinity norm of the difference
    Chebyshev,
}

/// Region of the DTW grid that is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DtwWindow {
    /// Every cell, O(N·M) time and memory
    Full,
    /// Sakoe-Chiba band of `radius` frames around the (scaled) diagonal
    SakoeChiba {
        /// Half-width of the band in frames
        radius: usize,
    },
}

/// Alignment configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    // Feature extraction
    /// Feature strategy (default: Spectral)
    pub feature: FeatureStrategy,

    /// Frame size in samples (default: 2048)
    pub frame_size: usize,

    /// Hop size in samples (default: 512)
    pub hop_size: usize,

    /// Number of cepstral coefficients kept per frame (default: 20)
    /// Only used by the spectral strategy
    pub n_coefficients: usize,

    /// Number of mel bands feeding the DCT (default: 40)
    pub n_mels: usize,

    // Preprocessing
    /// Sample rate the analysis copies are resampled to (default: None)
    ///
    /// `None` leaves matching rates untouched and resamples both inputs to
    /// the lower rate when they differ.
    pub target_sample_rate: Option<u32>,

    // DTW
    /// Frame distance (default: Manhattan)
    pub distance: DistanceMetric,

    /// DTW evaluation window (default: Full)
    pub window: DtwWindow,

    // Offset selection
    /// Percentile of the warping path indices used as start frame (default: 10.0)
    pub offset_percentile: f32,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            feature: FeatureStrategy::Spectral,
            frame_size: 2048,
            hop_size: 512,
            n_coefficients: 20,
            n_mels: 40,
            target_sample_rate: None,
            distance: DistanceMetric::Manhattan,
            window: DtwWindow::Full,
            offset_percentile: DEFAULT_OFFSET_PERCENTILE,
        }
    }
}

impl AlignConfig {
    /// Check every parameter
    ///
    /// # Errors
    ///
    /// Returns `AlignError::ConfigurationError` naming the first bad parameter.
    pub fn validate(&self) -> Result<(), AlignError> {
        if self.frame_size == 0 {
            return Err(AlignError::ConfigurationError(
                "Frame size must be > 0".to_string(),
            ));
        }
        if self.hop_size == 0 {
            return Err(AlignError::ConfigurationError(
                "Hop size must be > 0".to_string(),
            ));
        }
        if self.feature == FeatureStrategy::Spectral {
            if self.n_mels == 0 {
                return Err(AlignError::ConfigurationError(
                    "Mel band count must be > 0".to_string(),
                ));
            }
            if self.n_coefficients == 0 || self.n_coefficients > self.n_mels {
                return Err(AlignError::ConfigurationError(format!(
                    "Coefficient count must be in 1..={} (mel bands), got {}",
                    self.n_mels, self.n_coefficients
                )));
            }
        }
        if self.target_sample_rate == Some(0) {
            return Err(AlignError::ConfigurationError(
                "Target sample rate must be > 0".to_string(),
            ));
        }
        if let DtwWindow::SakoeChiba { radius: 0 } = self.window {
            return Err(AlignError::ConfigurationError(
                "Sakoe-Chiba radius must be > 0".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.offset_percentile) {
            return Err(AlignError::ConfigurationError(format!(
                "Offset percentile must be in [0, 100], got {}",
                self.offset_percentile
            )));
        }
        Ok(())
    }
}

/// Check a requested trim duration against the supported range
///
/// # Errors
///
/// Returns `AlignError::ConfigurationError` if `trim_seconds` is not finite
/// or lies outside [`MIN_TRIM_SECONDS`, `MAX_TRIM_SECONDS`].
pub fn validate_trim_seconds(trim_seconds: f32) -> Result<(), AlignError> {
    if !trim_seconds.is_finite() || !(MIN_TRIM_SECONDS..=MAX_TRIM_SECONDS).contains(&trim_seconds)
    {
        return Err(AlignError::ConfigurationError(format!(
            "Trim duration must be within {}..={} seconds, got {}",
            MIN_TRIM_SECONDS, MAX_TRIM_SECONDS, trim_seconds
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offset_percentile() {
        assert_eq!(AlignConfig::default().offset_percentile, DEFAULT_OFFSET_PERCENTILE);
        assert_eq!(DEFAULT_OFFSET_PERCENTILE, 10.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AlignConfig::default().validate().is_ok());
    }

    #[test]
    fn test_feature_strategy_from_str() {
        assert_eq!("energy".parse::<FeatureStrategy>().unwrap(), FeatureStrategy::Energy);
        assert_eq!(" MFCC ".parse::<FeatureStrategy>().unwrap(), FeatureStrategy::Spectral);
        assert_eq!("spectral".parse::<FeatureStrategy>().unwrap(), FeatureStrategy::Spectral);

        let err = "chroma".parse::<FeatureStrategy>().unwrap_err();
        assert!(matches!(err, AlignError::ConfigurationError(_)));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let bad = [
            AlignConfig { frame_size: 0, ..Default::default() },
            AlignConfig { hop_size: 0, ..Default::default() },
            AlignConfig { n_coefficients: 41, ..Default::default() },
            AlignConfig { target_sample_rate: Some(0), ..Default::default() },
            AlignConfig { window: DtwWindow::SakoeChiba { radius: 0 }, ..Default::default() },
            AlignConfig { offset_percentile: 100.5, ..Default::default() },
            AlignConfig { offset_percentile: f32::NAN, ..Default::default() },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(AlignError::ConfigurationError(_))),
                "config should be rejected: {:?}",
                config
            );
        }
    }

    #[test]
    fn test_energy_ignores_cepstral_settings() {
        let config = AlignConfig {
            feature: FeatureStrategy::Energy,
            n_coefficients: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trim_seconds_range() {
        assert!(validate_trim_seconds(5.0).is_ok());
        assert!(validate_trim_seconds(DEFAULT_TRIM_SECONDS).is_ok());
        assert!(validate_trim_seconds(120.0).is_ok());
        assert!(validate_trim_seconds(4.9).is_err());
        assert!(validate_trim_seconds(120.1).is_err());
        assert!(validate_trim_seconds(f32::INFINITY).is_err());
    }
}
