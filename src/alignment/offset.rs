//! Start-frame selection from a warping path
//!
//! The start of the matching region is taken as a low percentile of each
//! index list instead of the path's first step. The first steps are forced
//! by the grid corner rather than by content, so a percentile skips past
//! that edge. This is a heuristic: it does not guarantee the best offset,
//! and the percentile is configurable.

use super::path::WarpPath;
use crate::error::AlignError;

/// Percentile used when none is configured
pub const DEFAULT_OFFSET_PERCENTILE: f32 = 10.0;

/// Percentile of `values` with linear interpolation between order statistics
///
/// Uses rank `p / 100 * (n - 1)` on the sorted values. Returns `None` for an
/// empty slice.
pub fn percentile(values: &[usize], p: f32) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let rank = (p.clamp(0.0, 100.0) as f64 / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    let lo = sorted[lower] as f64;
    let hi = sorted[upper] as f64;
    Some(lo + (hi - lo) * frac)
}

/// Pick start frames `(start_a, start_b)` from a warping path
///
/// Each index list is reduced independently, so the two starts need not be
/// a pair that occurs on the path. Results are truncated towards zero and
/// always lie within the range of indices present on the path.
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` for an empty path and
/// `AlignError::ConfigurationError` if `percentile_value` is outside [0, 100].
pub fn select_offsets(path: &WarpPath, percentile_value: f32) -> Result<(usize, usize), AlignError> {
    if !(0.0..=100.0).contains(&percentile_value) {
        return Err(AlignError::ConfigurationError(format!(
            "Offset percentile must be in [0, 100], got {}",
            percentile_value
        )));
    }

    let start_a = percentile(path.idx_a(), percentile_value);
    let start_b = percentile(path.idx_b(), percentile_value);

    match (start_a, start_b) {
        (Some(a), Some(b)) => {
            let offsets = (a as usize, b as usize);
            log::debug!(
                "Offsets at p{}: A frame {}, B frame {}",
                percentile_value,
                offsets.0,
                offsets.1
            );
            Ok(offsets)
        }
        _ => Err(AlignError::InvalidInput(
            "Cannot select offsets from an empty warping path".to_string(),
        )),
    }
}
