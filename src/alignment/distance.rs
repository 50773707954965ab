//! Frame-to-frame distance functions for DTW

use crate::config::DistanceMetric;

/// Local distance between two feature vectors of equal dimension
///
/// Implementations must return non-negative values. DTW cost is only
/// symmetric in its arguments if the distance is.
///
/// Any `Fn(&[f32], &[f32]) -> f32` closure is a `FrameDistance`, which keeps
/// tests independent of the feature strategy:
///
/// ```
/// use stratum_align::alignment::distance::FrameDistance;
///
/// let abs_diff = |a: &[f32], b: &[f32]| (a[0] - b[0]).abs();
/// assert_eq!(abs_diff.distance(&[1.0], &[4.0]), 3.0);
/// ```
pub trait FrameDistance {
    /// Distance between `a` and `b`
    fn distance(&self, a: &[f32], b: &[f32]) -> f32;
}

impl<F> FrameDistance for F
where
    F: Fn(&[f32], &[f32]) -> f32,
{
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        self(a, b)
    }
}

/// L1 norm of the difference
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl FrameDistance for Manhattan {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// L-infinity norm of the difference
#[derive(Debug, Clone, Copy, Default)]
pub struct Chebyshev;

impl FrameDistance for Chebyshev {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0f32, f32::max)
    }
}

impl FrameDistance for DistanceMetric {
    #[inline]
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::Manhattan => Manhattan.distance(a, b),
            DistanceMetric::Chebyshev => Chebyshev.distance(a, b),
        }
    }
}
