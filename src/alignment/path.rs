//! Warping path and alignment result types

/// Alignment between two feature sequences
///
/// Holds equal-length index lists into sequence A and sequence B. Both are
/// non-decreasing and advance by at most one per step; the path starts at
/// `(0, 0)` and ends at `(len_a - 1, len_b - 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpPath {
    idx_a: Vec<usize>,
    idx_b: Vec<usize>,
}

impl WarpPath {
    /// Build a path from `(a, b)` steps in forward order
    pub(crate) fn from_steps(steps: &[(usize, usize)]) -> Self {
        let (idx_a, idx_b) = steps.iter().copied().unzip();
        Self { idx_a, idx_b }
    }

    /// Indices into sequence A
    pub fn idx_a(&self) -> &[usize] {
        &self.idx_a
    }

    /// Indices into sequence B
    pub fn idx_b(&self) -> &[usize] {
        &self.idx_b
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.idx_a.len()
    }

    /// True if the path has no steps
    pub fn is_empty(&self) -> bool {
        self.idx_a.is_empty()
    }

    /// Iterate over `(a, b)` index pairs
    pub fn steps(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.idx_a.iter().copied().zip(self.idx_b.iter().copied())
    }

    /// True if every step advances A, B or both by exactly one
    pub fn is_monotonic(&self) -> bool {
        self.steps().zip(self.steps().skip(1)).all(|((a0, b0), (a1, b1))| {
            let da = a1.wrapping_sub(a0);
            let db = b1.wrapping_sub(b0);
            da <= 1 && db <= 1 && da + db >= 1
        })
    }
}

/// Result of dynamic time warping
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Optimal warping path
    pub path: WarpPath,
    /// Accumulated distance along the path (lower = more similar)
    pub cost: f64,
}

impl AlignmentResult {
    /// Cost divided by the number of path steps
    pub fn normalized_cost(&self) -> f64 {
        if self.path.is_empty() {
            0.0
        } else {
            self.cost / self.path.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_steps() {
        let path = WarpPath::from_steps(&[(0, 0), (0, 1), (1, 2)]);
        assert_eq!(path.idx_a(), &[0, 0, 1]);
        assert_eq!(path.idx_b(), &[0, 1, 2]);
        assert_eq!(path.len(), 3);
        assert!(path.is_monotonic());
    }

    #[test]
    fn test_monotonic_check() {
        assert!(!WarpPath::from_steps(&[(0, 0), (2, 1)]).is_monotonic());
        assert!(!WarpPath::from_steps(&[(1, 1), (0, 2)]).is_monotonic());
        assert!(!WarpPath::from_steps(&[(1, 1), (1, 1)]).is_monotonic());
    }

    #[test]
    fn test_normalized_cost() {
        let result = AlignmentResult {
            path: WarpPath::from_steps(&[(0, 0), (1, 1)]),
            cost: 3.0,
        };
        assert_eq!(result.normalized_cost(), 1.5);
    }
}
