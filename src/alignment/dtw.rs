//! Dynamic time warping
//!
//! Classic DTW over an `(N+1) x (M+1)` accumulated-cost grid:
//!
//! ```text
//! D[0][0] = 0,  D[i][0] = D[0][j] = inf
//! D[i][j] = d(A[i-1], B[j-1]) + min(D[i-1][j-1], D[i-1][j], D[i][j-1])
//! ```
//!
//! The path is recovered by walking back from `(N, M)` to the origin,
//! always moving to the cheapest predecessor. Ties prefer the diagonal,
//! then the vertical step `(i-1, j)`, then the horizontal step `(i, j-1)`,
//! so the output is deterministic.
//!
//! With [`DtwWindow::SakoeChiba`] only a band around the scaled diagonal is
//! evaluated and stored; cells outside the band behave as infinite.
//!
//! # Reference
//!
//! Sakoe, H., & Chiba, S. (1978). Dynamic programming algorithm optimization
//! for spoken word recognition. *IEEE Transactions on Acoustics, Speech, and
//! Signal Processing*, 26(1), 43-49.

use super::distance::FrameDistance;
use super::path::{AlignmentResult, WarpPath};
use crate::config::DtwWindow;
use crate::error::AlignError;
use crate::features::FeatureSequence;

/// Accumulated-cost grid storing only the evaluated span of each row
struct CostGrid {
    /// Inclusive column span `(lo, hi)` of rows `1..=n`, 1-based columns
    spans: Vec<(usize, usize)>,
    /// Offset of each row's first stored cell in `cells`
    offsets: Vec<usize>,
    cells: Vec<f64>,
}

impl CostGrid {
    fn new(spans: Vec<(usize, usize)>) -> Self {
        let mut offsets = Vec::with_capacity(spans.len());
        let mut total = 0;
        for &(lo, hi) in &spans {
            offsets.push(total);
            total += hi + 1 - lo;
        }
        Self {
            spans,
            offsets,
            cells: vec![f64::INFINITY; total],
        }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f64 {
        if i == 0 || j == 0 {
            return if i == 0 && j == 0 { 0.0 } else { f64::INFINITY };
        }
        let (lo, hi) = self.spans[i - 1];
        if j < lo || j > hi {
            f64::INFINITY
        } else {
            self.cells[self.offsets[i - 1] + j - lo]
        }
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: f64) {
        let (lo, _) = self.spans[i - 1];
        let offset = self.offsets[i - 1];
        self.cells[offset + j - lo] = value;
    }
}

/// Column spans evaluated for each row `1..=n`
///
/// The Sakoe-Chiba band follows the diagonal scaled to `m / n`. It is
/// widened where needed so that every row is reachable from the previous
/// one and both `(1, 1)` and `(n, m)` lie inside it.
fn row_spans(n: usize, m: usize, window: DtwWindow) -> Vec<(usize, usize)> {
    let radius = match window {
        DtwWindow::Full => return vec![(1, m); n],
        DtwWindow::SakoeChiba { radius } => radius as f64,
    };

    let slope = m as f64 / n as f64;
    let mut spans: Vec<(usize, usize)> = Vec::with_capacity(n);
    for i in 1..=n {
        let center = i as f64 * slope;
        let mut lo = ((center - radius).ceil().max(1.0) as usize).min(m);
        let mut hi = ((center + radius).floor() as usize).min(m);

        match spans.last() {
            None => lo = 1,
            Some(&(_, prev_hi)) => lo = lo.min(prev_hi + 1),
        }
        if i == n {
            hi = m;
        }
        hi = hi.max(lo);
        spans.push((lo, hi));
    }
    spans
}

/// Compute the minimum-cost warping path between two feature sequences
///
/// # Arguments
///
/// * `a` - Feature sequence A (length N)
/// * `b` - Feature sequence B (length M)
/// * `distance` - Frame distance, must be non-negative
/// * `window` - Full grid or Sakoe-Chiba band
///
/// # Returns
///
/// `AlignmentResult` with a path from `(0, 0)` to `(N-1, M-1)` and the
/// accumulated cost `D[N][M]`
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` if either sequence is empty, the
/// feature dimensions differ, or the accumulated cost is not finite (NaN or
/// infinite features or distances)
///
/// # Performance
///
/// O(N·M) time and memory for the full grid, O(N·radius) with a band.
///
/// # Example
///
/// ```
/// use stratum_align::alignment::dtw::compute_dtw;
/// use stratum_align::config::DtwWindow;
/// use stratum_align::features::FeatureSequence;
///
/// let a = FeatureSequence::from_flat(vec![0.0, 1.0, 2.0], 1, 1, 1, 1)?;
/// let b = FeatureSequence::from_flat(vec![0.0, 0.0, 1.0, 2.0], 1, 1, 1, 1)?;
/// let abs_diff = |x: &[f32], y: &[f32]| (x[0] - y[0]).abs();
///
/// let result = compute_dtw(&a, &b, &abs_diff, DtwWindow::Full)?;
/// assert_eq!(result.cost, 0.0);
/// assert_eq!(result.path.idx_a(), &[0, 0, 1, 2]);
/// assert_eq!(result.path.idx_b(), &[0, 1, 2, 3]);
/// # Ok::<(), stratum_align::AlignError>(())
/// ```
pub fn compute_dtw<D>(
    a: &FeatureSequence,
    b: &FeatureSequence,
    distance: &D,
    window: DtwWindow,
) -> Result<AlignmentResult, AlignError>
where
    D: FrameDistance + ?Sized,
{
    if a.is_empty() || b.is_empty() {
        return Err(AlignError::InvalidInput(format!(
            "Cannot align empty feature sequences (A: {} frames, B: {} frames)",
            a.len(),
            b.len()
        )));
    }
    if a.dimension() != b.dimension() {
        return Err(AlignError::InvalidInput(format!(
            "Feature dimension mismatch: A={}, B={}",
            a.dimension(),
            b.dimension()
        )));
    }

    let n = a.len();
    let m = b.len();
    let mut grid = CostGrid::new(row_spans(n, m, window));

    log::debug!(
        "DTW: {} x {} frames, window={:?}, {} cells",
        n,
        m,
        window,
        grid.cells.len()
    );

    for i in 1..=n {
        let frame_a = a.frame(i - 1);
        let (lo, hi) = grid.spans[i - 1];
        for j in lo..=hi {
            let best = grid
                .get(i - 1, j - 1)
                .min(grid.get(i - 1, j))
                .min(grid.get(i, j - 1));
            let local = distance.distance(frame_a, b.frame(j - 1)) as f64;
            grid.set(i, j, local + best);
        }
    }

    let cost = grid.get(n, m);
    if !cost.is_finite() {
        return Err(AlignError::InvalidInput(format!(
            "DTW cost is not finite ({}), features contain NaN or infinite values",
            cost
        )));
    }
    let path = backtrack(&grid, n, m);

    log::debug!("DTW cost {:.4} over {} path steps", cost, path.len());

    Ok(AlignmentResult { path, cost })
}

/// Walk back from `(n, m)` to the origin
fn backtrack(grid: &CostGrid, n: usize, m: usize) -> WarpPath {
    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);

    loop {
        steps.push((i - 1, j - 1));

        let candidates = [(i - 1, j - 1), (i - 1, j), (i, j - 1)];
        let mut next = candidates[0];
        let mut next_cost = grid.get(next.0, next.1);
        for &(ci, cj) in &candidates[1..] {
            let c = grid.get(ci, cj);
            if c < next_cost {
                next = (ci, cj);
                next_cost = c;
            }
        }

        if next == (0, 0) {
            break;
        }
        (i, j) = next;
    }

    steps.reverse();
    WarpPath::from_steps(&steps)
}
