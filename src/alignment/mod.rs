//! Alignment modules
//!
//! Finds where two feature sequences match:
//! - Frame distances (`FrameDistance` trait, L1 and L-infinity)
//! - Dynamic time warping over a full grid or a Sakoe-Chiba band
//! - Warping path and result types
//! - Percentile-based start-frame selection

pub mod distance;
pub mod dtw;
pub mod offset;
pub mod path;

pub use distance::FrameDistance;
pub use dtw::compute_dtw;
pub use offset::select_offsets;
pub use path::{AlignmentResult, WarpPath};
