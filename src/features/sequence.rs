//! Frame-indexed feature vectors

use crate::error::AlignError;

/// Number of full frames of `frame_size` samples, `hop_size` apart, in `len` samples
///
/// Partial trailing frames are dropped, so inputs shorter than one frame
/// have zero frames. `hop_size` must be non-zero.
pub fn frame_count(len: usize, frame_size: usize, hop_size: usize) -> usize {
    if frame_size == 0 || len < frame_size {
        0
    } else {
        (len - frame_size) / hop_size + 1
    }
}

/// Ordered sequence of fixed-dimension feature vectors
///
/// Frame `i` was computed from samples `[i * hop_size, i * hop_size + frame_size)`
/// of a waveform at `sample_rate`. Vectors are stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSequence {
    data: Vec<f32>,
    dimension: usize,
    frame_size: usize,
    hop_size: usize,
    sample_rate: u32,
}

impl FeatureSequence {
    /// Build a sequence from row-major vectors of length `dimension`
    ///
    /// # Errors
    ///
    /// Returns `AlignError::InvalidInput` if `dimension` is zero or
    /// `data.len()` is not a multiple of it.
    pub fn from_flat(
        data: Vec<f32>,
        dimension: usize,
        frame_size: usize,
        hop_size: usize,
        sample_rate: u32,
    ) -> Result<Self, AlignError> {
        if dimension == 0 {
            return Err(AlignError::InvalidInput(
                "Feature dimension must be > 0".to_string(),
            ));
        }
        if data.len() % dimension != 0 {
            return Err(AlignError::InvalidInput(format!(
                "Feature data of {} values is not a multiple of dimension {}",
                data.len(),
                dimension
            )));
        }
        Ok(Self {
            data,
            dimension,
            frame_size,
            hop_size,
            sample_rate,
        })
    }

    /// Empty sequence carrying the framing parameters
    ///
    /// # Errors
    ///
    /// Returns `AlignError::InvalidInput` if `dimension` is zero.
    pub fn empty(
        dimension: usize,
        frame_size: usize,
        hop_size: usize,
        sample_rate: u32,
    ) -> Result<Self, AlignError> {
        Self::from_flat(Vec::new(), dimension, frame_size, hop_size, sample_rate)
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    /// True if no frame was extracted
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values per frame
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Frame size in samples
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Hop size in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Sample rate of the waveform the features were computed from
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Feature vector of frame `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn frame(&self, index: usize) -> &[f32] {
        let start = index * self.dimension;
        &self.data[start..start + self.dimension]
    }

    /// Iterate over feature vectors in frame order
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(self.dimension)
    }

    /// Flat row-major storage
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }
}
