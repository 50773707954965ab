//! Error types for the alignment engine

use std::fmt;

/// Errors that can occur while aligning and trimming audio
#[derive(Debug, Clone, PartialEq)]
pub enum AlignError {
    /// Invalid input data (empty audio, zero sample rate, empty feature sequence, ...)
    InvalidInput(String),

    /// Invalid configuration (trim duration out of range, unknown feature strategy, ...)
    ConfigurationError(String),

    /// Audio decoding error
    DecodingError(String),

    /// Audio encoding error
    EncodingError(String),
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AlignError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AlignError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            AlignError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for AlignError {}
