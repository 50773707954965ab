//! Audio I/O collaborators
//!
//! Decoding (Symphonia) and WAV encoding (hound) around the engine. The
//! aligner itself only sees in-memory [`crate::Waveform`]s.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode_audio_bytes, decode_audio_file};
pub use encoder::{encode_wav, write_wav, WavEncoding};
pub use crate::preprocessing::channel_mixer::ChannelMixMode;

use crate::error::AlignError;
use std::str::FromStr;

/// Declared container format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// RIFF WAVE
    Wav,
    /// MPEG-1/2 Layer III
    Mp3,
    /// Free Lossless Audio Codec
    Flac,
}

impl AudioFormat {
    /// Canonical file extension
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
        }
    }
}

impl FromStr for AudioFormat {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "wav" | "wave" => Ok(AudioFormat::Wav),
            "mp3" => Ok(AudioFormat::Mp3),
            "flac" => Ok(AudioFormat::Flac),
            other => Err(AlignError::DecodingError(format!(
                "Unsupported audio format '{}'",
                other
            ))),
        }
    }
}
