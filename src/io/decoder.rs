//! Audio decoding using Symphonia
//!
//! Decodes WAV, MP3 or FLAC into a mono [`Waveform`], downmixing with a
//! caller-chosen [`ChannelMixMode`] and keeping the stream's true sample rate.
//! The downmix runs once over the whole stream, so `Dominant` keeps the same
//! channel throughout.

use super::AudioFormat;
use crate::error::AlignError;
use crate::preprocessing::channel_mixer::{downmix_interleaved, ChannelMixMode};
use crate::waveform::Waveform;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an in-memory audio file
///
/// # Arguments
///
/// * `bytes` - Complete file contents
/// * `format` - Declared container format, used as a probe hint
/// * `mix` - How multi-channel audio is reduced to mono
///
/// # Errors
///
/// Returns `AlignError::DecodingError` if the data cannot be probed or
/// decoded, or contains no samples.
pub fn decode_audio_bytes(
    bytes: Vec<u8>,
    format: Option<AudioFormat>,
    mix: ChannelMixMode,
) -> Result<Waveform, AlignError> {
    let mut hint = Hint::new();
    if let Some(format) = format {
        hint.with_extension(format.extension());
    }
    decode_source(Box::new(Cursor::new(bytes)), hint, mix)
}

/// Decode an audio file from disk
///
/// The file extension is used as a probe hint.
///
/// # Errors
///
/// Returns `AlignError::DecodingError` if the file cannot be opened or decoded.
pub fn decode_audio_file(
    path: impl AsRef<Path>,
    mix: ChannelMixMode,
) -> Result<Waveform, AlignError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let file = File::open(path).map_err(|e| {
        AlignError::DecodingError(format!("Cannot open {}: {}", path.display(), e))
    })?;

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }
    decode_source(Box::new(file), hint, mix)
}

fn decode_source(
    source: Box<dyn MediaSource>,
    hint: Hint,
    mix: ChannelMixMode,
) -> Result<Waveform, AlignError> {
    let mss = MediaSourceStream::new(source, Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AlignError::DecodingError(format!("Unsupported or corrupt audio: {}", e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AlignError::DecodingError("No supported audio tracks found".to_string()))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AlignError::DecodingError(format!("Cannot create decoder: {}", e)))?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut channels: Option<usize> = None;
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(AlignError::DecodingError(format!(
                    "Error reading packet: {}",
                    e
                )))
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let packet_channels = spec.channels.count();
                sample_rate.get_or_insert(spec.rate);
                if *channels.get_or_insert(packet_channels) != packet_channels {
                    return Err(AlignError::DecodingError(format!(
                        "Channel count changed mid-stream ({} -> {})",
                        channels.unwrap_or(0),
                        packet_channels
                    )));
                }

                let buf = sample_buf.get_or_insert_with(|| {
                    SampleBuffer::<f32>::new(decoded.capacity() as u64, spec)
                });
                if buf.capacity() < decoded.frames() * packet_channels {
                    *buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                }
                buf.copy_interleaved_ref(decoded);

                interleaved.extend_from_slice(buf.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                // Corrupted packets are skipped
                log::warn!("Skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => {
                return Err(AlignError::DecodingError(format!("Decode failed: {}", e)));
            }
        }
    }

    let sample_rate = sample_rate
        .ok_or_else(|| AlignError::DecodingError("Stream has no sample rate".to_string()))?;
    let channels = channels.unwrap_or(1);
    if interleaved.is_empty() {
        return Err(AlignError::DecodingError(
            "Stream contains no audio samples".to_string(),
        ));
    }
    let mono = downmix_interleaved(&interleaved, channels, mix)
        .map_err(|e| AlignError::DecodingError(e.to_string()))?;

    log::debug!(
        "Decoded {} mono samples at {} Hz ({:.2} s) from {} channel(s), mix={:?}",
        mono.len(),
        sample_rate,
        mono.len() as f32 / sample_rate as f32,
        channels,
        mix
    );

    Waveform::new(mono, sample_rate).map_err(|e| AlignError::DecodingError(e.to_string()))
}
