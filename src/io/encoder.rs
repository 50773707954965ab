//! WAV encoding using hound

use crate::error::AlignError;
use crate::waveform::Waveform;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

/// Sample encoding of written WAV files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavEncoding {
    /// 16-bit signed PCM, samples clipped to [-1, 1]
    #[default]
    Pcm16,
    /// 32-bit IEEE float, samples written unchanged
    Float32,
}

impl WavEncoding {
    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        let (bits_per_sample, sample_format) = match self {
            WavEncoding::Pcm16 => (16, hound::SampleFormat::Int),
            WavEncoding::Float32 => (32, hound::SampleFormat::Float),
        };
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

/// Encode a waveform as a mono WAV file in memory
///
/// # Errors
///
/// Returns `AlignError::EncodingError` if hound rejects the data.
pub fn encode_wav(waveform: &Waveform, encoding: WavEncoding) -> Result<Vec<u8>, AlignError> {
    let mut cursor = Cursor::new(Vec::new());
    write_to(&mut cursor, waveform, encoding)?;
    Ok(cursor.into_inner())
}

/// Write a waveform to a mono WAV file on disk
///
/// # Errors
///
/// Returns `AlignError::EncodingError` if the file cannot be created or written.
pub fn write_wav(
    path: impl AsRef<Path>,
    waveform: &Waveform,
    encoding: WavEncoding,
) -> Result<(), AlignError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| {
        AlignError::EncodingError(format!("Cannot create {}: {}", path.display(), e))
    })?;
    let mut writer = std::io::BufWriter::new(file);
    write_to(&mut writer, waveform, encoding)?;
    log::debug!(
        "Wrote {} samples at {} Hz to {}",
        waveform.len(),
        waveform.sample_rate(),
        path.display()
    );
    Ok(())
}

fn write_to<W: Write + Seek>(
    sink: W,
    waveform: &Waveform,
    encoding: WavEncoding,
) -> Result<(), AlignError> {
    let encoding_error = |e: hound::Error| AlignError::EncodingError(e.to_string());

    let mut writer =
        hound::WavWriter::new(sink, encoding.spec(waveform.sample_rate())).map_err(encoding_error)?;

    match encoding {
        WavEncoding::Pcm16 => {
            for &s in waveform.samples() {
                let value = (s.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16;
                writer.write_sample(value).map_err(encoding_error)?;
            }
        }
        WavEncoding::Float32 => {
            for &s in waveform.samples() {
                writer.write_sample(s).map_err(encoding_error)?;
            }
        }
    }

    writer.finalize().map_err(encoding_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pcm16_header_and_size() {
        let w = Waveform::new(vec![0.0, 0.5, -0.5, 1.0], 16000).unwrap();
        let bytes = encode_wav(&w, WavEncoding::Pcm16).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 44-byte canonical header + 2 bytes per sample
        assert_eq!(bytes.len(), 44 + 4 * 2);

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 16000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
    }

    #[test]
    fn test_pcm16_clips_out_of_range() {
        let w = Waveform::new(vec![2.0, -3.0], 8000).unwrap();
        let bytes = encode_wav(&w, WavEncoding::Pcm16).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
    }

    #[test]
    fn test_float32_is_lossless() {
        let original = vec![0.123f32, -0.456, 0.789];
        let w = Waveform::new(original.clone(), 22050).unwrap();
        let bytes = encode_wav(&w, WavEncoding::Float32).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, original);
    }
}
