//! Narration audio
//!
//! The speech endpoint returns raw signed 16-bit little-endian PCM, base64
//! encoded, at 24 kHz mono. This module decodes it and wraps it in a WAV
//! container the browser can play directly.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hound::{SampleFormat, WavSpec, WavWriter};
use thiserror::Error;

/// Sample rate of generated speech
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Channel count of generated speech
pub const SPEECH_CHANNELS: u16 = 1;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Invalid base64 audio payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PCM payload has odd length {0}")]
    OddLength(usize),

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Decoded PCM audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmAudio {
    /// Decode a base64 s16le payload from the speech endpoint
    pub fn from_base64(encoded: &str) -> Result<Self, AudioError> {
        let bytes = STANDARD.decode(encoded.trim())?;
        if bytes.len() % 2 != 0 {
            return Err(AudioError::OddLength(bytes.len()));
        }

        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            samples,
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: SPEECH_CHANNELS,
        })
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Encode as a 16-bit PCM WAV file
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, AudioError> {
        let spec = WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec)?;
            for sample in &self.samples {
                writer.write_sample(*sample)?;
            }
            writer.finalize()?;
        }

        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_little_endian_samples() {
        // 0x0000, 0x7fff, 0x8000, 0xffff
        let encoded = STANDARD.encode([0x00, 0x00, 0xff, 0x7f, 0x00, 0x80, 0xff, 0xff]);
        let audio = PcmAudio::from_base64(&encoded).unwrap();
        assert_eq!(audio.samples, vec![0, i16::MAX, i16::MIN, -1]);
        assert_eq!(audio.sample_rate, 24_000);
        assert_eq!(audio.channels, 1);
    }

    #[test]
    fn test_invalid_payloads() {
        assert!(matches!(
            PcmAudio::from_base64("not base64!"),
            Err(AudioError::Base64(_))
        ));
        let odd = STANDARD.encode([1u8, 2, 3]);
        assert!(matches!(
            PcmAudio::from_base64(&odd),
            Err(AudioError::OddLength(3))
        ));
    }

    #[test]
    fn test_wav_round_trip_through_reader() {
        let audio = PcmAudio {
            samples: vec![0, 1000, -1000, 32767],
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: SPEECH_CHANNELS,
        };
        let bytes = audio.to_wav_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");

        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 24_000);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, audio.samples);
    }

    #[test]
    fn test_duration() {
        let audio = PcmAudio {
            samples: vec![0; 48_000],
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: SPEECH_CHANNELS,
        };
        assert!((audio.duration_secs() - 2.0).abs() < f64::EPSILON);
    }
}
