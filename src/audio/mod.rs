//! Audio decoding
//!
//! Seam between the chart pipeline and concrete codecs. A `Decoder` turns a
//! file path into a normalized PCM buffer; the rest of the pipeline never
//! touches the container format.

mod wav;

pub use wav::WavDecoder;

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read WAV file: {0}")]
    WavRead(#[from] hound::Error),

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
}

/// Decoded PCM audio, normalized to f32 in [-1.0, 1.0]
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    /// Interleaved samples
    pub samples: Vec<f32>,

    /// Sample rate in Hz (e.g., 44100, 48000)
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
}

impl SampleBuffer {
    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Mix down to mono by averaging channels
    pub fn to_mono(&self) -> Vec<f32> {
        if self.channels <= 1 {
            return self.samples.clone();
        }

        let channels = self.channels as usize;
        let frames = self.frame_count();
        let mut mono = Vec::with_capacity(frames);

        for frame in 0..frames {
            let mut sum = 0.0;
            for ch in 0..channels {
                sum += self.samples[frame * channels + ch];
            }
            mono.push(sum / channels as f32);
        }

        mono
    }
}

/// Trait for audio decoders
pub trait Decoder {
    /// Decode the file at `path` into a normalized sample buffer
    fn open(&self, path: &Path) -> Result<SampleBuffer, AudioError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mono_averages_channels() {
        let buffer = SampleBuffer {
            samples: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            sample_rate: 44100,
            channels: 2,
        };

        let mono = buffer.to_mono();

        assert_eq!(mono.len(), 3);
        assert!((mono[0] - 0.15).abs() < 1e-6);
        assert!((mono[1] - 0.35).abs() < 1e-6);
        assert!((mono[2] - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_to_mono_passthrough_for_mono_input() {
        let buffer = SampleBuffer {
            samples: vec![0.1, -0.2, 0.3],
            sample_rate: 44100,
            channels: 1,
        };

        assert_eq!(buffer.to_mono(), buffer.samples);
    }

    #[test]
    fn test_duration() {
        let buffer = SampleBuffer {
            samples: vec![0.0; 44100 * 2],
            sample_rate: 44100,
            channels: 2,
        };

        assert_eq!(buffer.frame_count(), 44100);
        assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
    }
}
