//! WAV decoder
//!
//! Reads WAV files via hound and normalizes integer and float PCM to f32.

use super::{AudioError, Decoder, SampleBuffer};
use hound::{SampleFormat, WavReader};
use std::path::Path;

/// WAV file decoder
pub struct WavDecoder;

impl Decoder for WavDecoder {
    fn open(&self, path: &Path) -> Result<SampleBuffer, AudioError> {
        let mut reader = WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 8) => {
                // 8-bit PCM is unsigned in WAV, hound exposes it centered
                reader
                    .samples::<i32>()
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .map(|s| s as f32 / 128.0)
                    .collect()
            }
            (SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|s| s as f32 / 32768.0)
                .collect(),
            (SampleFormat::Int, 24) => reader
                .samples::<i32>()
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|s| s as f32 / 8_388_608.0)
                .collect(),
            (SampleFormat::Int, 32) => reader
                .samples::<i32>()
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|s| s as f32 / 2_147_483_648.0)
                .collect(),
            (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
            (format, bits) => {
                return Err(AudioError::UnsupportedFormat(format!(
                    "{:?} {}-bit audio",
                    format, bits
                )));
            }
        };

        log::debug!(
            "decoded {:?}: {} samples, {} Hz, {} channel(s)",
            path,
            samples.len(),
            spec.sample_rate,
            spec.channels
        );

        Ok(SampleBuffer {
            samples,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }
}
