//! Onset detection
//!
//! Seam between the audio front end and the chart core. A `Detector` consumes
//! a decoded sample buffer and produces a chronological onset list; the chart
//! core treats the amplitude scale as opaque.

mod spectral;

pub use spectral::SpectralFluxDetector;

use crate::audio::SampleBuffer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),
}

/// A detected onset: a sudden rise in signal energy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onset {
    /// Seconds from the start of the stream
    pub time: f32,

    /// Onset strength, non-negative, on a detector-specific scale
    pub amplitude: f32,
}

/// Onset detector settings
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// FFT window size in samples (power of two)
    pub window_size: usize,

    /// Advance between analysis frames in samples
    pub hop_size: usize,

    /// Sensitivity of peak picking: the detection threshold is
    /// `mean(flux) + activation_threshold * std(flux)`. Lower values
    /// detect more onsets.
    pub activation_threshold: f32,

    /// Minimum time between reported onsets in milliseconds
    pub min_gap_ms: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 512,
            activation_threshold: 1.5,
            min_gap_ms: 30.0,
        }
    }
}

impl DetectorConfig {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), DetectError> {
        if !self.window_size.is_power_of_two() || !(256..=16384).contains(&self.window_size) {
            return Err(DetectError::InvalidConfig(format!(
                "window size must be a power of two between 256 and 16384, got {}",
                self.window_size
            )));
        }
        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(DetectError::InvalidConfig(format!(
                "hop size must be between 1 and the window size, got {}",
                self.hop_size
            )));
        }
        if !self.activation_threshold.is_finite() || self.activation_threshold <= 0.0 {
            return Err(DetectError::InvalidConfig(format!(
                "activation threshold must be positive, got {}",
                self.activation_threshold
            )));
        }
        if !self.min_gap_ms.is_finite() || self.min_gap_ms < 0.0 {
            return Err(DetectError::InvalidConfig(format!(
                "minimum onset gap must be non-negative, got {}",
                self.min_gap_ms
            )));
        }
        Ok(())
    }
}

/// Trait for onset detectors
pub trait Detector {
    /// Detect onsets in `audio`, ordered by time
    fn detect(&self, audio: &SampleBuffer) -> Result<Vec<Onset>, DetectError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_power_of_two_window() {
        let config = DetectorConfig {
            window_size: 1000,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_hop_larger_than_window() {
        let config = DetectorConfig {
            hop_size: 4096,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let config = DetectorConfig {
            activation_threshold: 0.0,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_gap() {
        let config = DetectorConfig {
            min_gap_ms: -1.0,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
