//! Configuration schema definitions

use crate::chart::ClassifierConfig;
use crate::onset::DetectorConfig;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for notechart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotechartConfig {
    /// Onset detector settings
    #[serde(default)]
    pub detector: DetectorSettings,

    /// Chart classification settings
    #[serde(default)]
    pub chart: ChartSettings,
}

impl NotechartConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.detector.window_size.is_power_of_two()
            || !(256..=16384).contains(&self.detector.window_size)
        {
            bail!("Window size must be a power of two between 256 and 16384");
        }
        if self.detector.hop_size == 0 || self.detector.hop_size > self.detector.window_size {
            bail!("Hop size must be between 1 and the window size");
        }
        if self.detector.activation_threshold <= 0.0 {
            bail!("Activation threshold must be positive");
        }
        if self.detector.min_gap_ms < 0.0 {
            bail!("Minimum onset gap must be non-negative");
        }
        if self.chart.amplitude_upper_bound < 0 {
            bail!("Amplitude upper bound must be non-negative");
        }
        Ok(())
    }
}

/// Onset detector settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// FFT window size in samples (default: 2048)
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Advance between analysis frames in samples (default: 512)
    #[serde(default = "default_hop_size")]
    pub hop_size: usize,

    /// Peak-picking sensitivity (default: 1.5); usually overridden by
    /// the --sensitivity flag
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: f32,

    /// Minimum time between reported onsets in milliseconds (default: 30)
    #[serde(default = "default_min_gap_ms")]
    pub min_gap_ms: f64,
}

fn default_window_size() -> usize { 2048 }
fn default_hop_size() -> usize { 512 }
fn default_activation_threshold() -> f32 { 1.5 }
fn default_min_gap_ms() -> f64 { 30.0 }

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            hop_size: default_hop_size(),
            activation_threshold: default_activation_threshold(),
            min_gap_ms: default_min_gap_ms(),
        }
    }
}

impl DetectorSettings {
    /// Build the detector configuration
    pub fn to_detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            window_size: self.window_size,
            hop_size: self.hop_size,
            activation_threshold: self.activation_threshold,
            min_gap_ms: self.min_gap_ms,
        }
    }
}

/// Chart classification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Onsets louder than this become unbounded notes (default: 50)
    #[serde(default = "default_upper_bound")]
    pub amplitude_upper_bound: i32,
}

fn default_upper_bound() -> i32 { ClassifierConfig::DEFAULT_UPPER_BOUND }

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            amplitude_upper_bound: default_upper_bound(),
        }
    }
}

impl ChartSettings {
    /// Build the classifier configuration
    pub fn to_classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            amplitude_upper_bound: self.amplitude_upper_bound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: NotechartConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.detector.window_size, 2048);
        assert_eq!(config.detector.hop_size, 512);
        assert_eq!(config.chart.amplitude_upper_bound, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_detector_settings() {
        let yaml = r#"
detector:
  window_size: 4096
"#;
        let config: NotechartConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.detector.window_size, 4096);
        assert_eq!(config.detector.hop_size, 512); // default
    }

    #[test]
    fn test_chart_settings() {
        let yaml = r#"
chart:
  amplitude_upper_bound: 80
"#;
        let config: NotechartConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.chart.amplitude_upper_bound, 80);
        assert_eq!(config.chart.to_classifier_config().amplitude_upper_bound, 80);
    }

    #[test]
    fn test_validation_rejects_bad_window() {
        let config = NotechartConfig {
            detector: DetectorSettings {
                window_size: 1000,
                ..DetectorSettings::default()
            },
            chart: ChartSettings::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_upper_bound() {
        let config = NotechartConfig {
            detector: DetectorSettings::default(),
            chart: ChartSettings {
                amplitude_upper_bound: -1,
            },
        };
        assert!(config.validate().is_err());
    }
}
