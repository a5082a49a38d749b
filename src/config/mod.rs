//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::Result;
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<NotechartConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: NotechartConfig = serde_yaml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let yaml = r#"
detector:
  window_size: 1024
  hop_size: 256
  activation_threshold: 2.0
  min_gap_ms: 50.0

chart:
  amplitude_upper_bound: 60
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.detector.window_size, 1024);
        assert_eq!(config.detector.hop_size, 256);
        assert_eq!(config.chart.amplitude_upper_bound, 60);
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let yaml = r#"
detector:
  hop_size: 0
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_config(Path::new("/no/such/notechart.yaml")).is_err());
    }
}
