//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::entities::analysis::is_valid_threshold;

/// Local config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".featsynth.yaml";

/// File extensions picked up by `featsynth batch` when none are configured
pub const DEFAULT_BATCH_EXTENSIONS: &[&str] = &["step", "stp", "stl", "iges", "igs"];

/// featsynth configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confidence threshold reported when a request does not carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// File extensions analyzed by `batch`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_extensions: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/featsynth/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./.featsynth.yaml)
        if let Some(local) = Self::read_file(&Self::local_config_path()) {
            config.merge(local);
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "featsynth")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to the local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// Read one config layer; missing or malformed files are skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(mut config) => {
                if let Some(threshold) = config.confidence_threshold {
                    if !is_valid_threshold(threshold) {
                        tracing::warn!(
                            path = %path.display(),
                            threshold,
                            "ignoring confidence_threshold outside 0..1"
                        );
                        config.confidence_threshold = None;
                    }
                }
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Apply FEATSYNTH_* environment overrides
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(threshold) = var("FEATSYNTH_CONFIDENCE_THRESHOLD") {
            match threshold.trim().parse::<f64>() {
                Ok(value) if is_valid_threshold(value) => self.confidence_threshold = Some(value),
                Ok(value) => tracing::warn!(
                    value,
                    "ignoring FEATSYNTH_CONFIDENCE_THRESHOLD outside 0..1"
                ),
                Err(_) => tracing::warn!(
                    value = %threshold,
                    "ignoring non-numeric FEATSYNTH_CONFIDENCE_THRESHOLD"
                ),
            }
        }
        if let Some(format) = var("FEATSYNTH_FORMAT") {
            self.default_format = Some(format);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.confidence_threshold.is_some() {
            self.confidence_threshold = other.confidence_threshold;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.batch_extensions.is_some() {
            self.batch_extensions = other.batch_extensions;
        }
    }

    /// Extensions for batch analysis, lowercase without the leading dot
    pub fn batch_extensions(&self) -> Vec<String> {
        match self.batch_extensions {
            Some(ref exts) => exts
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            None => DEFAULT_BATCH_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            confidence_threshold: Some(0.5),
            default_format: Some("yaml".to_string()),
            batch_extensions: None,
        };
        base.merge(Config {
            confidence_threshold: Some(0.8),
            default_format: None,
            batch_extensions: Some(vec!["stl".to_string()]),
        });

        assert_eq!(base.confidence_threshold, Some(0.8));
        assert_eq!(base.default_format.as_deref(), Some("yaml"));
        assert_eq!(base.batch_extensions, Some(vec!["stl".to_string()]));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("FEATSYNTH_CONFIDENCE_THRESHOLD", "0.65"),
            ("FEATSYNTH_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.confidence_threshold, Some(0.65));
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_bad_env_threshold_ignored() {
        let mut config = Config {
            confidence_threshold: Some(0.7),
            ..Default::default()
        };
        config.apply_env(|key| {
            (key == "FEATSYNTH_CONFIDENCE_THRESHOLD").then(|| "high".to_string())
        });
        assert_eq!(config.confidence_threshold, Some(0.7));
    }

    #[test]
    fn test_out_of_range_env_threshold_ignored() {
        for raw in ["NaN", "inf", "5", "-0.2"] {
            let mut config = Config {
                confidence_threshold: Some(0.7),
                ..Default::default()
            };
            config.apply_env(|key| {
                (key == "FEATSYNTH_CONFIDENCE_THRESHOLD").then(|| raw.to_string())
            });
            assert_eq!(config.confidence_threshold, Some(0.7), "raw {}", raw);
        }
    }

    #[test]
    fn test_out_of_range_file_threshold_dropped() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "confidence_threshold: 7.5
default_format: json
").unwrap();

        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.confidence_threshold, None);
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_read_file_layer() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(
            &path,
            "confidence_threshold: 0.9\nbatch_extensions: [\".STL\", step]\n",
        )
        .unwrap();

        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.confidence_threshold, Some(0.9));
        assert_eq!(config.batch_extensions(), vec!["stl", "step"]);

        assert!(Config::read_file(&tmp.path().join("missing.yaml")).is_none());
    }

    #[test]
    fn test_default_batch_extensions() {
        let config = Config::default();
        assert!(config.batch_extensions().contains(&"stp".to_string()));
    }
}
