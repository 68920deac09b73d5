//! User settings, persisted as JSON in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Environment variable overriding [`Settings::data_file`].
pub const DATA_FILE_ENV: &str = "OPS_DASHBOARD_DATA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Portfolio JSON file the CLI reads and writes.
    pub data_file: PathBuf,
    /// Delimiter used for cost-history CSV export.
    pub csv_delimiter: char,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let (_, data_dir) = Self::dirs();
        Self {
            data_file: data_dir.join("portfolio.json"),
            csv_delimiter: ';',
            log_filter: "ops_dashboard=info".into(),
        }
    }
}

impl Settings {
    /// Load settings from the default location and apply environment overrides.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::settings_path())?.with_env_overrides())
    }

    /// Apply `OPS_DASHBOARD_DATA` when it is set and non-blank.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var(DATA_FILE_ENV) {
            if !path.trim().is_empty() {
                self.data_file = PathBuf::from(path);
            }
        }
        self
    }

    /// A missing file yields defaults; an unparsable one is a [`DashboardError::Config`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let Ok(contents) = std::fs::read_to_string(path) else {
            return Ok(Self::default());
        };
        serde_json::from_str(&contents).map_err(|e| {
            DashboardError::Config(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The CSV delimiter as the single byte the csv writer expects.
    pub fn csv_delimiter_byte(&self) -> Result<u8> {
        if self.csv_delimiter.is_ascii() {
            Ok(self.csv_delimiter as u8)
        } else {
            Err(DashboardError::Config(format!(
                "CSV delimiter must be an ASCII character, got '{}'",
                self.csv_delimiter
            )))
        }
    }

    pub fn settings_path() -> PathBuf {
        Self::dirs().0.join("settings.json")
    }

    fn dirs() -> (PathBuf, PathBuf) {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "OpsDashboard") {
            (
                proj_dirs.config_dir().to_path_buf(),
                proj_dirs.data_dir().to_path_buf(),
            )
        } else {
            // Fallback
            (PathBuf::from("."), PathBuf::from("."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.data_file.ends_with("portfolio.json"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "csv_delimiter": "," }"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.csv_delimiter, ',');
        assert_eq!(settings.log_filter, "ops_dashboard=info");
    }

    #[test]
    fn garbage_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        match Settings::load_from(&path) {
            Err(DashboardError::Config(message)) => {
                assert!(message.contains("settings.json"));
            }
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        let settings = Settings {
            data_file: PathBuf::from("/tmp/ops.json"),
            csv_delimiter: '\t',
            log_filter: "debug".into(),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let settings = Settings {
            csv_delimiter: '；',
            ..Settings::default()
        };
        assert!(settings.csv_delimiter_byte().is_err());
        assert_eq!(Settings::default().csv_delimiter_byte().unwrap(), b';');
    }
}
