//! Pipeline configuration file support.
//!
//! Every setting defaults to the constant the customer dataset was cleaned
//! with, so an empty `cleaning.toml` (or no file at all) reproduces the fixed
//! behavior.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CleaningError, CleaningResult};

/// Pipeline configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub fill: FillSettings,
}

/// Half-open row range `[start, end)` kept by the window stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_start")]
    pub start: usize,
    #[serde(default = "default_window_end")]
    pub end: usize,
}

/// Null-fill settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSettings {
    #[serde(default = "default_gender_sentinel")]
    pub gender_sentinel: String,
}

fn default_window_start() -> usize {
    1
}

fn default_window_end() -> usize {
    1070
}

fn default_gender_sentinel() -> String {
    "U".to_string()
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            start: default_window_start(),
            end: default_window_end(),
        }
    }
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            gender_sentinel: default_gender_sentinel(),
        }
    }
}

impl WindowSettings {
    /// Number of rows the window spans.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CleaningConfig {
    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml_str(content: &str) -> CleaningResult<Self> {
        let config: CleaningConfig = toml::from_str(content).map_err(|e| {
            CleaningError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(CleaningConfig)` if the file parses and validates
    /// * `Err(CleaningError::Io)` if it cannot be read
    /// * `Err(CleaningError::Configuration)` if it cannot be parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> CleaningResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `cleaning.toml` in the current directory, then
    /// `rust_backend/`, then the parent directory. Falls back to the built-in
    /// defaults when none exists.
    pub fn from_default_location() -> CleaningResult<Self> {
        let search_paths = [
            PathBuf::from("cleaning.toml"),
            PathBuf::from("rust_backend/cleaning.toml"),
            PathBuf::from("../cleaning.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::debug!("Loading cleaning config from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check settings that serde alone cannot enforce.
    pub fn validate(&self) -> CleaningResult<()> {
        if self.window.start > self.window.end {
            return Err(CleaningError::Configuration(format!(
                "window.start ({}) must not exceed window.end ({})",
                self.window.start, self.window.end
            )));
        }

        if self.fill.gender_sentinel.is_empty() {
            return Err(CleaningError::Configuration(
                "fill.gender_sentinel must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults_match_dataset_constants() {
        let config = CleaningConfig::default();
        assert_eq!(config.window.start, 1);
        assert_eq!(config.window.end, 1070);
        assert_eq!(config.window.len(), 1069);
        assert_eq!(config.fill.gender_sentinel, "U");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = CleaningConfig::from_toml_str("").unwrap();
        assert_eq!(config, CleaningConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = CleaningConfig::from_toml_str(
            r#"
            [window]
            end = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.window.start, 1);
        assert_eq!(config.window.end, 10);
        assert_eq!(config.fill.gender_sentinel, "U");
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let err = CleaningConfig::from_toml_str(
            r#"
            [window]
            start = 20
            end = 10
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CleaningError::Configuration(_)));
    }

    #[test]
    fn test_empty_sentinel_is_rejected() {
        let err = CleaningConfig::from_toml_str(
            r#"
            [fill]
            gender_sentinel = ""
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CleaningError::Configuration(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[fill]\ngender_sentinel = \"X\"").unwrap();

        let config = CleaningConfig::from_file(file.path()).unwrap();
        assert_eq!(config.fill.gender_sentinel, "X");
        assert_eq!(config.window, WindowSettings::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CleaningConfig::from_file("/nonexistent/cleaning.toml").unwrap_err();
        assert!(
            matches!(&err, CleaningError::Io(e) if e.kind() == std::io::ErrorKind::NotFound),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let err = CleaningConfig::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, CleaningError::Io(_)));
    }

    /// `from_default_location` reads the process working directory, so tests
    /// that change it take this lock.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let result = f();
        std::env::set_current_dir(previous).unwrap();
        result
    }

    #[test]
    fn test_default_location_without_file_uses_defaults() {
        // Nested so neither "." nor ".." holds a cleaning.toml
        let root = TempDir::new().unwrap();
        let work = root.path().join("work");
        std::fs::create_dir(&work).unwrap();

        let config = in_dir(&work, CleaningConfig::from_default_location).unwrap();
        assert_eq!(config, CleaningConfig::default());
    }

    #[test]
    fn test_default_location_reads_current_directory() {
        let root = TempDir::new().unwrap();
        let work = root.path().join("work");
        std::fs::create_dir(&work).unwrap();
        std::fs::write(
            work.join("cleaning.toml"),
            "[window]\nstart = 0\nend = 5\n\n[fill]\ngender_sentinel = \"N\"\n",
        )
        .unwrap();

        let config = in_dir(&work, CleaningConfig::from_default_location).unwrap();
        assert_eq!(config.window.start, 0);
        assert_eq!(config.window.end, 5);
        assert_eq!(config.fill.gender_sentinel, "N");
    }
}
