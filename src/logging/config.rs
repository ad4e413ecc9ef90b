//! Logger configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for [`LogWriter`](super::LogWriter).
///
/// Missing fields fall back to [`LoggerConfig::default`] when deserialized.
///
/// ```rust
/// use ml_logwriter::logging::LoggerConfig;
///
/// let config = LoggerConfig::from_json_str(r#"{ "log_file": "train.log", "ansi": false }"#)?;
/// assert_eq!(config.level_directive(), "debug");
/// assert!(!config.ansi_enabled());
/// # Ok::<(), ml_logwriter::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    log_file: PathBuf,
    level: String,
    ansi: bool,
    console: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("ml-logwriter.log"),
            level: "debug".to_string(),
            ansi: true,
            console: true,
        }
    }
}

impl LoggerConfig {
    /// Default configuration writing to `log_file`.
    #[must_use]
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid JSON for this type
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Set the minimum level, as an `EnvFilter` directive (e.g. `"info"`).
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enable or disable console colors.
    #[must_use]
    pub const fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Enable or disable the console sink.
    #[must_use]
    pub const fn console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Path of the log file.
    #[must_use]
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Minimum level directive.
    #[must_use]
    pub fn level_directive(&self) -> &str {
        &self.level
    }

    /// Whether console output is colored.
    #[must_use]
    pub const fn ansi_enabled(&self) -> bool {
        self.ansi
    }

    /// Whether the console sink is active.
    #[must_use]
    pub const fn console_enabled(&self) -> bool {
        self.console
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::new("run.log");
        assert_eq!(config.log_file(), Path::new("run.log"));
        assert_eq!(config.level_directive(), "debug");
        assert!(config.ansi_enabled());
        assert!(config.console_enabled());
    }

    #[test]
    fn test_builder() {
        let config = LoggerConfig::new("run.log").level("warn").ansi(false).console(false);
        assert_eq!(config.level_directive(), "warn");
        assert!(!config.ansi_enabled());
        assert!(!config.console_enabled());
    }

    #[test]
    fn test_partial_json() {
        let config = LoggerConfig::from_json_str(r#"{"level": "info"}"#).unwrap();
        assert_eq!(config.level_directive(), "info");
        assert_eq!(config.log_file(), Path::new("ml-logwriter.log"));
    }

    #[test]
    fn test_bad_json() {
        let err = LoggerConfig::from_json_str("{ level: ").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
