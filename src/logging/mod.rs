//! Console + file logging
//!
//! A [`LogWriter`] owns a `tracing` dispatcher with two sinks sharing
//! [`LineFormat`]: a plain-text file and a severity-colored console.
//! Nothing global changes until [`LogWriter::install`] is called, and
//! that can only succeed once per process.
//!
//! ```rust,no_run
//! use ml_logwriter::logging::LogWriter;
//!
//! let log = LogWriter::logger("train.log")?;
//! log.install()?;
//!
//! tracing::info!("epoch finished");
//! ml_logwriter::critical!("dataset vanished");
//! # Ok::<(), ml_logwriter::Error>(())
//! ```

mod config;
mod format;

pub use config::LoggerConfig;
pub use format::{render_line, LineFormat, Severity, CRITICAL_FIELD, TIMESTAMP_FORMAT};

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{Error, Result};

/// Emit an ERROR event tagged as CRITICAL.
///
/// Accepts the same arguments as `tracing::error!`, including a leading
/// `target:`.
#[macro_export]
macro_rules! critical {
    (target: $target:expr, $($arg:tt)+) => {
        $crate::__private_tracing::error!(target: $target, critical = true, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::__private_tracing::error!(critical = true, $($arg)+)
    };
}

/// Handle to a configured logging setup.
///
/// Cloning is cheap; clones share the same sinks.
#[derive(Clone)]
pub struct LogWriter {
    dispatch: Dispatch,
    log_file: PathBuf,
}

impl std::fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogWriter")
            .field("log_file", &self.log_file)
            .finish_non_exhaustive()
    }
}

impl LogWriter {
    /// Log every severity from DEBUG up to `path` and to the console.
    ///
    /// # Errors
    ///
    /// Returns error if the log file cannot be opened
    pub fn logger(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_config(&LoggerConfig::new(path))
    }

    /// Build the sinks described by `config`.
    ///
    /// The log file is opened in append mode; missing parent directories
    /// are created.
    ///
    /// # Errors
    ///
    /// Returns error if the level directive is invalid or the log file
    /// cannot be opened
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let filter = EnvFilter::try_new(config.level_directive()).map_err(|e| {
            Error::InvalidConfig(format!(
                "log level {:?}: {e}",
                config.level_directive()
            ))
        })?;

        let log_file = config.log_file().to_path_buf();
        let file = open_log_file(&log_file)?;

        let file_layer = fmt::layer()
            .event_format(LineFormat::plain())
            .with_writer(Mutex::new(file));
        let console_layer = config.console_enabled().then(|| {
            fmt::layer()
                .event_format(LineFormat::colored(config.ansi_enabled()))
                .with_writer(std::io::stderr)
        });

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            log_file,
        })
    }

    /// Path of the file sink.
    #[must_use]
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Underlying dispatcher, for callers composing their own scopes.
    #[must_use]
    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Make this the process-wide default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LoggerInstalled`] if any global subscriber is already set
    pub fn install(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|_| Error::LoggerInstalled)
    }

    /// Run `f` with this logger as the current thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))
}
