//! # ml-logwriter: artifact and log writer for ML experiments
//!
//! Two independent pieces:
//!
//! - [`logging::LogWriter`] sends `tracing` events to a plain-text log file
//!   and a severity-colored console, both in the line format
//!   `<timestamp> - <LEVEL> - <message> (<file>:<line>)`.
//! - [`artifacts::LogArtifacts`] creates one directory per run and writes
//!   parameters, metrics, a serialized model, CSV datasets and performance
//!   graphs into fixed subdirectories of it.
//!
//! All writes are synchronous. Failures come back as [`Error`]; only
//! [`Error::Validation`] is meant to be handled and carried past.
//!
//! ## Example
//!
//! ```rust
//! use ml_logwriter::artifacts::LogArtifacts;
//! use ml_logwriter::logging::{LogWriter, LoggerConfig};
//!
//! # let root = tempfile::tempdir()?;
//! let log = LogWriter::from_config(&LoggerConfig::new(root.path().join("train.log")))?;
//! let mut artifacts = LogArtifacts::new(root.path());
//!
//! log.in_scope(|| -> ml_logwriter::Result<()> {
//!     artifacts.create(Some("baseline"))?;
//!     artifacts.log_parameters([("lr", 0.01)])?;
//!     artifacts.log_metrics([("f1", 0.87)])?;
//!     Ok(())
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod artifacts;
pub mod error;
pub mod logging;
pub mod plot;

pub use error::{Error, Result};

#[doc(hidden)]
pub use tracing as __private_tracing;
