//! Run directories and experiment artifacts
//!
//! ```text
//! LogArtifacts (root) ──< Run (root/<name>)
//!                              ├── parameters/        one file per key
//!                              ├── metrics/           one file per key
//!                              ├── artifacts/         model.pkl + meta.yaml
//!                              ├── datasets/          <name>.csv
//!                              └── performance_graphs/<filename>.png
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ml_logwriter::artifacts::LogArtifacts;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Sample {
//!     feature: f64,
//!     label: u8,
//! }
//!
//! # let root = tempfile::tempdir()?;
//! let mut artifacts = LogArtifacts::new(root.path());
//! let run = artifacts.create(None)?.clone();
//!
//! artifacts.log_parameters([("epochs", 10)])?;
//! artifacts.log_dataset(vec![Sample { feature: 0.5, label: 1 }], "train")?;
//! artifacts.log_performance_graph(&[1, 2, 3], &[0.9, 0.6, 0.4], "loss", "epoch", "loss", "loss")?;
//!
//! assert!(run.path().join("datasets/train.csv").exists());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod category;
mod model;
mod naming;
mod run;
mod store;
mod value;

pub use category::Category;
pub use model::{current_user, JsonSerializer, ModelMeta, ModelSerializer, META_FILE, MODEL_FILE};
pub use naming::{random_run_name, validate_name, RANDOM_NAME_BITS};
pub use run::Run;
pub use store::LogArtifacts;
pub use value::render_value;
