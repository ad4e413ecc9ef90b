//! Artifact store - run directories and the files written into them

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::model::{JsonSerializer, ModelMeta, ModelSerializer, META_FILE, MODEL_FILE};
use super::naming::{random_run_name, validate_name};
use super::value::render_value;
use super::{Category, Run};
use crate::plot::LinePlot;
use crate::{Error, Result};

/// Writes experiment artifacts under a root directory, one subdirectory per run.
///
/// ## Layout
///
/// ```text
/// root/<run>/
///     parameters/<key>
///     metrics/<key>
///     artifacts/model.pkl
///     artifacts/meta.yaml
///     datasets/<name>.csv
///     performance_graphs/<filename>.png
/// ```
///
/// Category directories are created on first write. Parameter, metric and
/// model metadata files are never overwritten.
///
/// ## Example
///
/// ```rust
/// use ml_logwriter::artifacts::LogArtifacts;
///
/// # let root = tempfile::tempdir()?;
/// let mut artifacts = LogArtifacts::new(root.path());
/// artifacts.create(Some("baseline"))?;
///
/// artifacts.log_parameters([("lr", 0.01), ("momentum", 0.9)])?;
/// artifacts.log_metrics([("accuracy", 0.93)])?;
///
/// let lr = std::fs::read_to_string(root.path().join("baseline/parameters/lr"))?;
/// assert_eq!(lr, "0.01");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LogArtifacts {
    root: PathBuf,
    run: Option<Run>,
}

impl LogArtifacts {
    /// Store rooted at `root`. Nothing is touched on disk yet.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            run: None,
        }
    }

    /// Root directory holding all runs.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Active run, if `create` or `load` has been called.
    #[must_use]
    pub const fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    /// Name of the active run.
    #[must_use]
    pub fn run_name(&self) -> Option<&str> {
        self.run.as_ref().map(Run::name)
    }

    /// Directory of the active run.
    #[must_use]
    pub fn run_path(&self) -> Option<&Path> {
        self.run.as_ref().map(Run::path)
    }

    /// Create a run directory and make it active.
    ///
    /// With `None`, the name is a random hex digest.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if `name` is not a single path component
    /// - [`Error::DirectoryExists`] if `root/<name>` already exists
    /// - [`Error::Io`] if the directory cannot be created (e.g. missing root)
    pub fn create(&mut self, name: Option<&str>) -> Result<&Run> {
        let name = match name {
            Some(name) => {
                validate_name(name)?;
                let path = self.root.join(name);
                if fs::symlink_metadata(&path).is_ok() {
                    warn!(path = %path.display(), "run directory already exists");
                    return Err(Error::DirectoryExists(path));
                }
                name.to_string()
            }
            None => random_run_name(),
        };

        let path = self.root.join(&name);
        fs::create_dir(&path).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                Error::DirectoryExists(path.clone())
            } else {
                Error::io(&path, e)
            }
        })?;
        info!(run = %name, "created run directory {}", path.display());

        Ok(&*self.run.insert(Run::new(name, path)))
    }

    /// Make `root/<name>` the active run without touching the filesystem.
    ///
    /// A run that does not exist surfaces as an IO error on the next write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if `name` is not a single path component
    pub fn load(&mut self, name: &str) -> Result<&Run> {
        validate_name(name)?;
        let path = self.root.join(name);
        debug!(run = %name, "loaded run {}", path.display());
        Ok(&*self.run.insert(Run::new(name, path)))
    }

    /// Write each parameter to `parameters/<key>`.
    ///
    /// Values are rendered with [`render_value`](super::render_value).
    /// Returns the written paths in input order.
    ///
    /// # Errors
    ///
    /// - [`Error::NoActiveRun`] before `create`/`load`
    /// - [`Error::InvalidName`] for an unusable key (nothing is written)
    /// - [`Error::AlreadyLogged`] if a key was logged before; earlier keys
    ///   of the same call stay written
    pub fn log_parameters<I, K, V>(&self, params: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        self.log_entries(Category::Parameters, params)
    }

    /// Write each metric to `metrics/<key>`.
    ///
    /// Same rules as [`log_parameters`](Self::log_parameters).
    ///
    /// # Errors
    ///
    /// See [`log_parameters`](Self::log_parameters)
    pub fn log_metrics<I, K, V>(&self, metrics: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        self.log_entries(Category::Metrics, metrics)
    }

    /// Serialize `model` as JSON to `artifacts/model.pkl` and write `meta.yaml`.
    ///
    /// # Errors
    ///
    /// See [`log_model_with`](Self::log_model_with)
    pub fn log_model<M: Serialize + ?Sized>(&self, model: &M) -> Result<ModelMeta> {
        self.log_model_with(&JsonSerializer::new(), model)
    }

    /// Persist `model` with `serializer` alongside its metadata sidecar.
    ///
    /// The model is serialized in memory and `meta.yaml` is claimed before
    /// `model.pkl` is touched, so a refused call leaves both files as they
    /// were. A leftover `model.pkl` without `meta.yaml` is replaced.
    ///
    /// # Errors
    ///
    /// - [`Error::NoActiveRun`] before `create`/`load`
    /// - [`Error::AlreadyLogged`] if `meta.yaml` exists
    /// - serialization or IO failures
    pub fn log_model_with<S, M>(&self, serializer: &S, model: &M) -> Result<ModelMeta>
    where
        S: ModelSerializer,
        M: Serialize + ?Sized,
    {
        let mut bytes = Vec::new();
        serializer.write_model(model, &mut bytes)?;

        let dir = self.ensure_category(Category::Model)?;
        let meta = ModelMeta::for_current_user();
        create_exclusive(&dir.join(META_FILE), meta.to_yaml().as_bytes())?;

        let model_path = dir.join(MODEL_FILE);
        fs::write(&model_path, &bytes).map_err(|e| Error::io(&model_path, e))?;

        info!(user = meta.created_by(), "logged model {}", model_path.display());
        Ok(meta)
    }

    /// Write `rows` to `datasets/<name>.csv`.
    ///
    /// The header comes from the row type's field names; there is no index
    /// column. An existing file with the same name is replaced.
    ///
    /// The header is taken from the first row, so an empty `rows` produces
    /// an empty file with no header line.
    ///
    /// # Errors
    ///
    /// - [`Error::NoActiveRun`] before `create`/`load`
    /// - [`Error::InvalidName`] for an unusable `name`
    /// - CSV or IO failures
    pub fn log_dataset<I, R>(&self, rows: I, name: &str) -> Result<PathBuf>
    where
        I: IntoIterator<Item = R>,
        R: Serialize,
    {
        validate_name(name)?;
        let dir = self.ensure_category(Category::Datasets)?;
        let path = dir.join(format!("{name}.csv"));

        let mut writer = csv::Writer::from_path(&path)?;
        let mut count = 0usize;
        for row in rows {
            writer.serialize(row)?;
            count += 1;
        }
        writer.flush().map_err(|e| Error::io(&path, e))?;

        info!(rows = count, "logged dataset {}", path.display());
        Ok(path)
    }

    /// Render a line plot of `y` against `x` to `performance_graphs/<filename>.png`.
    ///
    /// Inputs are checked before anything is written.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `x` and `y` differ in length
    /// - [`Error::InvalidName`] for an unusable `filename`
    /// - [`Error::NoActiveRun`] before `create`/`load`
    /// - [`Error::Plot`], PNG encoding or IO failures
    pub fn log_performance_graph<X, Y>(
        &self,
        x: &[X],
        y: &[Y],
        title: &str,
        x_label: &str,
        y_label: &str,
        filename: &str,
    ) -> Result<PathBuf>
    where
        X: Into<f64> + Copy,
        Y: Into<f64> + Copy,
    {
        let plot = LinePlot::new(x, y)?
            .title(title)
            .x_label(x_label)
            .y_label(y_label);
        validate_name(filename)?;

        let dir = self.ensure_category(Category::PerformanceGraphs)?;
        let path = dir.join(format!("{filename}.png"));
        plot.save_png(&path)?;

        info!(points = plot.points().len(), "logged performance graph {}", path.display());
        Ok(path)
    }

    fn active_run(&self) -> Result<&Run> {
        self.run.as_ref().ok_or(Error::NoActiveRun)
    }

    /// Category directory of the active run, created if missing.
    fn ensure_category(&self, category: Category) -> Result<PathBuf> {
        let dir = self.active_run()?.category_dir(category);
        match fs::create_dir(&dir) {
            Ok(()) => {
                debug!(category = %category, "created {}", dir.display());
                Ok(dir)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(dir),
            Err(e) => Err(Error::io(&dir, e)),
        }
    }

    fn log_entries<I, K, V>(&self, category: Category, entries: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        let rendered = entries
            .into_iter()
            .map(|(key, value)| -> Result<(String, String)> {
                let key = key.as_ref();
                validate_name(key)?;
                Ok((key.to_string(), render_value(&value)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let dir = self.ensure_category(category)?;
        let mut written = Vec::with_capacity(rendered.len());
        for (key, text) in rendered {
            let path = dir.join(&key);
            create_exclusive(&path, text.as_bytes())?;
            debug!(category = %category, key = %key, "logged {text}");
            written.push(path);
        }
        Ok(written)
    }
}

/// Write `contents` to a new file; an existing file is an [`Error::AlreadyLogged`].
fn create_exclusive(path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                warn!(path = %path.display(), "refusing to overwrite");
                Error::AlreadyLogged {
                    path: path.to_path_buf(),
                }
            } else {
                Error::io(path, e)
            }
        })?;
    file.write_all(contents).map_err(|e| Error::io(path, e))
}
