//! Model persistence and the metadata sidecar

use std::io::Write;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Result;

/// File holding the serialized model bytes.
pub const MODEL_FILE: &str = "model.pkl";

/// Sidecar with creation date and user.
pub const META_FILE: &str = "meta.yaml";

const META_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Turns a model object into bytes.
///
/// The store treats the output as opaque.
pub trait ModelSerializer {
    /// Write `model` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns error if the model cannot be encoded or written
    fn write_model<M, W>(&self, model: &M, writer: W) -> Result<()>
    where
        M: Serialize + ?Sized,
        W: Write;
}

/// Encodes models as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    pretty: bool,
}

impl JsonSerializer {
    /// Compact JSON.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented JSON.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ModelSerializer for JsonSerializer {
    fn write_model<M, W>(&self, model: &M, writer: W) -> Result<()>
    where
        M: Serialize + ?Sized,
        W: Write,
    {
        if self.pretty {
            serde_json::to_writer_pretty(writer, model)?;
        } else {
            serde_json::to_writer(writer, model)?;
        }
        Ok(())
    }
}

/// Who logged a model, and when.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelMeta {
    create_date: NaiveDateTime,
    created_by: String,
}

impl ModelMeta {
    /// Metadata stamped with the current local time.
    #[must_use]
    pub fn new(created_by: impl Into<String>) -> Self {
        Self {
            create_date: Local::now().naive_local(),
            created_by: created_by.into(),
        }
    }

    /// Metadata for the current OS user.
    #[must_use]
    pub fn for_current_user() -> Self {
        Self::new(current_user())
    }

    /// Local creation time.
    #[must_use]
    pub const fn create_date(&self) -> NaiveDateTime {
        self.create_date
    }

    /// User name recorded at creation.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// The two-line `meta.yaml` body.
    #[must_use]
    pub fn to_yaml(&self) -> String {
        format!(
            "create_date: {}\ncreated_by: {}\n",
            self.create_date.format(META_DATE_FORMAT),
            self.created_by
        )
    }
}

/// Login name from the environment, or `unknown`.
#[must_use]
pub fn current_user() -> String {
    user_from(|var| std::env::var(var).ok())
}

/// First non-empty of `USER`, `USERNAME`, `LOGNAME` as seen by `lookup`.
fn user_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| lookup(var).filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}
