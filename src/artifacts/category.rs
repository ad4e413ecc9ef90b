//! Artifact categories and their fixed subdirectories

use std::fmt;

/// Kind of artifact written under a run directory.
///
/// Each category owns one subdirectory, created on first write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Hyperparameters, one file per key.
    Parameters,
    /// Evaluation results, one file per key.
    Metrics,
    /// The serialized model and its metadata.
    Model,
    /// CSV exports of tabular data.
    Datasets,
    /// Rendered line plots.
    PerformanceGraphs,
}

impl Category {
    /// Every category, in layout order.
    pub const ALL: [Self; 5] = [
        Self::Parameters,
        Self::Metrics,
        Self::Model,
        Self::Datasets,
        Self::PerformanceGraphs,
    ];

    /// Subdirectory name under the run directory.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Metrics => "metrics",
            Self::Model => "artifacts",
            Self::Datasets => "datasets",
            Self::PerformanceGraphs => "performance_graphs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_lives_in_artifacts() {
        assert_eq!(Category::Model.dir_name(), "artifacts");
    }

    #[test]
    fn test_dir_names_unique() {
        let mut names: Vec<_> = Category::ALL.iter().map(|c| c.dir_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Category::ALL.len());
    }
}
