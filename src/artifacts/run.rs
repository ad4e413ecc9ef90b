//! Active run handle

use std::path::{Path, PathBuf};

use super::Category;

/// A run directory under the artifact root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    name: String,
    path: PathBuf,
}

impl Run {
    pub(crate) fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Run name (the directory name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the run directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where artifacts of `category` are written.
    #[must_use]
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.path.join(category.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_dir() {
        let run = Run::new("r1", "/data/runs/r1");
        assert_eq!(run.name(), "r1");
        assert_eq!(
            run.category_dir(Category::PerformanceGraphs),
            PathBuf::from("/data/runs/r1/performance_graphs")
        );
    }
}
