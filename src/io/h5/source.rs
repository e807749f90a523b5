//! Dataset access for HDF5 morphology containers

use crate::error::{MorphError, Result};
use indexmap::IndexMap;

/// A row-major 2D numeric table, as stored in an HDF5 dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: usize,
    values: Vec<f64>,
}

impl Dataset {
    /// Create a dataset from flat row-major values
    pub fn new(columns: usize, values: Vec<f64>) -> Result<Self> {
        if columns == 0 || values.len() % columns != 0 {
            return Err(MorphError::Format(format!(
                "{} values do not fill rows of {} columns",
                values.len(),
                columns
            )));
        }
        Ok(Dataset { columns, values })
    }

    /// Create a dataset from equally sized rows; `N` must be positive
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> Self {
        assert!(N > 0, "dataset rows need at least one column");
        Dataset {
            columns: N,
            values: rows.iter().flatten().copied().collect(),
        }
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.values.len() / self.columns
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row `index`
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.columns;
        &self.values[start..start + self.columns]
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> std::slice::Chunks<'_, f64> {
        self.values.chunks(self.columns)
    }

    /// Fail unless every row has at least `min` columns
    pub(crate) fn require_columns(&self, name: &str, min: usize) -> Result<()> {
        if self.columns < min {
            return Err(MorphError::Format(format!(
                "dataset '{}' has {} columns, expected at least {}",
                name, self.columns, min
            )));
        }
        Ok(())
    }
}

/// An opened HDF5 container exposing datasets by path.
///
/// Decoding the container itself is left to the implementor; the readers in
/// this module only need named 2D numeric tables.
pub trait H5Source {
    /// Whether a dataset exists at `path` (e.g. `neuron1/structure/raw`)
    fn has_dataset(&self, path: &str) -> bool;

    /// Read the dataset at `path`
    fn read_dataset(&self, path: &str) -> Result<Dataset>;
}

impl<S: H5Source + ?Sized> H5Source for &S {
    fn has_dataset(&self, path: &str) -> bool {
        (**self).has_dataset(path)
    }

    fn read_dataset(&self, path: &str) -> Result<Dataset> {
        (**self).read_dataset(path)
    }
}

/// In-memory HDF5 container, datasets kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryH5 {
    datasets: IndexMap<String, Dataset>,
}

impl MemoryH5 {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a dataset
    pub fn insert(&mut self, path: impl Into<String>, dataset: Dataset) {
        self.datasets.insert(path.into(), dataset);
    }

    /// Builder form of [`MemoryH5::insert`]
    pub fn with_dataset(mut self, path: impl Into<String>, dataset: Dataset) -> Self {
        self.insert(path, dataset);
        self
    }

    /// Dataset paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }
}

impl H5Source for MemoryH5 {
    fn has_dataset(&self, path: &str) -> bool {
        self.datasets.contains_key(path)
    }

    fn read_dataset(&self, path: &str) -> Result<Dataset> {
        self.datasets
            .get(path)
            .cloned()
            .ok_or_else(|| MorphError::Format(format!("missing dataset '{}'", path)))
    }
}
