//! HDF5 containers opened from disk through libhdf5

use super::source::{Dataset, H5Source};
use crate::error::{MorphError, Result};
use std::path::Path;

/// An HDF5 file on disk
///
/// Numeric datasets of any stored type are converted to `f64` on read.
/// One-dimensional datasets read as a single column.
pub struct H5File {
    file: hdf5::File,
}

impl H5File {
    /// Open an existing file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = hdf5::File::open(path).map_err(|e| {
            MorphError::Format(format!("cannot open HDF5 file '{}': {}", path.display(), e))
        })?;
        Ok(H5File { file })
    }
}

impl H5Source for H5File {
    fn has_dataset(&self, path: &str) -> bool {
        // libhdf5 errors on a missing intermediate group, so test each prefix
        let mut prefix = String::with_capacity(path.len());
        for part in path.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);
            if !self.file.link_exists(&prefix) {
                return false;
            }
        }
        self.file.dataset(path).is_ok()
    }

    fn read_dataset(&self, path: &str) -> Result<Dataset> {
        let dataset = self
            .file
            .dataset(path)
            .map_err(|e| MorphError::Format(format!("missing dataset '{}': {}", path, e)))?;

        let columns = match dataset.shape().as_slice() {
            [_] => 1,
            [_, columns] => *columns,
            shape => {
                return Err(MorphError::Format(format!(
                    "dataset '{}' has shape {:?}, expected one or two dimensions",
                    path, shape
                )))
            }
        };

        let values = dataset
            .read_raw::<f64>()
            .map_err(|e| MorphError::Format(format!("cannot read dataset '{}': {}", path, e)))?;
        Dataset::new(columns, values)
    }
}
