//! Fixed-schema point table produced by every format unpacker

use super::row::Row;
use crate::types::{BoundingBox3D, PointType};
use std::fmt;

/// Source encoding a table was unpacked from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// SWC text point table
    Swc,
    /// HDF5 layout with `points` and `structure` at the root
    H5V1,
    /// HDF5 layout with per-stage tables under `neuron1`
    H5V2,
    /// Built in memory
    Memory,
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Swc => write!(f, "SWC"),
            DataFormat::H5V1 => write!(f, "H5V1"),
            DataFormat::H5V2 => write!(f, "H5V2"),
            DataFormat::Memory => write!(f, "Memory"),
        }
    }
}

/// The raw point table of a morphology.
///
/// Row `i` is expected to carry ID `id_offset + i`. The table does not
/// enforce this; see [`crate::check::has_sequential_ids`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawData {
    rows: Vec<Row>,
    id_offset: i64,
    format: DataFormat,
}

impl RawData {
    /// Create a table from unpacked rows
    pub fn new(rows: Vec<Row>, id_offset: i64, format: DataFormat) -> Self {
        RawData {
            rows,
            id_offset,
            format,
        }
    }

    /// Create an in-memory table, taking the offset from the first row
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let id_offset = rows.first().map_or(0, |r| r.id);
        RawData::new(rows, id_offset, DataFormat::Memory)
    }

    /// All rows in table order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate over rows in table order
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// ID of the first row
    pub fn id_offset(&self) -> i64 {
        self.id_offset
    }

    /// Encoding the table came from
    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Table position of `id`, if it falls inside `[offset, offset + len)`
    pub fn position_of(&self, id: i64) -> Option<usize> {
        let pos = id.checked_sub(self.id_offset)?;
        usize::try_from(pos).ok().filter(|&p| p < self.rows.len())
    }

    /// Row stored for `id`
    pub fn get(&self, id: i64) -> Option<&Row> {
        self.position_of(id).map(|p| &self.rows[p])
    }

    /// The ID column
    pub fn ids(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Rows of the given type
    pub fn rows_of_type(&self, point_type: PointType) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(move |r| r.point_type == point_type)
    }

    /// Extent of all sample positions
    pub fn bounding_box(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(self.rows.iter().map(Row::position))
    }
}

impl<'a> IntoIterator for &'a RawData {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
