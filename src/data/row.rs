//! One measured point of a reconstruction

use crate::types::{PointType, Vector3};
use std::fmt;

/// Parent ID marking a root row
pub const ROOT_PARENT: i64 = -1;

/// A measured point: position, radius, type and tree linkage.
///
/// Every format unpacker produces rows of this exact shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
    pub point_type: PointType,
    pub id: i64,
    /// ID of the parent row, negative for a root
    pub parent_id: i64,
}

impl Row {
    /// Create a new row
    pub fn new(
        position: Vector3,
        radius: f64,
        point_type: PointType,
        id: i64,
        parent_id: i64,
    ) -> Self {
        Row {
            x: position.x,
            y: position.y,
            z: position.z,
            radius,
            point_type,
            id,
            parent_id,
        }
    }

    /// Position of the point
    pub fn position(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Whether the parent ID is the root sentinel
    pub fn has_root_parent(&self) -> bool {
        self.parent_id < 0
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} at {} r={} parent={}",
            self.id,
            self.point_type,
            self.position(),
            self.radius,
            self.parent_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_position() {
        let row = Row::new(Vector3::new(1.0, 2.0, 3.0), 0.5, PointType::Axon, 4, 3);
        assert_eq!(row.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(row.x, 1.0);
        assert!(!row.has_root_parent());
    }

    #[test]
    fn test_root_sentinel() {
        let row = Row::new(Vector3::ZERO, 1.0, PointType::Soma, 1, ROOT_PARENT);
        assert!(row.has_root_parent());
    }
}
