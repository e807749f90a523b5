//! Core value types: positions, extents and point classification

mod bounds;
mod point_type;
mod vector;

pub use bounds::BoundingBox3D;
pub use point_type::{PointType, TypeFilter};
pub use vector::Vector3;
