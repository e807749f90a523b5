//! Geometric morphometrics over points, segments and sections
//!
//! Segments are treated as conical frusta between two sample points, using
//! the radii at both ends.

use crate::data::Row;
use crate::sections::{Section, Segment};
use crate::types::Vector3;
use std::f64::consts::PI;

/// Euclidean distance between two positions
pub fn point_dist(a: &Vector3, b: &Vector3) -> f64 {
    a.distance(b)
}

/// Length of a segment
pub fn segment_length((a, b): Segment<'_>) -> f64 {
    point_dist(&a.position(), &b.position())
}

/// Lateral surface area of the frustum spanned by a segment
pub fn segment_area((a, b): Segment<'_>) -> f64 {
    let h = segment_length((a, b));
    let dr = a.radius - b.radius;
    PI * (a.radius + b.radius) * (dr * dr + h * h).sqrt()
}

/// Volume of the frustum spanned by a segment
pub fn segment_volume((a, b): Segment<'_>) -> f64 {
    let h = segment_length((a, b));
    PI * h * (a.radius * a.radius + a.radius * b.radius + b.radius * b.radius) / 3.0
}

fn aggregate_segments(section: &Section<'_>, f: impl Fn(Segment<'_>) -> f64) -> f64 {
    section.segments().map(f).sum()
}

/// Summed segment lengths of a section
pub fn section_length(section: &Section<'_>) -> f64 {
    aggregate_segments(section, segment_length)
}

/// Summed lateral segment areas of a section
pub fn section_area(section: &Section<'_>) -> f64 {
    aggregate_segments(section, segment_area)
}

/// Summed segment volumes of a section
pub fn section_volume(section: &Section<'_>) -> f64 {
    aggregate_segments(section, segment_volume)
}

/// Distance of a section end from a fixed origin.
///
/// Measures from the section's last point unless `use_start_point` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialDistance {
    pub origin: Vector3,
    pub use_start_point: bool,
}

impl RadialDistance {
    /// Measure from the last point of each section
    pub fn new(origin: Vector3) -> Self {
        RadialDistance {
            origin,
            use_start_point: false,
        }
    }

    /// Measure from the first point of each section
    pub fn from_start(origin: Vector3) -> Self {
        RadialDistance {
            origin,
            use_start_point: true,
        }
    }

    /// Point of `section` this measure uses
    pub fn reference_point<'a>(&self, section: &Section<'a>) -> &'a Row {
        if self.use_start_point {
            section.first()
        } else {
            section.last()
        }
    }

    /// Radial distance of `section`
    pub fn measure(&self, section: &Section<'_>) -> f64 {
        point_dist(&self.origin, &self.reference_point(section).position())
    }
}
