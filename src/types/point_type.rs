//! Point classification of morphology samples

use bitflags::bitflags;
use std::fmt;

/// Structure a measured point belongs to
///
/// Codes follow the SWC convention. Anything outside `0..=6` is kept as
/// [`PointType::Custom`] with its original code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointType {
    #[default]
    Undefined,
    Soma,
    Axon,
    BasalDendrite,
    ApicalDendrite,
    ForkPoint,
    EndPoint,
    /// User-defined or unknown code
    Custom(i64),
}

impl PointType {
    /// Create a point type from its numeric code
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => PointType::Undefined,
            1 => PointType::Soma,
            2 => PointType::Axon,
            3 => PointType::BasalDendrite,
            4 => PointType::ApicalDendrite,
            5 => PointType::ForkPoint,
            6 => PointType::EndPoint,
            c => PointType::Custom(c),
        }
    }

    /// Create a point type from a numeric table cell (truncates)
    pub fn from_value(value: f64) -> Self {
        Self::from_code(value as i64)
    }

    /// Numeric code
    pub fn code(&self) -> i64 {
        match self {
            PointType::Undefined => 0,
            PointType::Soma => 1,
            PointType::Axon => 2,
            PointType::BasalDendrite => 3,
            PointType::ApicalDendrite => 4,
            PointType::ForkPoint => 5,
            PointType::EndPoint => 6,
            PointType::Custom(c) => *c,
        }
    }

    /// Axon or dendrite
    pub fn is_neurite(&self) -> bool {
        matches!(
            self,
            PointType::Axon | PointType::BasalDendrite | PointType::ApicalDendrite
        )
    }

    /// Filter flag matching this type, empty for types a filter cannot name
    pub fn filter_flag(&self) -> TypeFilter {
        match self {
            PointType::Undefined => TypeFilter::UNDEFINED,
            PointType::Soma => TypeFilter::SOMA,
            PointType::Axon => TypeFilter::AXON,
            PointType::BasalDendrite => TypeFilter::BASAL_DENDRITE,
            PointType::ApicalDendrite => TypeFilter::APICAL_DENDRITE,
            PointType::ForkPoint | PointType::EndPoint | PointType::Custom(_) => {
                TypeFilter::CUSTOM
            }
        }
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointType::Undefined => write!(f, "Undefined"),
            PointType::Soma => write!(f, "Soma"),
            PointType::Axon => write!(f, "Axon"),
            PointType::BasalDendrite => write!(f, "BasalDendrite"),
            PointType::ApicalDendrite => write!(f, "ApicalDendrite"),
            PointType::ForkPoint => write!(f, "ForkPoint"),
            PointType::EndPoint => write!(f, "EndPoint"),
            PointType::Custom(c) => write!(f, "Custom({})", c),
        }
    }
}

bitflags! {
    /// Set of point types, used to select neurites by the type of their root.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFilter: u8 {
        const UNDEFINED = 1;
        const SOMA = 2;
        const AXON = 4;
        const BASAL_DENDRITE = 8;
        const APICAL_DENDRITE = 16;
        /// Fork/end markers and user-defined codes.
        const CUSTOM = 32;
        /// All axon and dendrite kinds.
        const NEURITES = Self::AXON.bits() | Self::BASAL_DENDRITE.bits() | Self::APICAL_DENDRITE.bits();
    }
}

impl TypeFilter {
    /// Whether `point_type` is in the set
    pub fn matches(&self, point_type: PointType) -> bool {
        self.intersects(point_type.filter_flag())
    }
}

impl Default for TypeFilter {
    fn default() -> Self {
        TypeFilter::NEURITES
    }
}

impl From<PointType> for TypeFilter {
    fn from(point_type: PointType) -> Self {
        point_type.filter_flag()
    }
}
