//! # neuromorph
//!
//! A pure Rust library for reading neuron morphology reconstructions and
//! computing morphometrics over them.
//!
//! ## Features
//!
//! - Read SWC text files and HDF5 morphology layouts (V1 and staged V2);
//!   HDF5 files on disk need the `hdf5` feature
//! - Arena-indexed point tree with O(1) parent/children lookup
//! - Lazy section and segment iteration over neurites, neurons and populations
//! - Section length, area, volume and radial distance
//! - Structural checks reported as data, not errors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use neuromorph::{check, io::load_neuron, sections, TypeFilter};
//!
//! let neuron = load_neuron("cell.swc")?;
//!
//! // Inspect defects before trusting results
//! for defect in &check::report(neuron.tree().data()) {
//!     println!("{}", defect);
//! }
//!
//! // Section lengths of all dendrites
//! let dendrites = TypeFilter::BASAL_DENDRITE | TypeFilter::APICAL_DENDRITE;
//! let lengths: Vec<f64> = sections::map_sections(&neuron, Some(dendrites), |s| s.length()).collect();
//! # Ok::<(), neuromorph::error::MorphError>(())
//! ```
//!
//! ## Architecture
//!
//! Readers unpack every format into the same [`RawData`] table. A
//! [`PointTree`] indexes the table once; [`Neuron`] groups the tree into
//! neurites, and [`sections`] walks them lazily.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod check;
pub mod data;
pub mod defect;
pub mod error;
pub mod io;
pub mod morphmath;
pub mod neuron;
pub mod sections;
pub mod tree;
pub mod types;

// Re-export commonly used types
pub use error::{MorphError, Result};
pub use types::{BoundingBox3D, PointType, TypeFilter, Vector3};

pub use data::{DataFormat, RawData, Row, ROOT_PARENT};
pub use defect::{Defect, DefectCollection, DefectKind};
pub use neuron::{Neurite, Neuron};
pub use sections::{Owner, Section};
pub use tree::{IterMode, NodeKind, PointTree};

// Re-export I/O types
pub use io::{load_data, load_neuron, H5Reader, SwcReader};
#[cfg(feature = "hdf5")]
pub use io::H5File;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
