//! HDF5 morphology layouts (V1 and staged V2)

#[cfg(feature = "hdf5")]
mod file;
mod reader;
mod source;

#[cfg(feature = "hdf5")]
pub use file::H5File;
pub use reader::{get_version, H5Reader, H5ReaderConfiguration, H5Stage, H5Version};
pub use source::{Dataset, H5Source, MemoryH5};
