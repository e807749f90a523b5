//! I/O module for reading morphology files in SWC and HDF5 layouts

pub mod h5;
pub mod swc;

#[cfg(feature = "hdf5")]
pub use h5::H5File;
pub use h5::{H5Reader, H5ReaderConfiguration, H5Source, H5Stage, MemoryH5};
pub use swc::{SwcReader, SwcReaderConfiguration};

use crate::data::RawData;
use crate::error::{MorphError, Result};
use crate::neuron::Neuron;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Leading bytes of every HDF5 container
const HDF5_SIGNATURE: &[u8] = b"\x89HDF\r\n\x1a\n";

/// Load a morphology file into a raw table, choosing the reader by extension.
///
/// HDF5 containers are recognised by extension or signature. Opening them
/// from disk needs the `hdf5` feature; without it they can still be read
/// through any [`H5Source`] passed to [`H5Reader::from_source`].
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<RawData> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("swc") => SwcReader::from_file(path)?.read(),
        Some("h5") | Some("hdf5") => read_hdf5(path),
        _ if is_hdf5(path)? => read_hdf5(path),
        _ => Err(MorphError::Format(format!(
            "unrecognised morphology file '{}'",
            path.display()
        ))),
    }
}

/// Load a morphology file and reconstruct its neuron
pub fn load_neuron<P: AsRef<Path>>(path: P) -> Result<Neuron> {
    Ok(Neuron::from_data(load_data(path)?))
}

#[cfg(feature = "hdf5")]
fn read_hdf5(path: &Path) -> Result<RawData> {
    H5Reader::from_source(H5File::open(path)?).read()
}

#[cfg(not(feature = "hdf5"))]
fn read_hdf5(path: &Path) -> Result<RawData> {
    Err(MorphError::Format(format!(
        "'{}' is an HDF5 container; build with the `hdf5` feature or read it through an H5Source",
        path.display()
    )))
}

/// Check if a file starts with the HDF5 signature
fn is_hdf5(path: &Path) -> Result<bool> {
    let mut buffer = [0u8; 8];
    let mut file = File::open(path)?;
    let mut filled = 0;
    while filled < buffer.len() {
        match file.read(&mut buffer[filled..])? {
            0 => return Ok(false),
            n => filled += n,
        }
    }
    Ok(buffer == HDF5_SIGNATURE)
}
