//! SWC text point tables

mod parser;
mod reader;

pub use reader::{SwcReader, SwcReaderConfiguration};
