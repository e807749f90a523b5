//! Raw table model shared by all readers

mod raw_data;
mod row;

pub use raw_data::{DataFormat, RawData};
pub use row::{Row, ROOT_PARENT};
