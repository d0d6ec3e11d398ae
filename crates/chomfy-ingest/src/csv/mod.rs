//! CSV reading utilities.

mod reader;

pub(crate) use reader::read_csv_records;
pub use reader::ROW_SEPARATOR;
