//! An interface to CSV (comma-separated values).

pub(crate) mod reader;
pub(crate) mod split;

pub use reader::Reader;
pub use split::{split, QUOTED_SEPARATOR, SEPARATOR};
