//! A streaming reader for comma-separated records.
//!
//! A [`Reader`] pulls one logical line at a time from a [`LineSource`],
//! splits it into a [`Record`], and keeps it as the current record so fields
//! can be looked up by column name.
//!
//! ```
//! use csvcursor::{Config, Reader};
//!
//! let mut reader = Reader::from_string("a,b\n1,2", Config::default()).unwrap();
//! reader.read_line().unwrap();
//! assert_eq!(reader.get("b"), Some("2"));
//! ```

pub mod config;
pub mod csv;
pub mod encoding;
mod error;
pub mod record;
pub mod source;

pub use config::Config;
pub use csv::Reader;
pub use encoding::{Encoding, EncodingError};
pub use error::{Error, Result};
pub use record::Record;
pub use source::{BufferedLineSource, InMemoryLineSource, LineSource};
