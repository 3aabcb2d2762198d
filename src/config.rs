//! Reader configuration.

use serde::{Deserialize, Serialize};

use crate::Encoding;

/// Number of bytes a file-backed source reads at a time unless configured
/// otherwise.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest number of bytes a file-backed source reads at a time. Larger
/// chunk sizes are clamped to it.
pub const MAX_CHUNK_SIZE: usize = 1 << 20;

/// Options fixed when a [`Reader`](crate::Reader) is constructed.
///
/// Missing fields take their default values when deserialized, so
/// `{"has_quotes": true}` is a complete configuration.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Treats the first line as column names.
    pub has_header: bool,
    /// Splits on `","` and maps empty fields to absent values.
    pub has_quotes: bool,
    /// Bytes read per chunk, clamped to `1..=MAX_CHUNK_SIZE`. Ignored by
    /// in-memory sources.
    pub chunk_size: usize,
    /// Ignored by in-memory sources, which are always UTF-8.
    pub encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            has_header: true,
            has_quotes: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            encoding: Encoding::Utf8,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_quotes(mut self, has_quotes: bool) -> Self {
        self.has_quotes = has_quotes;
        self
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}
