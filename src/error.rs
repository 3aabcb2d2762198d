use thiserror::Error;

use crate::encoding::EncodingError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read header row")]
    CannotReadHeaderRow,
    #[error("file must have a header row")]
    FileMustHaveHeaderRow,
    #[error("cannot decode line {line}: {source}")]
    Decode { line: usize, source: EncodingError },
    #[error("not a local file locator: {0}")]
    UnsupportedLocator(String),
}
