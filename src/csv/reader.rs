use std::fs::File;
use std::path::Path;

use url::Url;

use super::split::split;
use crate::source::{BufferedLineSource, InMemoryLineSource, LineSource};
use crate::{Config, Encoding, Error, Record, Result};

/// CSV reader
///
/// A cursor over the records of a [`LineSource`]. Each call to
/// [`read_line`](Self::read_line) replaces the current record, which is what
/// [`get`](Self::get) looks fields up in. When the source has a header row it
/// is read during construction and never becomes the current record.
///
/// Dropping the reader drops the source and closes any file it holds.
pub struct Reader<S = BufferedLineSource<File>> {
    source: S,
    has_header: bool,
    has_quotes: bool,
    headers: Option<Vec<String>>,
    current: Option<Record>,
    /// Set once iteration hits an error other than an undecodable line.
    failed: bool,
}

impl Reader<BufferedLineSource<File>> {
    /// Opens the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, or if `config` expects a
    /// header row and the file has no lines.
    pub fn from_path<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let source = BufferedLineSource::from_path(path, config.chunk_size, config.encoding)?;
        Self::from_source(source, config.has_header, config.has_quotes)
    }

    /// Reads CSV from an open file, starting at its current position.
    ///
    /// # Errors
    ///
    /// Returns an error if the file position cannot be determined, or if
    /// `config` expects a header row and the file has no lines left.
    pub fn from_file(file: File, config: Config) -> Result<Self> {
        let source = BufferedLineSource::new(file, config.chunk_size, config.encoding)?;
        Self::from_source(source, config.has_header, config.has_quotes)
    }

    /// Opens the CSV file a `file:` URL points to.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` does not name a local file, or for any of the
    /// reasons [`from_path`](Self::from_path) fails.
    pub fn from_url(url: &Url, config: Config) -> Result<Self> {
        if url.scheme() != "file" {
            return Err(Error::UnsupportedLocator(url.to_string()));
        }
        let path = url
            .to_file_path()
            .map_err(|()| Error::UnsupportedLocator(url.to_string()))?;
        Self::from_path(path, config)
    }
}

impl Reader<InMemoryLineSource> {
    /// Reads CSV from a string. `config.chunk_size` and `config.encoding` are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` expects a header row and `text` is empty.
    pub fn from_string<T: Into<String>>(text: T, config: Config) -> Result<Self> {
        Self::from_source(
            InMemoryLineSource::new(text),
            config.has_header,
            config.has_quotes,
        )
    }
}

impl<S: LineSource> Reader<S> {
    /// Creates a reader over `source`, reading the header row first if
    /// `has_header` is set.
    ///
    /// In quoted mode an absent header field becomes an empty column name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotReadHeaderRow`] if `has_header` is set and the
    /// source has no lines, or any error the source returns while reading
    /// the header row.
    pub fn from_source(source: S, has_header: bool, has_quotes: bool) -> Result<Self> {
        let mut reader = Self {
            source,
            has_header,
            has_quotes,
            headers: None,
            current: None,
            failed: false,
        };
        if has_header {
            let record = reader.next_record()?.ok_or(Error::CannotReadHeaderRow)?;
            log::debug!("header row: {}", record);
            reader.headers = Some(
                record
                    .into_fields()
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect(),
            );
        }
        Ok(reader)
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        let line = self.source.read_line()?;
        let encoding = self.source.encoding();
        Ok(line.map(|line| split(&line, self.has_quotes, encoding)))
    }

    /// Advances to the next record and returns it, or `None` once the source
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce the next line. The
    /// current record is cleared in that case.
    pub fn read_line(&mut self) -> Result<Option<&Record>> {
        self.current = None;
        self.current = self.next_record()?;
        if let Some(record) = &self.current {
            log::trace!("record: {}", record);
        }
        Ok(self.current.as_ref())
    }

    /// Returns the number of data lines in the whole source, not counting the
    /// header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be scanned.
    pub fn line_count(&mut self) -> Result<usize> {
        let total = self.source.line_count()?;
        if self.has_header {
            Ok(total.saturating_sub(1))
        } else {
            Ok(total)
        }
    }

    /// Returns the number of lines not yet read.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be scanned.
    pub fn lines_left(&mut self) -> Result<usize> {
        self.source.lines_left()
    }

    /// Returns the field of the current record under column `name`.
    ///
    /// Returns `None` if there is no header row, no column named `name`, no
    /// current record, or the current record is too short; also when the
    /// field itself is absent. With duplicate column names the first one
    /// wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        if self.headers.is_none() {
            log::warn!("looking up column {:?} requires a header row", name);
            return None;
        }
        let index = self.header_index(name)?;
        match &self.current {
            Some(record) => record.get(index),
            None => {
                log::debug!("no current record; nothing has been read or the source is exhausted");
                None
            }
        }
    }

    /// Returns the position of the first column named `name`.
    #[must_use]
    pub fn header_index(&self, name: &str) -> Option<usize> {
        self.headers.as_ref()?.iter().position(|h| h == name)
    }

    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Returns the header row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileMustHaveHeaderRow`] if the reader was created
    /// without one.
    pub fn require_headers(&self) -> Result<&[String]> {
        self.headers().ok_or(Error::FileMustHaveHeaderRow)
    }

    /// Returns the record returned by the last call to
    /// [`read_line`](Self::read_line).
    #[must_use]
    pub fn current_line(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    #[must_use]
    pub fn has_quotes(&self) -> bool {
        self.has_quotes
    }

    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.source.encoding()
    }
}

/// Yields the remaining data records, each of which also becomes the current
/// record.
///
/// A line that cannot be decoded yields [`Error::Decode`] and iteration
/// continues with the next line. Any other error is yielded once and ends
/// the iteration, since retrying a failed read would fail again.
impl<S: LineSource> Iterator for Reader<S> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_line() {
            Ok(record) => record.cloned().map(Ok),
            Err(e @ Error::Decode { .. }) => Some(Err(e)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
