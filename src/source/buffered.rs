//! Chunked line source over a seekable reader.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::{find_aligned, LineCounter, LineSource};
use crate::config::MAX_CHUNK_SIZE;
use crate::{Encoding, Error, Result};

/// A line source that reads `chunk_size` bytes at a time.
///
/// Lines are split on the newline as encoded in the source's encoding, so a
/// UTF-16 source splits on two-byte units. A terminator that straddles two
/// chunks is found once the second chunk arrives.
///
/// Counting lines reads ahead through the underlying reader and seeks back
/// afterwards, which is why the reader must implement [`Seek`].
pub struct BufferedLineSource<R> {
    reader: R,
    encoding: Encoding,
    chunk_size: usize,
    terminator: Vec<u8>,

    /// Bytes read from `reader`; only `buffer[pos..]` is unread.
    buffer: Vec<u8>,
    pos: usize,

    /// Stream position at creation, where the first line starts.
    origin: u64,
    eof: bool,
    lines_read: usize,
}

impl BufferedLineSource<File> {
    /// Opens the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        chunk_size: usize,
        encoding: Encoding,
    ) -> io::Result<Self> {
        Self::new(File::open(path)?, chunk_size, encoding)
    }
}

impl<R: Read + Seek> BufferedLineSource<R> {
    /// Creates a source that starts reading at the current position of
    /// `reader`. `chunk_size` is clamped to `1..=MAX_CHUNK_SIZE`; the buffer
    /// grows only as bytes arrive.
    ///
    /// # Errors
    ///
    /// Returns an error if the current position of `reader` cannot be
    /// determined.
    pub fn new(mut reader: R, chunk_size: usize, encoding: Encoding) -> io::Result<Self> {
        let origin = reader.stream_position()?;
        Ok(Self {
            reader,
            encoding,
            chunk_size: chunk_size.clamp(1, MAX_CHUNK_SIZE),
            terminator: encoding.newline(),
            buffer: Vec::new(),
            pos: 0,
            origin,
            eof: false,
            lines_read: 0,
        })
    }

    /// Consumes the source and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Appends up to one chunk to the buffer, dropping consumed bytes first.
    fn fill(&mut self) -> io::Result<usize> {
        if self.pos > 0 {
            self.buffer.drain(..self.pos);
            self.pos = 0;
        }
        let start = self.buffer.len();
        self.buffer.resize(start + self.chunk_size, 0);
        let read = loop {
            match self.reader.read(&mut self.buffer[start..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.buffer.truncate(start);
                    return Err(e);
                }
            }
        };
        self.buffer.truncate(start + read);
        if read == 0 {
            self.eof = true;
        }
        Ok(read)
    }

    /// Consumes `buffer[pos..end]` as a line and skips to `next`.
    fn take_line(&mut self, end: usize, next: usize) -> Result<String> {
        let decoded = self.encoding.decode(&self.buffer[self.pos..end]);
        self.pos = next;
        self.lines_read += 1;
        decoded.map_err(|source| Error::Decode {
            line: self.lines_read,
            source,
        })
    }
}

impl<R: Read + Seek> LineSource for BufferedLineSource<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let width = self.encoding.unit_width();
        // Offset past `pos` below which no terminator starts.
        let mut searched = 0;
        loop {
            let unread = &self.buffer[self.pos..];
            if let Some(idx) = find_aligned(&unread[searched..], &self.terminator, width) {
                let end = self.pos + searched + idx;
                let next = end + self.terminator.len();
                return self.take_line(end, next).map(Some);
            }
            if self.eof {
                if unread.is_empty() {
                    return Ok(None);
                }
                let end = self.buffer.len();
                return self.take_line(end, end).map(Some);
            }
            let scanned = (unread.len() + 1).saturating_sub(self.terminator.len());
            searched = scanned - scanned % width;
            self.fill()?;
        }
    }

    fn line_count(&mut self) -> Result<usize> {
        let resume = self.reader.stream_position()?;
        self.reader.seek(SeekFrom::Start(self.origin))?;
        let mut counter = LineCounter::new(&self.terminator, self.encoding.unit_width());
        let scanned = scan(&mut self.reader, &mut counter, self.chunk_size);
        self.reader.seek(SeekFrom::Start(resume))?;
        scanned?;
        Ok(counter.finish())
    }

    fn lines_left(&mut self) -> Result<usize> {
        let mut counter = LineCounter::new(&self.terminator, self.encoding.unit_width());
        counter.feed(&self.buffer[self.pos..]);
        if !self.eof {
            let resume = self.reader.stream_position()?;
            let scanned = scan(&mut self.reader, &mut counter, self.chunk_size);
            self.reader.seek(SeekFrom::Start(resume))?;
            scanned?;
        }
        Ok(counter.finish())
    }

    fn encoding(&self) -> Encoding {
        self.encoding
    }
}

/// Feeds the rest of `reader` to `counter`.
fn scan<R: Read>(
    reader: &mut R,
    counter: &mut LineCounter<'_>,
    chunk_size: usize,
) -> io::Result<()> {
    let mut chunk = vec![0; chunk_size.min(MAX_CHUNK_SIZE)];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => counter.feed(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}
