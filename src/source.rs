//! Line-oriented sources that feed the CSV reader.
//!
//! A [`LineSource`] hands out one logical line at a time, without its
//! terminator, and can report how many lines it holds in total and how many
//! are still unread. Two implementations are provided:
//!
//! - [`BufferedLineSource`] reads fixed-size chunks from any seekable reader,
//!   usually a [`File`](std::fs::File).
//! - [`InMemoryLineSource`] walks an owned UTF-8 string.

mod buffered;
mod in_memory;

pub use buffered::BufferedLineSource;
pub use in_memory::InMemoryLineSource;

use crate::{Encoding, Result};

/// Interface between a [`Reader`](crate::Reader) and the bytes it reads.
pub trait LineSource {
    /// Returns the next logical line without its terminator, or `None` at the
    /// end of the source.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the line is not valid in the
    /// source's encoding.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Returns the number of logical lines in the whole source, regardless of
    /// how many have been read.
    ///
    /// # Errors
    ///
    /// Returns an error if scanning the underlying data fails.
    fn line_count(&mut self) -> Result<usize>;

    /// Returns the number of logical lines not yet returned by
    /// [`read_line`](Self::read_line).
    ///
    /// # Errors
    ///
    /// Returns an error if scanning the underlying data fails.
    fn lines_left(&mut self) -> Result<usize>;

    fn encoding(&self) -> Encoding;
}

/// Finds the first occurrence of `needle` in `haystack` that starts at a
/// multiple of `width`.
pub(crate) fn find_aligned(haystack: &[u8], needle: &[u8], width: usize) -> Option<usize> {
    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        if haystack[pos..].starts_with(needle) {
            return Some(pos);
        }
        pos += width;
    }
    None
}

/// Counts logical lines in a byte stream fed in arbitrary pieces.
///
/// A logical line ends at a terminator or at the end of the stream; a
/// trailing terminator does not open another line.
pub(crate) struct LineCounter<'a> {
    terminator: &'a [u8],
    width: usize,
    /// Bytes not yet scanned, shorter than the terminator after each `feed`.
    pending: Vec<u8>,
    /// Whether content was seen since the last terminator.
    open: bool,
    lines: usize,
}

impl<'a> LineCounter<'a> {
    pub(crate) fn new(terminator: &'a [u8], width: usize) -> Self {
        Self {
            terminator,
            width,
            pending: Vec::new(),
            open: false,
            lines: 0,
        }
    }

    pub(crate) fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        let mut pos = 0;
        while pos + self.terminator.len() <= self.pending.len() {
            if self.pending[pos..].starts_with(self.terminator) {
                self.lines += 1;
                self.open = false;
                pos += self.terminator.len();
            } else {
                self.open = true;
                pos += self.width;
            }
        }
        self.pending.drain(..pos);
    }

    pub(crate) fn finish(self) -> usize {
        if self.open || !self.pending.is_empty() {
            self.lines + 1
        } else {
            self.lines
        }
    }
}

/// Counts logical lines in `bytes`.
pub(crate) fn count_lines(bytes: &[u8], terminator: &[u8], width: usize) -> usize {
    let mut counter = LineCounter::new(terminator, width);
    counter.feed(bytes);
    counter.finish()
}
