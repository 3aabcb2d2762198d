//! In-memory line source.

use super::{count_lines, LineSource};
use crate::{Encoding, Result};

/// A line source that owns its text.
///
/// The text is already decoded, so the source always reports UTF-8 and
/// never fails.
pub struct InMemoryLineSource {
    input: String,
    /// Byte offset of the first unread line.
    pos: usize,
}

impl InMemoryLineSource {
    pub fn new<S: Into<String>>(input: S) -> Self {
        Self {
            input: input.into(),
            pos: 0,
        }
    }
}

impl LineSource for InMemoryLineSource {
    fn read_line(&mut self) -> Result<Option<String>> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }
        let line = match rest.find('\n') {
            Some(end) => {
                self.pos += end + 1;
                &rest[..end]
            }
            None => {
                self.pos = self.input.len();
                rest
            }
        };
        Ok(Some(line.to_string()))
    }

    fn line_count(&mut self) -> Result<usize> {
        Ok(count_lines(self.input.as_bytes(), b"\n", 1))
    }

    fn lines_left(&mut self) -> Result<usize> {
        Ok(count_lines(&self.input.as_bytes()[self.pos..], b"\n", 1))
    }

    fn encoding(&self) -> Encoding {
        Encoding::Utf8
    }
}
