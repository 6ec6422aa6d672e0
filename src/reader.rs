//! Position-tracking input stream for holder records.
//!
//! [`RecordReader`] wraps any [`BufRead`] and counts every byte consumed through it, so
//! diagnostics can name the absolute stream offset where a record began or went wrong.
//! It implements [`Read`] and [`BufRead`] itself, which lets the binary codec use
//! `byteorder` helpers directly on it.
//!
//! All scanning is single-pass: bytes are peeked from the inner buffer and consumed one at a
//! time, with no backtracking.
//!
//! ```rust
//! use kaldi_holder::RecordReader;
//! use std::io::BufRead;
//!
//! let mut reader = RecordReader::new(&b"abc\ndef\n"[..]);
//! let mut line = String::new();
//! reader.read_line(&mut line).unwrap();
//! assert_eq!(reader.position(), 4);
//! ```

use crate::{Error, Result};
use std::io::{self, BufRead, Read};

/// C-locale `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Renders a peeked byte for diagnostics.
pub(crate) fn describe_byte(b: Option<u8>) -> String {
    match b {
        None => "end of input".to_string(),
        Some(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
        Some(b) => format!("[character {}]", b),
    }
}

/// A buffered reader that tracks how many bytes have been consumed.
///
/// Holders borrow the reader for the duration of one record and never close it. Create one
/// reader per stream and reuse it across records so reported offsets stay absolute.
pub struct RecordReader<R> {
    inner: R,
    position: u64,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        RecordReader { inner, position: 0 }
    }

    /// Starts counting from `position` instead of zero, for streams that were already
    /// partially consumed.
    pub fn with_position(inner: R, position: u64) -> Self {
        RecordReader { inner, position }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Checks if we're at the end of input
    pub fn at_end(&mut self) -> Result<bool> {
        Ok(self.peek_byte()?.is_none())
    }

    pub(crate) fn peek_byte(&mut self) -> Result<Option<u8>> {
        let position = self.position;
        let buf = self
            .inner
            .fill_buf()
            .map_err(|e| Error::from_io(&e, position, "more input"))?;
        Ok(buf.first().copied())
    }

    pub(crate) fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.consume(1);
        }
        Ok(byte)
    }

    /// Skips all whitespace, newlines included.
    pub(crate) fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(b) = self.peek_byte()? {
            if !is_space(b) {
                break;
            }
            self.consume(1);
        }
        Ok(())
    }

    /// Skips whitespace on the same line only (no newlines)
    pub(crate) fn skip_whitespace_same_line(&mut self) -> Result<()> {
        while let Some(b) = self.peek_byte()? {
            if !is_space(b) || b == b'\n' {
                break;
            }
            self.consume(1);
        }
        Ok(())
    }

    /// Skips leading whitespace, then collects bytes up to the next whitespace or end of
    /// input. The delimiter is left in the stream. Returns an empty word at end of input.
    pub(crate) fn read_word(&mut self) -> Result<Vec<u8>> {
        self.skip_whitespace()?;
        let mut word = Vec::new();
        while let Some(b) = self.peek_byte()? {
            if is_space(b) {
                break;
            }
            word.push(b);
            self.consume(1);
        }
        Ok(word)
    }

    /// Reads one line and strips its `\n`. Returns `None` at end of input and the flag
    /// `false` when the stream ended before a terminator was seen.
    pub(crate) fn read_record_line(&mut self) -> Result<Option<(Vec<u8>, bool)>> {
        let start = self.position;
        let mut line = Vec::new();
        let n = self
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::from_io(&e, start, "a line"))?;
        if n == 0 {
            return Ok(None);
        }
        let terminated = line.last() == Some(&b'\n');
        if terminated {
            line.pop();
        }
        Ok(Some((line, terminated)))
    }

    /// Skips same-line whitespace and consumes the newline that must follow.
    pub(crate) fn expect_newline(&mut self) -> Result<()> {
        self.skip_whitespace_same_line()?;
        match self.peek_byte()? {
            Some(b'\n') => {
                self.consume(1);
                Ok(())
            }
            other => Err(Error::format(
                self.position,
                format!("expected newline, got {}", describe_byte(other)),
            )),
        }
    }
}

impl<R: BufRead> Read for RecordReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: BufRead> BufRead for RecordReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.position += amt as u64;
        self.inner.consume(amt);
    }
}
