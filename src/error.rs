//! Error types for reading and writing holder records.
//!
//! Every recoverable failure a holder can hit is described by [`Error`]:
//!
//! - **Stream negotiation**: the binary-mode marker at the head of a record is corrupt
//! - **Format errors**: the record does not have the expected shape (blank line where a
//!   value should be, missing trailing newline, a token that is not a number)
//! - **Unexpected EOF**: the stream ended before the record was complete
//! - **Record / Line**: wrappers that attach the record's starting offset or the offending
//!   text line to an inner error
//!
//! Contract violations (writing an invalid token, or a binary sequence whose length does
//! not fit the 32-bit count field) are not represented here. They panic.
//!
//! ## Examples
//!
//! ```rust
//! use kaldi_holder::{Error, Holder, Int32Holder, RecordReader};
//!
//! let mut reader = RecordReader::new(&b"12"[..]);
//! let mut holder = Int32Holder::default();
//! let err = holder.read(&mut reader).unwrap_err();
//! assert!(matches!(err, Error::Format { .. }));
//! ```

use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all recoverable errors a holder can report.
///
/// Positions are absolute byte offsets into the stream the [`RecordReader`](crate::RecordReader)
/// wraps.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error from the underlying stream
    #[error("IO error: {0}")]
    Io(String),

    /// Missing or corrupt binary-mode marker
    #[error("Stream negotiation failed at position {position}: {msg}")]
    StreamNegotiation { position: u64, msg: String },

    /// The record does not have the expected shape
    #[error("Format error at position {position}: {msg}")]
    Format { position: u64, msg: String },

    /// The stream ended in the middle of a record
    #[error("Unexpected end of input at position {position}, expected {expected}")]
    UnexpectedEof { position: u64, expected: String },

    /// A binary record failed somewhere after it started at `offset`
    #[error("Read error or unexpected data in record beginning at position {offset}: {source}")]
    Record {
        offset: u64,
        #[source]
        source: Box<Error>,
    },

    /// A text line could not be interpreted
    #[error("Could not interpret line '{line}': {source}")]
    Line {
        line: String,
        #[source]
        source: Box<Error>,
    },

    /// The holder does not provide this capability
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl Error {
    /// Creates a stream negotiation error.
    pub fn stream_negotiation(position: u64, msg: &str) -> Self {
        Error::StreamNegotiation {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates a format error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kaldi_holder::Error;
    ///
    /// let err = Error::format(7, "expected newline");
    /// assert!(err.to_string().contains("position 7"));
    /// ```
    pub fn format<T: fmt::Display>(position: u64, msg: T) -> Self {
        Error::Format {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(position: u64, expected: &str) -> Self {
        Error::UnexpectedEof {
            position,
            expected: expected.to_string(),
        }
    }

    /// Wraps `self` with the offset where the failing record began.
    pub fn in_record(self, offset: u64) -> Self {
        Error::Record {
            offset,
            source: Box::new(self),
        }
    }

    /// Wraps `self` with the text line that could not be parsed.
    pub fn in_line(self, line: &str) -> Self {
        Error::Line {
            line: line.to_string(),
            source: Box::new(self),
        }
    }

    /// Creates an unsupported-capability error.
    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates an I/O error.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Translates an I/O error raised at `position`, keeping EOF distinguishable.
    pub(crate) fn from_io(err: &io::Error, position: u64, expected: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::unexpected_eof(position, expected)
        } else {
            Error::io(&err.to_string())
        }
    }

    /// Offset of the record that failed, when known.
    ///
    /// ```rust
    /// use kaldi_holder::Error;
    ///
    /// let err = Error::unexpected_eof(12, "f32").in_record(3);
    /// assert_eq!(err.record_offset(), Some(3));
    /// ```
    pub fn record_offset(&self) -> Option<u64> {
        match self {
            Error::Record { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
