//! Binary-mode prologue negotiation.
//!
//! A binary record starts with the two-byte marker `\0B`. Text records carry no marker, so
//! a reader decides the mode by peeking at the first byte: a NUL means a binary marker must
//! follow, anything else means text and nothing is consumed.

use crate::reader::describe_byte;
use crate::{Error, Mode, RecordReader, Result};
use std::io::{BufRead, Write};

/// Bytes written ahead of every binary record.
pub const BINARY_MARKER: [u8; 2] = *b"\0B";

/// Writes the binary marker when `mode` is binary; text mode writes nothing.
pub fn init_output_stream<W: Write + ?Sized>(writer: &mut W, mode: Mode) -> Result<()> {
    if mode.is_binary() {
        writer.write_all(&BINARY_MARKER)?;
    }
    Ok(())
}

/// Reads the record prologue and reports the mode it declares.
///
/// # Errors
///
/// Returns [`Error::StreamNegotiation`] when a NUL byte is not followed by `B`.
///
/// ```rust
/// use kaldi_holder::{stream, Mode, RecordReader};
///
/// let mut reader = RecordReader::new(&b"\0B\x04"[..]);
/// assert_eq!(stream::init_input_stream(&mut reader).unwrap(), Mode::Binary);
/// assert_eq!(reader.position(), 2);
///
/// let mut reader = RecordReader::new(&b"12 \n"[..]);
/// assert_eq!(stream::init_input_stream(&mut reader).unwrap(), Mode::Text);
/// assert_eq!(reader.position(), 0);
/// ```
pub fn init_input_stream<R: BufRead>(reader: &mut RecordReader<R>) -> Result<Mode> {
    if reader.peek_byte()? != Some(BINARY_MARKER[0]) {
        return Ok(Mode::Text);
    }
    reader.consume(1);
    let position = reader.position();
    match reader.next_byte()? {
        Some(b) if b == BINARY_MARKER[1] => Ok(Mode::Binary),
        other => Err(Error::stream_negotiation(
            position,
            &format!(
                "expected 'B' after binary marker, got {}",
                describe_byte(other)
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_marker_only_in_binary() {
        let mut out = Vec::new();
        init_output_stream(&mut out, Mode::Text).unwrap();
        assert!(out.is_empty());
        init_output_stream(&mut out, Mode::Binary).unwrap();
        assert_eq!(out, b"\0B");
    }

    #[test]
    fn test_corrupt_marker() {
        let mut reader = RecordReader::new(&b"\0X"[..]);
        let err = init_input_stream(&mut reader).unwrap_err();
        assert!(matches!(err, Error::StreamNegotiation { position: 1, .. }));
    }

    #[test]
    fn test_truncated_marker() {
        let mut reader = RecordReader::new(&b"\0"[..]);
        assert!(init_input_stream(&mut reader).is_err());
    }

    #[test]
    fn test_empty_stream_is_text() {
        let mut reader = RecordReader::new(&b""[..]);
        assert_eq!(init_input_stream(&mut reader).unwrap(), Mode::Text);
    }
}
