//! Holder for a single scalar value.
//!
//! ## Record format
//!
//! - Binary: `\0B` marker, then the codec's binary encoding of the value
//! - Text: the codec's text encoding followed by a newline, e.g. `"10 \n"`
//!
//! Text reads are strict: a blank line where the value should be, or anything other than
//! whitespace between the value and the newline, fails the record.

use crate::holder::{log_read_failure, log_write_failure};
use crate::stream::{init_input_stream, init_output_stream};
use crate::{BasicType, Error, Holder, Mode, RecordReader, Result};
use std::io::{BufRead, Write};

/// Wraps one value of a [`BasicType`].
///
/// ```rust
/// use kaldi_holder::{FloatHolder, Holder, Mode, RecordReader};
///
/// let mut buf = Vec::new();
/// FloatHolder::write(&mut buf, Mode::Text, &0.25).unwrap();
/// assert_eq!(buf, b"0.25 \n");
///
/// let mut holder = FloatHolder::default();
/// holder.read(&mut RecordReader::new(&buf[..])).unwrap();
/// assert_eq!(*holder.value(), 0.25);
/// ```
#[derive(Debug, Default)]
pub struct ScalarHolder<T> {
    value: T,
}

impl<T: BasicType> ScalarHolder<T> {
    pub fn new(value: T) -> Self {
        ScalarHolder { value }
    }

    fn write_record<W: Write + ?Sized>(writer: &mut W, mode: Mode, value: &T) -> Result<()> {
        init_output_stream(writer, mode)?;
        value.write_basic(writer, mode)?;
        if !mode.is_binary() {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn read_record<R: BufRead>(reader: &mut RecordReader<R>) -> Result<T> {
        let mode = init_input_stream(reader)?;
        if mode.is_binary() {
            return T::read_basic(reader, mode);
        }

        // The codec would skip a blank line here; an empty line means a missing record.
        reader.skip_whitespace_same_line()?;
        if reader.peek_byte()? == Some(b'\n') {
            return Err(Error::format(
                reader.position(),
                format!("found newline but expected {}", T::NAME),
            ));
        }
        let value = T::read_basic(reader, mode)?;
        reader.expect_newline()?;
        Ok(value)
    }
}

impl<T: BasicType> Holder for ScalarHolder<T> {
    type Value = T;

    fn write<W: Write + ?Sized>(writer: &mut W, mode: Mode, value: &T) -> Result<()> {
        log_write_failure(Self::write_record(writer, mode, value), "scalar", mode)
    }

    fn read<R: BufRead>(&mut self, reader: &mut RecordReader<R>) -> Result<()> {
        let start = reader.position();
        self.value = log_read_failure(Self::read_record(reader), "scalar", start)?;
        Ok(())
    }

    fn is_read_in_binary() -> bool {
        true
    }

    fn value(&self) -> &T {
        &self.value
    }

    fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    fn into_value(self) -> T {
        self.value
    }

    fn clear(&mut self) {
        self.value = T::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_from<T: BasicType>(bytes: &[u8]) -> Result<T> {
        let mut holder = ScalarHolder::<T>::default();
        holder.read(&mut RecordReader::new(bytes))?;
        Ok(holder.into_value())
    }

    #[test]
    fn test_text_record_layout() {
        let mut buf = Vec::new();
        ScalarHolder::<i32>::write(&mut buf, Mode::Text, &10).unwrap();
        assert_eq!(buf, b"10 \n");
    }

    #[test]
    fn test_binary_record_layout() {
        let mut buf = Vec::new();
        ScalarHolder::<i32>::write(&mut buf, Mode::Binary, &10).unwrap();
        assert_eq!(buf, b"\0B\x04\x0a\x00\x00\x00");
    }

    #[test]
    fn test_blank_line_before_value() {
        let err = read_from::<i32>(b"  \n5 \n").unwrap_err();
        assert!(err.to_string().contains("found newline"));
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert!(read_from::<i32>(b"5").is_err());
        assert!(read_from::<i32>(b"5 6\n").is_err());
        assert_eq!(read_from::<i32>(b" \t5\t\n").unwrap(), 5);
    }

    #[test]
    fn test_consumes_exactly_one_record() {
        let mut reader = RecordReader::new(&b"1 \n2 \n"[..]);
        let mut holder = ScalarHolder::<u8>::default();
        holder.read(&mut reader).unwrap();
        assert_eq!(reader.position(), 3);
        holder.read(&mut reader).unwrap();
        assert_eq!(*holder.value(), 2);
    }

    #[test]
    fn test_corrupt_prologue() {
        let err = read_from::<i32>(b"\0Z\x04\x01\x00\x00\x00").unwrap_err();
        assert!(matches!(err, Error::StreamNegotiation { .. }));
    }

    #[test]
    fn test_extract_range_unsupported() {
        let mut a = ScalarHolder::new(1i32);
        let b = ScalarHolder::new(2i32);
        assert!(matches!(
            a.extract_range(&b, "0:1"),
            Err(Error::Unsupported(_))
        ));
    }
}
