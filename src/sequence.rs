//! Holder for a homogeneous sequence of scalars.
//!
//! ## Record format
//!
//! - Binary: `\0B` marker, an `i32` element count in the codec's binary encoding, then each
//!   element. There is no terminator.
//! - Text: the elements separated by spaces on one line, newline-terminated. The empty
//!   sequence is a bare newline.
//!
//! A text record is read as a whole line before any element is parsed, so a malformed line
//! never consumes the record after it.

use crate::holder::{log_read_failure, log_write_failure};
use crate::stream::{init_input_stream, init_output_stream};
use crate::{BasicType, Error, Holder, Mode, RecordReader, Result};
use std::io::{BufRead, Write};

/// Upper bound on elements reserved up front from an untrusted binary count.
const MAX_PREALLOC: usize = 1 << 16;

/// Wraps a `Vec` of a [`BasicType`].
///
/// ```rust
/// use kaldi_holder::{Holder, Int32VectorHolder, Mode, RecordReader};
///
/// let mut buf = Vec::new();
/// Int32VectorHolder::write(&mut buf, Mode::Text, &vec![1, 2, 3]).unwrap();
/// assert_eq!(buf, b"1 2 3 \n");
///
/// let mut holder = Int32VectorHolder::default();
/// holder.read(&mut RecordReader::new(&buf[..])).unwrap();
/// assert_eq!(holder.value(), &[1, 2, 3]);
/// ```
#[derive(Debug, Default)]
pub struct SequenceHolder<T> {
    value: Vec<T>,
}

impl<T: BasicType> SequenceHolder<T> {
    pub fn new(value: Vec<T>) -> Self {
        SequenceHolder { value }
    }

    fn write_record<W: Write + ?Sized>(writer: &mut W, mode: Mode, value: &[T]) -> Result<()> {
        init_output_stream(writer, mode)?;
        if mode.is_binary() {
            assert!(
                i32::try_from(value.len()).is_ok(),
                "sequence of {} elements does not fit the 32-bit length field",
                value.len()
            );
            (value.len() as i32).write_basic(writer, mode)?;
            for element in value {
                element.write_basic(writer, mode)?;
            }
        } else {
            for element in value {
                element.write_basic(writer, mode)?;
            }
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn read_binary<R: BufRead>(reader: &mut RecordReader<R>) -> Result<Vec<T>> {
        let count = i32::read_basic(reader, Mode::Binary)?;
        let count = usize::try_from(count).map_err(|_| {
            Error::format(reader.position(), format!("negative element count {}", count))
        })?;
        let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            values.push(T::read_basic(reader, Mode::Binary)?);
        }
        Ok(values)
    }

    fn read_text<R: BufRead>(reader: &mut RecordReader<R>) -> Result<Vec<T>> {
        let line_start = reader.position();
        let (line, terminated) = reader.read_record_line()?.ok_or_else(|| {
            Error::unexpected_eof(line_start, &format!("a line of {} values", T::NAME))
        })?;
        if !terminated {
            return Err(Error::format(reader.position(), "expected newline, got end of input")
                .in_line(&String::from_utf8_lossy(&line)));
        }

        let mut line_reader = RecordReader::with_position(&line[..], line_start);
        let mut values = Vec::new();
        loop {
            line_reader.skip_whitespace()?;
            if line_reader.at_end()? {
                break;
            }
            let value = T::read_basic(&mut line_reader, Mode::Text)
                .map_err(|e| e.in_line(&String::from_utf8_lossy(&line)))?;
            values.push(value);
        }
        Ok(values)
    }

    fn read_record<R: BufRead>(reader: &mut RecordReader<R>) -> Result<Vec<T>> {
        let start = reader.position();
        match init_input_stream(reader)? {
            Mode::Binary => Self::read_binary(reader).map_err(|e| e.in_record(start)),
            Mode::Text => Self::read_text(reader),
        }
    }
}

impl<T: BasicType> Holder for SequenceHolder<T> {
    type Value = Vec<T>;

    fn write<W: Write + ?Sized>(writer: &mut W, mode: Mode, value: &Vec<T>) -> Result<()> {
        log_write_failure(Self::write_record(writer, mode, value), "sequence", mode)
    }

    fn read<R: BufRead>(&mut self, reader: &mut RecordReader<R>) -> Result<()> {
        self.value.clear();
        let start = reader.position();
        self.value = log_read_failure(Self::read_record(reader), "sequence", start)?;
        Ok(())
    }

    fn is_read_in_binary() -> bool {
        true
    }

    fn value(&self) -> &Vec<T> {
        &self.value
    }

    fn value_mut(&mut self) -> &mut Vec<T> {
        &mut self.value
    }

    fn into_value(self) -> Vec<T> {
        self.value
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}
