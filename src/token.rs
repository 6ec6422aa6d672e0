//! Holder for a single whitespace-free token.
//!
//! Tokens have no binary form: the record is the token followed by a newline in every mode,
//! and no binary marker is ever written or expected.

use crate::holder::{log_read_failure, log_write_failure};
use crate::text_utils::is_token;
use crate::{Error, Holder, Mode, RecordReader, Result};
use std::io::{BufRead, Write};

/// Wraps a nonempty, printable, whitespace-free string.
///
/// ```rust
/// use kaldi_holder::{Holder, Mode, RecordReader, TokenHolder};
///
/// let mut buf = Vec::new();
/// TokenHolder::write(&mut buf, Mode::Binary, &"spk-01".to_string()).unwrap();
/// assert_eq!(buf, b"spk-01\n");
///
/// let mut holder = TokenHolder::default();
/// holder.read(&mut RecordReader::new(&buf[..])).unwrap();
/// assert_eq!(holder.value(), "spk-01");
/// ```
#[derive(Debug, Default)]
pub struct TokenHolder {
    value: String,
}

impl TokenHolder {
    /// # Panics
    ///
    /// Panics if `value` is not a token.
    pub fn new(value: String) -> Self {
        assert!(is_token(&value), "invalid token {:?}", value);
        TokenHolder { value }
    }

    fn read_record<R: BufRead>(reader: &mut RecordReader<R>) -> Result<String> {
        let word = reader.read_word()?;
        if word.is_empty() {
            return Err(Error::unexpected_eof(reader.position(), "a token"));
        }
        let start = reader.position() - word.len() as u64;
        let token = String::from_utf8(word)
            .ok()
            .filter(|t| is_token(t))
            .ok_or_else(|| Error::format(start, "not a printable token"))?;
        reader.expect_newline()?;
        Ok(token)
    }
}

impl Holder for TokenHolder {
    type Value = String;

    /// Writes `value` and a newline, ignoring `mode`.
    fn write<W: Write + ?Sized>(writer: &mut W, mode: Mode, value: &String) -> Result<()> {
        assert!(is_token(value), "invalid token {:?}", value);
        let result = writer
            .write_all(value.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(Error::from);
        log_write_failure(result, "token", mode)
    }

    fn read<R: BufRead>(&mut self, reader: &mut RecordReader<R>) -> Result<()> {
        let start = reader.position();
        self.value = log_read_failure(Self::read_record(reader), "token", start)?;
        Ok(())
    }

    fn is_read_in_binary() -> bool {
        false
    }

    fn value(&self) -> &String {
        &self.value
    }

    fn value_mut(&mut self) -> &mut String {
        &mut self.value
    }

    fn into_value(self) -> String {
        self.value
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}
