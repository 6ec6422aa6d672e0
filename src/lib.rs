//! # kaldi_holder
//!
//! Typed record holders with symmetric text and binary encodings, the building block of
//! Kaldi-style line/record archives.
//!
//! ## What is a holder?
//!
//! A holder owns one value and knows how to write it as a single record and read it back.
//! Three shapes are provided:
//!
//! - [`ScalarHolder<T>`]: one integer, float or bool
//! - [`SequenceHolder<T>`]: a homogeneous list of scalars
//! - [`TokenHolder`]: one nonempty, printable, whitespace-free string
//!
//! All three implement the [`Holder`] trait, so an archive layer can be written once,
//! generically, and pick the shape per table.
//!
//! ## Modes
//!
//! Each record is written in [`Mode::Text`] or [`Mode::Binary`]. Binary records begin with
//! the marker `\0B`; readers detect it and switch mode per record, so text and binary
//! records can be mixed in one stream. Text records always end in a newline, and a missing
//! newline is a read error.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaldi_holder::{Holder, Int32Holder, Int32VectorHolder, Mode, RecordReader};
//!
//! let mut buf = Vec::new();
//! Int32Holder::write(&mut buf, Mode::Text, &10).unwrap();
//! Int32VectorHolder::write(&mut buf, Mode::Binary, &vec![1, 2, 3]).unwrap();
//!
//! let mut reader = RecordReader::new(&buf[..]);
//! let mut scalar = Int32Holder::default();
//! let mut vector = Int32VectorHolder::default();
//! scalar.read(&mut reader).unwrap();
//! vector.read(&mut reader).unwrap();
//!
//! assert_eq!(*scalar.value(), 10);
//! assert_eq!(vector.value(), &[1, 2, 3]);
//! ```
//!
//! ## Failure handling
//!
//! Reads and writes return [`Result`]. Every failure is also logged through `tracing` at
//! `warn` level with the stream offset of the failing record; install a subscriber to see
//! it. Precondition violations (writing an invalid token, or a binary sequence longer than
//! `i32::MAX`) panic instead, since continuing would produce a corrupt archive.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Single pass over the input with no backtracking
//! - Holders never own or close the stream they operate on

pub mod codec;
pub mod error;
pub mod holder;
pub mod mode;
pub mod reader;
pub mod scalar;
pub mod sequence;
pub mod stream;
pub mod text_utils;
pub mod token;
pub mod value;

pub use codec::BasicType;
pub use error::{Error, Result};
pub use holder::{
    BoolHolder, DoubleHolder, DoubleVectorHolder, FloatHolder, FloatVectorHolder, Holder,
    Int32Holder, Int32VectorHolder, Int64Holder, Int64VectorHolder, Int8Holder, UInt32Holder,
};
pub use mode::Mode;
pub use reader::RecordReader;
pub use scalar::ScalarHolder;
pub use sequence::SequenceHolder;
pub use token::TokenHolder;
pub use value::{Kind, Scalar, ScalarType, Sequence, Value};

use std::io::{BufRead, Write};

/// Writes `value` as one record using holder `H`.
///
/// # Examples
///
/// ```rust
/// use kaldi_holder::{to_writer, BoolHolder, Mode};
///
/// let mut buf = Vec::new();
/// to_writer::<BoolHolder, _>(&mut buf, Mode::Text, &true).unwrap();
/// assert_eq!(buf, b"T \n");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
pub fn to_writer<H, W>(writer: &mut W, mode: Mode, value: &H::Value) -> Result<()>
where
    H: Holder,
    W: Write + ?Sized,
{
    H::write(writer, mode, value)
}

/// Encodes `value` as one record into a fresh buffer.
///
/// # Examples
///
/// ```rust
/// use kaldi_holder::{to_vec, Mode, TokenHolder};
///
/// let bytes = to_vec::<TokenHolder>(Mode::Text, &"abc".to_string()).unwrap();
/// assert_eq!(bytes, b"abc\n");
/// ```
///
/// # Errors
///
/// Infallible for in-memory buffers in practice; the `Result` mirrors [`Holder::write`].
pub fn to_vec<H: Holder>(mode: Mode, value: &H::Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    H::write(&mut buf, mode, value)?;
    Ok(buf)
}

/// Reads one record with holder `H` and returns its value.
///
/// # Examples
///
/// ```rust
/// use kaldi_holder::{from_reader, DoubleHolder, RecordReader};
///
/// let mut reader = RecordReader::new(&b"2.5 \n"[..]);
/// let value = from_reader::<DoubleHolder, _>(&mut reader).unwrap();
/// assert_eq!(value, 2.5);
/// ```
///
/// # Errors
///
/// Returns an error if the record is malformed or the stream ends early.
pub fn from_reader<H, R>(reader: &mut RecordReader<R>) -> Result<H::Value>
where
    H: Holder,
    R: BufRead,
{
    let mut holder = H::default();
    holder.read(reader)?;
    Ok(holder.into_value())
}

/// Reads one record with holder `H` from the start of `bytes`.
///
/// # Errors
///
/// Returns an error if the record is malformed or incomplete.
pub fn from_slice<H: Holder>(bytes: &[u8]) -> Result<H::Value> {
    from_reader::<H, _>(&mut RecordReader::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_round_trip_both_modes() {
        for mode in [Mode::Text, Mode::Binary] {
            let bytes = to_vec::<Int64Holder>(mode, &-1234567890123).unwrap();
            assert_eq!(from_slice::<Int64Holder>(&bytes).unwrap(), -1234567890123);
        }
    }

    #[test]
    fn test_sequence_round_trip_both_modes() {
        let values = vec![1.25f32, -0.0, 3.0e-20, f32::MAX];
        for mode in [Mode::Text, Mode::Binary] {
            let bytes = to_vec::<FloatVectorHolder>(mode, &values).unwrap();
            let back = from_slice::<FloatVectorHolder>(&bytes).unwrap();
            let bits: Vec<u32> = back.iter().map(|f| f.to_bits()).collect();
            let expected: Vec<u32> = values.iter().map(|f| f.to_bits()).collect();
            assert_eq!(bits, expected);
        }
    }

    #[test]
    fn test_token_round_trip() {
        let bytes = to_vec::<TokenHolder>(Mode::Binary, &"A_b-1".to_string()).unwrap();
        assert_eq!(from_slice::<TokenHolder>(&bytes).unwrap(), "A_b-1");
    }

    #[test]
    fn test_read_in_binary_flags() {
        assert!(Int32Holder::is_read_in_binary());
        assert!(Int32VectorHolder::is_read_in_binary());
        assert!(!TokenHolder::is_read_in_binary());
    }
}
