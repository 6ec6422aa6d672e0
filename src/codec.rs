//! Atomic encode/decode for fixed-width scalar types.
//!
//! [`BasicType`] is implemented for `bool`, every fixed-width integer and both float widths.
//! Holders never touch bytes of a scalar themselves; they frame records and delegate each
//! value here.
//!
//! ## Binary encoding
//!
//! | Type | Encoding |
//! |------|----------|
//! | signed integer | size byte `+N`, then `N` little-endian bytes |
//! | unsigned integer | size byte `-N`, then `N` little-endian bytes |
//! | float | size byte `4` or `8`, then IEEE bits little-endian |
//! | bool | `T` or `F` |
//!
//! Reading a float accepts either size byte and converts to the target width.
//!
//! ## Text encoding
//!
//! The value followed by a single space. Floats use the shortest decimal that reads back to
//! the same bits, switching to exponent notation for very large or small magnitudes. Bools
//! are `T` or `F`.

use crate::reader::describe_byte;
use crate::{Error, Mode, RecordReader, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// A scalar with a symmetric fixed-width encoding.
pub trait BasicType: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Type name used in diagnostics.
    const NAME: &'static str;

    fn write_basic<W: Write + ?Sized>(&self, writer: &mut W, mode: Mode) -> Result<()>;

    fn read_basic<R: BufRead>(reader: &mut RecordReader<R>, mode: Mode) -> Result<Self>;
}

/// Reads one whitespace-delimited word and parses all of it as `T`.
fn parse_text_word<T: FromStr, R: BufRead>(
    reader: &mut RecordReader<R>,
    name: &str,
) -> Result<T> {
    let word = reader.read_word()?;
    if word.is_empty() {
        return Err(Error::unexpected_eof(reader.position(), name));
    }
    let start = reader.position() - word.len() as u64;
    std::str::from_utf8(&word)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            Error::format(
                start,
                format!(
                    "failed to read {} from '{}'",
                    name,
                    String::from_utf8_lossy(&word)
                ),
            )
        })
}

fn expect_size_marker<R: BufRead>(
    reader: &mut RecordReader<R>,
    expected: i8,
    name: &str,
) -> Result<()> {
    let position = reader.position();
    let marker = reader
        .read_i8()
        .map_err(|e| Error::from_io(&e, position, name))?;
    if marker != expected {
        return Err(Error::format(
            position,
            format!(
                "did not get expected integer type, {} vs. {}; reading {}",
                marker, expected, name
            ),
        ));
    }
    Ok(())
}

macro_rules! impl_integer {
    ($($ty:ty => $read:ident, $write:ident $(, $order:ty)?;)*) => {$(
        impl BasicType for $ty {
            const NAME: &'static str = stringify!($ty);

            fn write_basic<W: Write + ?Sized>(&self, writer: &mut W, mode: Mode) -> Result<()> {
                if mode.is_binary() {
                    writer.write_i8(size_marker::<$ty>(<$ty>::MIN != 0))?;
                    writer.$write $(::<$order>)? (*self)?;
                } else {
                    write!(writer, "{} ", self)?;
                }
                Ok(())
            }

            fn read_basic<R: BufRead>(reader: &mut RecordReader<R>, mode: Mode) -> Result<Self> {
                if !mode.is_binary() {
                    return parse_text_word(reader, Self::NAME);
                }
                expect_size_marker(reader, size_marker::<$ty>(<$ty>::MIN != 0), Self::NAME)?;
                let position = reader.position();
                reader
                    .$read $(::<$order>)? ()
                    .map_err(|e| Error::from_io(&e, position, Self::NAME))
            }
        }
    )*};
}

/// Size byte for an integer type: positive for signed, negative for unsigned.
const fn size_marker<T>(signed: bool) -> i8 {
    let size = std::mem::size_of::<T>() as i8;
    if signed {
        size
    } else {
        -size
    }
}

impl_integer! {
    i8 => read_i8, write_i8;
    u8 => read_u8, write_u8;
    i16 => read_i16, write_i16, LittleEndian;
    u16 => read_u16, write_u16, LittleEndian;
    i32 => read_i32, write_i32, LittleEndian;
    u32 => read_u32, write_u32, LittleEndian;
    i64 => read_i64, write_i64, LittleEndian;
    u64 => read_u64, write_u64, LittleEndian;
}

enum BinaryFloat {
    Single(f32),
    Double(f64),
}

fn read_binary_float<R: BufRead>(reader: &mut RecordReader<R>, name: &str) -> Result<BinaryFloat> {
    let position = reader.position();
    let value = match reader.next_byte()? {
        Some(4) => reader.read_f32::<LittleEndian>().map(BinaryFloat::Single),
        Some(8) => reader.read_f64::<LittleEndian>().map(BinaryFloat::Double),
        None => return Err(Error::unexpected_eof(position, name)),
        Some(other) => {
            return Err(Error::format(
                position,
                format!("unexpected float size marker {} reading {}", other, name),
            ))
        }
    };
    value.map_err(|e| Error::from_io(&e, position, name))
}

macro_rules! impl_float {
    ($($ty:ty => $write:ident, $size:expr;)*) => {$(
        impl BasicType for $ty {
            const NAME: &'static str = stringify!($ty);

            fn write_basic<W: Write + ?Sized>(&self, writer: &mut W, mode: Mode) -> Result<()> {
                if mode.is_binary() {
                    writer.write_u8($size)?;
                    writer.$write::<LittleEndian>(*self)?;
                } else {
                    let magnitude = self.abs();
                    if magnitude != 0.0 && magnitude.is_finite() && !(1e-5..1e16).contains(&magnitude) {
                        write!(writer, "{:e} ", self)?;
                    } else {
                        write!(writer, "{} ", self)?;
                    }
                }
                Ok(())
            }

            #[allow(clippy::unnecessary_cast)]
            fn read_basic<R: BufRead>(reader: &mut RecordReader<R>, mode: Mode) -> Result<Self> {
                if !mode.is_binary() {
                    return parse_text_word(reader, Self::NAME);
                }
                Ok(match read_binary_float(reader, Self::NAME)? {
                    BinaryFloat::Single(v) => v as $ty,
                    BinaryFloat::Double(v) => v as $ty,
                })
            }
        }
    )*};
}

impl_float! {
    f32 => write_f32, 4;
    f64 => write_f64, 8;
}

impl BasicType for bool {
    const NAME: &'static str = "bool";

    fn write_basic<W: Write + ?Sized>(&self, writer: &mut W, mode: Mode) -> Result<()> {
        writer.write_all(if *self { b"T" } else { b"F" })?;
        if !mode.is_binary() {
            writer.write_all(b" ")?;
        }
        Ok(())
    }

    fn read_basic<R: BufRead>(reader: &mut RecordReader<R>, mode: Mode) -> Result<Self> {
        if !mode.is_binary() {
            reader.skip_whitespace()?;
        }
        let position = reader.position();
        let value = match reader.peek_byte()? {
            Some(b'T') => true,
            Some(b'F') => false,
            None => return Err(Error::unexpected_eof(position, Self::NAME)),
            other => {
                return Err(Error::format(
                    position,
                    format!(
                        "missing F or T character in boolean, got {}",
                        describe_byte(other)
                    ),
                ))
            }
        };
        reader.consume(1);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: BasicType>(value: T, mode: Mode) -> Vec<u8> {
        let mut out = Vec::new();
        value.write_basic(&mut out, mode).unwrap();
        out
    }

    fn decode<T: BasicType>(bytes: &[u8], mode: Mode) -> Result<T> {
        let mut reader = RecordReader::new(bytes);
        T::read_basic(&mut reader, mode)
    }

    #[test]
    fn test_binary_integer_layout() {
        assert_eq!(encode(10i32, Mode::Binary), [4, 10, 0, 0, 0]);
        assert_eq!(encode(10u16, Mode::Binary), [0xfe, 10, 0]);
        assert_eq!(encode(-1i8, Mode::Binary), [1, 0xff]);
    }

    #[test]
    fn test_binary_integer_wrong_width() {
        let bytes = encode(7i64, Mode::Binary);
        let err = decode::<i32>(&bytes, Mode::Binary).unwrap_err();
        assert!(err.to_string().contains("expected integer type"));
    }

    #[test]
    fn test_binary_integer_signedness_mismatch() {
        let bytes = encode(7u32, Mode::Binary);
        assert!(decode::<i32>(&bytes, Mode::Binary).is_err());
    }

    #[test]
    fn test_binary_truncated() {
        let err = decode::<i32>(&[4, 1, 2], Mode::Binary).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof { position: 1, .. }));
    }

    #[test]
    fn test_binary_float_cross_width() {
        let bytes = encode(1.5f32, Mode::Binary);
        assert_eq!(bytes[0], 4);
        assert_eq!(decode::<f64>(&bytes, Mode::Binary).unwrap(), 1.5);

        let bytes = encode(0.25f64, Mode::Binary);
        assert_eq!(decode::<f32>(&bytes, Mode::Binary).unwrap(), 0.25);
    }

    #[test]
    fn test_binary_float_bad_marker() {
        assert!(decode::<f32>(&[3, 0, 0, 0], Mode::Binary).is_err());
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(encode(-12i32, Mode::Text), b"-12 ");
        assert_eq!(encode(true, Mode::Text), b"T ");
        assert_eq!(encode(false, Mode::Binary), b"F");
        assert_eq!(encode(0.5f32, Mode::Text), b"0.5 ");
        assert_eq!(encode(1e300f64, Mode::Text), b"1e300 ");
    }

    #[test]
    fn test_text_float_bits_survive() {
        for value in [0.1f64, -3.0e-12, f64::MAX, f64::MIN_POSITIVE, -0.0, f64::INFINITY] {
            let bytes = encode(value, Mode::Text);
            let back: f64 = decode(&bytes, Mode::Text).unwrap();
            assert_eq!(back.to_bits(), value.to_bits(), "{:?}", value);
        }
    }

    #[test]
    fn test_text_rejects_garbage() {
        assert!(decode::<i32>(b"12x ", Mode::Text).is_err());
        assert!(decode::<u8>(b"300 ", Mode::Text).is_err());
        assert!(decode::<bool>(b"X", Mode::Text).is_err());
        assert!(matches!(
            decode::<i32>(b"   ", Mode::Text),
            Err(Error::UnexpectedEof { .. })
        ));
    }
}
