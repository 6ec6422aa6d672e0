//! Dynamically typed records.
//!
//! Archive code that only learns a record's shape at runtime can describe it with a
//! [`Kind`] and read it into a [`Value`]. Every read and write is delegated to the typed
//! holders, so the encodings are the same as
//! [`ScalarHolder`], [`SequenceHolder`] and [`TokenHolder`].
//!
//! ## Core Types
//!
//! - [`ScalarType`]: the element type of a scalar or sequence record
//! - [`Scalar`] / [`Sequence`]: one value or a homogeneous list, tagged by element type
//! - [`Kind`]: the shape of a record
//! - [`Value`]: a record of any shape
//!
//! Values implement serde's traits, which makes dumping records as JSON straightforward:
//!
//! ```rust
//! use kaldi_holder::{Kind, Mode, RecordReader, ScalarType, Value};
//!
//! let mut buf = Vec::new();
//! Value::from(vec![1i32, 2, 3]).write(&mut buf, Mode::Binary).unwrap();
//!
//! let kind = Kind::Sequence(ScalarType::Int32);
//! let value = Value::read(&mut RecordReader::new(&buf[..]), kind).unwrap();
//! assert_eq!(value.kind(), kind);
//! ```

use crate::{Holder, Mode, RecordReader, Result, ScalarHolder, SequenceHolder, TokenHolder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};

macro_rules! scalar_types {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// Element type of a scalar or sequence record.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum ScalarType {
            $($variant),*
        }

        /// A single scalar tagged with its type.
        #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type", content = "value", rename_all = "lowercase")]
        pub enum Scalar {
            $($variant($ty)),*
        }

        /// A homogeneous list of scalars tagged with the element type.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type", content = "values", rename_all = "lowercase")]
        pub enum Sequence {
            $($variant(Vec<$ty>)),*
        }

        impl ScalarType {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(ScalarType::$variant => stringify!($ty)),*
                }
            }
        }

        impl Scalar {
            #[must_use]
            pub fn scalar_type(&self) -> ScalarType {
                match self {
                    $(Scalar::$variant(_) => ScalarType::$variant),*
                }
            }

            fn read<R: BufRead>(reader: &mut RecordReader<R>, ty: ScalarType) -> Result<Self> {
                match ty {
                    $(ScalarType::$variant => {
                        let mut holder = ScalarHolder::<$ty>::default();
                        holder.read(reader)?;
                        Ok(Scalar::$variant(holder.into_value()))
                    })*
                }
            }

            fn write<W: Write + ?Sized>(&self, writer: &mut W, mode: Mode) -> Result<()> {
                match self {
                    $(Scalar::$variant(v) => ScalarHolder::<$ty>::write(writer, mode, v)),*
                }
            }
        }

        impl Sequence {
            #[must_use]
            pub fn scalar_type(&self) -> ScalarType {
                match self {
                    $(Sequence::$variant(_) => ScalarType::$variant),*
                }
            }

            #[must_use]
            pub fn len(&self) -> usize {
                match self {
                    $(Sequence::$variant(v) => v.len()),*
                }
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            fn read<R: BufRead>(reader: &mut RecordReader<R>, ty: ScalarType) -> Result<Self> {
                match ty {
                    $(ScalarType::$variant => {
                        let mut holder = SequenceHolder::<$ty>::default();
                        holder.read(reader)?;
                        Ok(Sequence::$variant(holder.into_value()))
                    })*
                }
            }

            fn write<W: Write + ?Sized>(&self, writer: &mut W, mode: Mode) -> Result<()> {
                match self {
                    $(Sequence::$variant(v) => SequenceHolder::<$ty>::write(writer, mode, v)),*
                }
            }
        }

        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v)
                }
            }

            impl From<Vec<$ty>> for Sequence {
                fn from(v: Vec<$ty>) -> Self {
                    Sequence::$variant(v)
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::$variant(v))
                }
            }

            impl From<Vec<$ty>> for Value {
                fn from(v: Vec<$ty>) -> Self {
                    Value::Sequence(Sequence::$variant(v))
                }
            }
        )*
    };
}

scalar_types! {
    Bool => bool,
    Int8 => i8,
    Int16 => i16,
    Int32 => i32,
    Int64 => i64,
    UInt8 => u8,
    UInt16 => u16,
    UInt32 => u32,
    UInt64 => u64,
    Float => f32,
    Double => f64,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", content = "type", rename_all = "lowercase")]
pub enum Kind {
    Scalar(ScalarType),
    Sequence(ScalarType),
    Token,
}

impl Kind {
    /// Same answer as [`Holder::is_read_in_binary`] for the matching holder.
    #[must_use]
    pub fn is_read_in_binary(self) -> bool {
        match self {
            Kind::Scalar(_) => ScalarHolder::<i32>::is_read_in_binary(),
            Kind::Sequence(_) => SequenceHolder::<i32>::is_read_in_binary(),
            Kind::Token => TokenHolder::is_read_in_binary(),
        }
    }
}

/// A record of any shape.
///
/// # Examples
///
/// ```rust
/// use kaldi_holder::Value;
///
/// let value = Value::token("utt1");
/// assert_eq!(value.as_token(), Some("utt1"));
/// assert!(!value.is_scalar());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
    Scalar(Scalar),
    Sequence(Sequence),
    Token(String),
}

impl Value {
    /// Builds a token value. Validity is checked when the value is written.
    pub fn token(s: &str) -> Self {
        Value::Token(s.to_string())
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Scalar(s) => Kind::Scalar(s.scalar_type()),
            Value::Sequence(s) => Kind::Sequence(s.scalar_type()),
            Value::Token(_) => Kind::Token,
        }
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self, Value::Token(_))
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(s) => Some(s),
            _ => None,
        }
    }

    /// Reads one record of the given shape.
    ///
    /// # Errors
    ///
    /// Fails exactly when the matching holder's `read` fails.
    pub fn read<R: BufRead>(reader: &mut RecordReader<R>, kind: Kind) -> Result<Self> {
        match kind {
            Kind::Scalar(ty) => Scalar::read(reader, ty).map(Value::Scalar),
            Kind::Sequence(ty) => Sequence::read(reader, ty).map(Value::Sequence),
            Kind::Token => {
                let mut holder = TokenHolder::default();
                holder.read(reader)?;
                Ok(Value::Token(holder.into_value()))
            }
        }
    }

    /// Writes this value as one record.
    ///
    /// # Panics
    ///
    /// Panics on an invalid token or an oversized binary sequence, like the typed holders.
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W, mode: Mode) -> Result<()> {
        match self {
            Value::Scalar(s) => s.write(writer, mode),
            Value::Sequence(s) => s.write(writer, mode),
            Value::Token(t) => TokenHolder::write(writer, mode, t),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self {
        Value::Sequence(s)
    }
}
