//! The [`Holder`] capability shared by every record type.
//!
//! A holder exclusively owns one value. It can be filled from a stream with
//! [`Holder::read`], written out with [`Holder::write`], emptied with [`Holder::clear`], and
//! its value can be exchanged with another holder of the same kind through
//! [`Holder::swap`]. Holders are never `Clone`; swapping is the only way a value moves
//! between two of them, which lets an archive layer pool holders without copying.
//!
//! Archive code should be generic over `H: Holder` rather than over the concrete
//! [`ScalarHolder`](crate::ScalarHolder), [`SequenceHolder`](crate::SequenceHolder) and
//! [`TokenHolder`](crate::TokenHolder) types.
//!
//! ```rust
//! use kaldi_holder::{Holder, Int32Holder, Mode, RecordReader};
//!
//! fn round_trip<H: Holder>(value: &H::Value, mode: Mode) -> H {
//!     let mut buf = Vec::new();
//!     H::write(&mut buf, mode, value).unwrap();
//!     let mut holder = H::default();
//!     holder.read(&mut RecordReader::new(&buf[..])).unwrap();
//!     holder
//! }
//!
//! let holder: Int32Holder = round_trip(&-7, Mode::Binary);
//! assert_eq!(*holder.value(), -7);
//! ```

use crate::{Error, Mode, RecordReader, Result, ScalarHolder, SequenceHolder};
use std::io::{BufRead, Write};
use tracing::warn;

/// Read/write capability for one kind of record.
pub trait Holder: Default {
    /// The owned value.
    type Value;

    /// Writes `value` as one complete record.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying stream fails. A failed write is not rolled back.
    ///
    /// # Panics
    ///
    /// Panics when `value` breaks a precondition of the record kind, such as an invalid
    /// token or a binary sequence longer than `i32::MAX`.
    fn write<W: Write + ?Sized>(writer: &mut W, mode: Mode, value: &Self::Value) -> Result<()>;

    /// Reads one complete record into the holder.
    ///
    /// # Errors
    ///
    /// Returns an error for a corrupt prologue, a malformed record or a premature end of
    /// input. After a failed read the held value must not be used.
    fn read<R: BufRead>(&mut self, reader: &mut RecordReader<R>) -> Result<()>;

    /// Whether the archive layer should open streams for this record kind in binary mode.
    fn is_read_in_binary() -> bool;

    fn value(&self) -> &Self::Value;

    fn value_mut(&mut self) -> &mut Self::Value;

    fn into_value(self) -> Self::Value;

    /// Resets the value to its default.
    fn clear(&mut self);

    /// Exchanges the values of two holders.
    fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self.value_mut(), other.value_mut());
    }

    /// Fills this holder with the sub-range `range` of `other`.
    ///
    /// No current holder supports ranges, so the default reports [`Error::Unsupported`].
    fn extract_range(&mut self, _other: &Self, range: &str) -> Result<()> {
        let err = Error::unsupported(&format!(
            "extract_range('{}') is not defined for this type of holder",
            range
        ));
        warn!(error = %err, "range extraction requested");
        Err(err)
    }
}

/// Logs a failed read together with the offset where the record began.
pub(crate) fn log_read_failure<T>(result: Result<T>, record: &str, position: u64) -> Result<T> {
    result.map_err(|err| {
        warn!(position, error = %err, "reading {} record failed", record);
        err
    })
}

pub(crate) fn log_write_failure(result: Result<()>, record: &str, mode: Mode) -> Result<()> {
    result.map_err(|err| {
        warn!(%mode, error = %err, "writing {} record failed", record);
        err
    })
}

pub type BoolHolder = ScalarHolder<bool>;
pub type Int8Holder = ScalarHolder<i8>;
pub type Int32Holder = ScalarHolder<i32>;
pub type Int64Holder = ScalarHolder<i64>;
pub type UInt32Holder = ScalarHolder<u32>;
pub type FloatHolder = ScalarHolder<f32>;
pub type DoubleHolder = ScalarHolder<f64>;

pub type Int32VectorHolder = SequenceHolder<i32>;
pub type Int64VectorHolder = SequenceHolder<i64>;
pub type FloatVectorHolder = SequenceHolder<f32>;
pub type DoubleVectorHolder = SequenceHolder<f64>;
