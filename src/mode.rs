//! Record framing mode.
//!
//! Every record is written either in [`Mode::Text`] or [`Mode::Binary`]. The writer picks the
//! mode per record; readers recover it from the stream prologue (see [`crate::stream`]).
//!
//! ```rust
//! use kaldi_holder::Mode;
//!
//! assert_eq!(Mode::from(true), Mode::Binary);
//! assert!(!Mode::default().is_binary());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Framing convention for a single record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Text,
    Binary,
}

impl Mode {
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Mode::Binary)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Text => "text",
            Mode::Binary => "binary",
        }
    }
}

impl From<bool> for Mode {
    fn from(binary: bool) -> Self {
        if binary {
            Mode::Binary
        } else {
            Mode::Text
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
