//! String splitting and strict numeric parsing helpers.
//!
//! Whitespace here always means the C-locale set: space, `\t`, `\n`, `\v`, `\f`, `\r`.
//! Delimiter arguments are sets: every character in the string is a delimiter on its own.
//!
//! ```rust
//! use kaldi_holder::text_utils::{split_string_to_integers, split_string_to_vector};
//!
//! assert_eq!(split_string_to_vector("a,,b", ",", true), vec!["a", "b"]);
//! assert_eq!(split_string_to_integers::<i32>("1:2:3", ":", false), Some(vec![1, 2, 3]));
//! ```

use crate::reader::is_space;
use std::str::FromStr;

#[inline]
fn is_space_char(c: char) -> bool {
    c.is_ascii() && is_space(c as u8)
}

/// Splits `full` on any character in `delims`.
///
/// With `omit_empty`, only the nonempty pieces are kept. Without it, `n` delimiter
/// occurrences give exactly `n + 1` pieces, so the empty string yields one empty piece.
pub fn split_string_to_vector(full: &str, delims: &str, omit_empty: bool) -> Vec<String> {
    full.split(|c: char| delims.contains(c))
        .filter(|piece| !omit_empty || !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a base-10 integer, failing on trailing junk, overflow of `i64`, or a value that
/// does not fit `I`. Leading and trailing whitespace are allowed.
///
/// ```rust
/// use kaldi_holder::text_utils::convert_string_to_integer;
///
/// assert_eq!(convert_string_to_integer::<i32>(" 123 "), Some(123));
/// assert_eq!(convert_string_to_integer::<i32>("123x"), None);
/// assert_eq!(convert_string_to_integer::<u32>("-1"), None);
/// ```
pub fn convert_string_to_integer<I: TryFrom<i64>>(s: &str) -> Option<I> {
    s.trim_matches(is_space_char)
        .parse::<i64>()
        .ok()
        .and_then(|i| I::try_from(i).ok())
}

/// Parses a float, accepting `inf`, `-inf` and `nan` in any case. Leading and trailing
/// whitespace are allowed.
pub fn convert_string_to_real<F: FromStr>(s: &str) -> Option<F> {
    s.trim_matches(is_space_char).parse().ok()
}

/// Strips C-locale whitespace from both ends.
pub fn trim(s: &str) -> &str {
    s.trim_matches(is_space_char)
}

/// Trims `line`, then splits it at the first run of whitespace.
///
/// `rest` is empty when the trimmed line has no interior whitespace.
///
/// ```rust
/// use kaldi_holder::text_utils::split_string_on_first_space;
///
/// let (first, rest) = split_string_on_first_space("  utt1   a b  \n");
/// assert_eq!((first.as_str(), rest.as_str()), ("utt1", "a b"));
/// ```
pub fn split_string_on_first_space(line: &str) -> (String, String) {
    let line = trim(line);
    match line.find(is_space_char) {
        Some(idx) => (
            line[..idx].to_string(),
            line[idx..].trim_start_matches(is_space_char).to_string(),
        ),
        None => (line.to_string(), String::new()),
    }
}

/// Parses one piece of a delimited list: leading whitespace is tolerated, anything after
/// the digits is not.
fn parse_piece<T: FromStr>(piece: &str) -> Option<T> {
    piece.trim_start_matches(is_space_char).parse().ok()
}

/// Splits `full` on `delims` and parses every piece as an integer of type `I`.
///
/// The empty string is an empty list. Any piece that is not a complete integer, including
/// an empty piece when `omit_empty` is false, fails the whole call.
pub fn split_string_to_integers<I: TryFrom<i64>>(
    full: &str,
    delims: &str,
    omit_empty: bool,
) -> Option<Vec<I>> {
    if full.is_empty() {
        return Some(Vec::new());
    }
    split_string_to_vector(full, delims, omit_empty)
        .iter()
        .map(|piece| parse_piece::<i64>(piece).and_then(|i| I::try_from(i).ok()))
        .collect()
}

/// Float counterpart of [`split_string_to_integers`], with the same empty-input and
/// empty-piece rules.
pub fn split_string_to_floats<F: FromStr>(
    full: &str,
    delims: &str,
    omit_empty: bool,
) -> Option<Vec<F>> {
    if full.is_empty() {
        return Some(Vec::new());
    }
    split_string_to_vector(full, delims, omit_empty)
        .iter()
        .map(|piece| parse_piece(piece))
        .collect()
}

/// Returns true if `token` is nonempty and every character is printable and not whitespace.
///
/// Non-ASCII letters are accepted; the no-break space counts as whitespace.
pub fn is_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| !c.is_whitespace() && !c.is_control())
}

/// Returns true if `line` has no newline and no leading or trailing whitespace.
/// The empty string is a valid line.
pub fn is_line(line: &str) -> bool {
    if line.contains('\n') {
        return false;
    }
    match (line.chars().next(), line.chars().last()) {
        (Some(first), Some(last)) => !is_space_char(first) && !is_space_char(last),
        _ => true,
    }
}
