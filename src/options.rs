#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MAX_TAG_LENGTH;

/// Parser configuration options.
///
/// Example: accept only short tags and keep surrounding double quotes as
/// part of the input.
///
/// ```rust
/// use tagparser::{ErrorKind, parse_with_options};
///
/// let options = tagparser::options! {
///     max_tag_length: 16,
///     strip_outer_quotes: false,
/// };
///
/// let err = parse_with_options("a_rather_long_flag,other", options.clone()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::TooLarge);
///
/// let tag = parse_with_options(r#""a""#, options).unwrap();
/// assert!(tag.has(r#""a""#));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Inputs longer than this many bytes are rejected with
    /// [`crate::ErrorKind::TooLarge`] before scanning. Inputs of exactly this
    /// length are accepted.
    ///
    /// Default: [`MAX_TAG_LENGTH`] (64 KiB)
    pub max_tag_length: usize,
    /// If `true`, a tag wrapped in double quotes (`"name,omitempty"`) is parsed
    /// without them. Error offsets still refer to the quoted input.
    ///
    /// Default: true
    pub strip_outer_quotes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_tag_length: MAX_TAG_LENGTH,
            strip_outer_quotes: true,
        }
    }
}
