//! Parser for compact, comma-delimited struct tags such as `json,omitempty,min=5`.
//!
//! A tag is a list of items separated by commas. An item is a bare flag
//! (`omitempty`) or a `key=value` pair; in name-extraction mode a leading item
//! without `=` is the tag's name. Keys and values may be single-quoted to
//! contain commas or `=` (`alfa='bravo,charlie'`), and a backslash escapes any
//! non-alphanumeric character (`a\,b`). Blanks around keys and values are
//! ignored. A tag wrapped in double quotes, as copied from a source literal, is
//! parsed without them.
//!
//! Two ways to consume a tag:
//! - [`parse`] and [`parse_with_name`] build a [`Tag`] with an options map.
//! - [`parse_func`] and [`parse_func_with_name`] hand each decoded `(key, value)`
//!   to a callback and allocate nothing unless an item needs unescaping.
//!
//! ```rust
//! let tag = tagparser::parse_with_name("name,omitempty,default='a,b'").unwrap();
//! assert_eq!(tag.name, "name");
//! assert_eq!(tag.get("omitempty"), Some(""));
//! assert_eq!(tag.get("default"), Some("a,b"));
//!
//! let err = tagparser::parse("min=5,'max").unwrap_err();
//! assert_eq!(err.to_string(), "unterminated quote (at 7)");
//! ```
#![forbid(unsafe_code)]

mod error;
mod macros;
#[cfg(feature = "miette")]
pub mod miette;
pub mod options;
mod quoting;
mod scanner;
mod sink;
#[cfg(feature = "snippet")]
mod snippet;
mod tag;

pub use error::{BoxedCause, Error, ErrorKind};
pub use options::Options;
pub use quoting::quote;
pub use scanner::Mode;
pub use sink::OptionSink;
pub use tag::Tag;

use scanner::Scanner;
use sink::TagBuilder;

/// Maximum accepted tag length in bytes (64 KiB). Longer inputs are rejected
/// with [`ErrorKind::TooLarge`] before scanning.
pub const MAX_TAG_LENGTH: usize = 64 * 1024;

/// Parse a tag where every item is an option.
///
/// ```rust
/// let tag = tagparser::parse("foo,bar=baz").unwrap();
/// assert_eq!(tag.name, "");
/// assert_eq!(tag.get("foo"), Some(""));
/// assert_eq!(tag.get("bar"), Some("baz"));
/// ```
pub fn parse(text: &str) -> Result<Tag, Error> {
    parse_with_options(text, Options::default())
}

/// Parse a tag whose first item, if it has no `=`, is the name.
///
/// ```rust
/// let tag = tagparser::parse_with_name("json,omitempty").unwrap();
/// assert_eq!(tag.name, "json");
///
/// // A leading comma means "no name".
/// let tag = tagparser::parse_with_name(",omitempty").unwrap();
/// assert_eq!(tag.name, "");
/// assert!(tag.has("omitempty"));
/// ```
pub fn parse_with_name(text: &str) -> Result<Tag, Error> {
    parse_with_name_with_options(text, Options::default())
}

/// Like [`parse`], with explicit [`Options`].
pub fn parse_with_options(text: &str, options: Options) -> Result<Tag, Error> {
    build_tag(text, Mode::Options, &options)
}

/// Like [`parse_with_name`], with explicit [`Options`].
pub fn parse_with_name_with_options(text: &str, options: Options) -> Result<Tag, Error> {
    build_tag(text, Mode::WithName, &options)
}

/// Call `handler` with each `(key, value)` of the tag, in order. Flags have an
/// empty value. The key is never empty.
///
/// If `handler` fails, parsing stops and the failure is returned as an
/// [`ErrorKind::Handler`] error carrying it as cause.
///
/// ```rust
/// let mut keys = Vec::new();
/// tagparser::parse_func("required,min=5", |key, _value| {
///     keys.push(key.to_owned());
///     Ok::<(), std::convert::Infallible>(())
/// })
/// .unwrap();
/// assert_eq!(keys, ["required", "min"]);
/// ```
pub fn parse_func<F, E>(text: &str, handler: F) -> Result<(), Error>
where
    F: FnMut(&str, &str) -> Result<(), E>,
    E: Into<BoxedCause>,
{
    parse_func_with_options(text, Options::default(), handler)
}

/// Like [`parse_func`] in name-extraction mode. A name is delivered as
/// `handler("", name)`.
pub fn parse_func_with_name<F, E>(text: &str, handler: F) -> Result<(), Error>
where
    F: FnMut(&str, &str) -> Result<(), E>,
    E: Into<BoxedCause>,
{
    parse_func_with_name_with_options(text, Options::default(), handler)
}

/// Like [`parse_func`], with explicit [`Options`].
pub fn parse_func_with_options<F, E>(text: &str, options: Options, mut handler: F) -> Result<(), Error>
where
    F: FnMut(&str, &str) -> Result<(), E>,
    E: Into<BoxedCause>,
{
    parse_into(text, Mode::Options, &options, &mut handler)
}

/// Like [`parse_func_with_name`], with explicit [`Options`].
pub fn parse_func_with_name_with_options<F, E>(
    text: &str,
    options: Options,
    mut handler: F,
) -> Result<(), Error>
where
    F: FnMut(&str, &str) -> Result<(), E>,
    E: Into<BoxedCause>,
{
    parse_into(text, Mode::WithName, &options, &mut handler)
}

/// Feed the tag's items to any [`OptionSink`].
///
/// All other entry points are thin wrappers around this one.
pub fn parse_into<S: OptionSink + ?Sized>(
    text: &str,
    mode: Mode,
    options: &Options,
    sink: &mut S,
) -> Result<(), Error> {
    if text.len() > options.max_tag_length {
        tracing::debug!(
            "tag of {} bytes exceeds the limit of {}",
            text.len(),
            options.max_tag_length
        );
        return Err(Error::too_large(text));
    }
    Scanner::new(text, options.strip_outer_quotes).run(mode, sink)
}

fn build_tag(text: &str, mode: Mode, options: &Options) -> Result<Tag, Error> {
    let mut builder = TagBuilder::default();
    parse_into(text, mode, options, &mut builder)?;
    Ok(builder.finish())
}
