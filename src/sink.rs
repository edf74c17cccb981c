//! Receivers for decoded items.
//!
//! The scanner is generic over [`OptionSink`], so the map-building path and the
//! callback path share one state machine.

use std::convert::Infallible;

use crate::error::BoxedCause;
use crate::tag::Tag;

/// Receives `(key, value)` pairs from the scanner, in input order.
///
/// The key is never empty, except in name-extraction mode where the name is
/// delivered once as `("", name)`. Returning an error stops the scan; the error
/// is wrapped into [`crate::Error`] with [`crate::ErrorKind::Handler`].
///
/// Any `FnMut(&str, &str) -> Result<(), E>` is a sink.
///
/// ```rust
/// use tagparser::{Mode, OptionSink, Options, parse_into};
///
/// #[derive(Default)]
/// struct Limits {
///     min: Option<String>,
///     max: Option<String>,
/// }
///
/// impl OptionSink for Limits {
///     type Error = String;
///
///     fn accept(&mut self, key: &str, value: &str) -> Result<(), String> {
///         match key {
///             "min" => self.min = Some(value.to_owned()),
///             "max" => self.max = Some(value.to_owned()),
///             other => return Err(format!("unknown option {other}")),
///         }
///         Ok(())
///     }
/// }
///
/// let mut limits = Limits::default();
/// parse_into("min=1,max=9", Mode::Options, &Options::default(), &mut limits).unwrap();
/// assert_eq!(limits.max.as_deref(), Some("9"));
///
/// let err = parse_into("min=1,step=2", Mode::Options, &Options::default(), &mut limits).unwrap_err();
/// assert_eq!(err.to_string(), "step: unknown option step (at 7)");
/// ```
pub trait OptionSink {
    /// Error the sink may return to abort the scan.
    type Error: Into<BoxedCause>;

    fn accept(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<F, E> OptionSink for F
where
    F: FnMut(&str, &str) -> Result<(), E>,
    E: Into<BoxedCause>,
{
    type Error = E;

    #[inline]
    fn accept(&mut self, key: &str, value: &str) -> Result<(), E> {
        self(key, value)
    }
}

/// Collects pairs into a [`Tag`]; an empty key carries the name.
#[derive(Default)]
pub(crate) struct TagBuilder {
    tag: Tag,
}

impl TagBuilder {
    pub(crate) fn finish(self) -> Tag {
        self.tag
    }
}

impl OptionSink for TagBuilder {
    type Error = Infallible;

    fn accept(&mut self, key: &str, value: &str) -> Result<(), Infallible> {
        if key.is_empty() {
            self.tag.name = value.to_owned();
        } else {
            // Later occurrences of a key replace earlier ones.
            self.tag.options.insert(key.to_owned(), value.to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_last_write_wins() {
        let mut builder = TagBuilder::default();
        builder.accept("", "field").unwrap();
        builder.accept("min", "1").unwrap();
        builder.accept("min", "2").unwrap();
        let tag = builder.finish();
        assert_eq!(tag.name, "field");
        assert_eq!(tag.get("min"), Some("2"));
        assert_eq!(tag.options.len(), 1);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |key: &str, value: &str| -> Result<(), Infallible> {
            seen.push(format!("{key}={value}"));
            Ok(())
        };
        sink.accept("a", "b").unwrap();
        sink.accept("c", "").unwrap();
        assert_eq!(seen, ["a=b", "c="]);
    }
}
