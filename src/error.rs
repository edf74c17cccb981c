//! Defines the parse error and its position
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Error value a caller-supplied handler may return; it is kept as the cause of
/// an [`ErrorKind::Handler`] error.
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// The failure taxonomy. Every kind is fatal to the parse call that raised it.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is longer than the configured maximum (see [`crate::MAX_TAG_LENGTH`]).
    /// Reported before any character is scanned.
    TooLarge,
    /// An item with `=` has an empty key, such as `=value` or `''=value`.
    EmptyKey,
    /// A quoted run has no closing quote.
    UnterminatedQuote,
    /// A quote appears after unquoted content, or content follows a closed quote.
    QuoteNotEnclosing,
    /// A backslash is followed by a letter or digit.
    InvalidEscape,
    /// A backslash is the last character of the input.
    UnterminatedEscape,
    /// The caller's handler returned an error; see [`Error::cause`].
    Handler,
}

impl ErrorKind {
    /// Short fixed message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::TooLarge => "tag too large",
            ErrorKind::EmptyKey => "empty key",
            ErrorKind::UnterminatedQuote => "unterminated quote",
            ErrorKind::QuoteNotEnclosing => "quotes must enclose the entire value",
            ErrorKind::InvalidEscape => "invalid escape character",
            ErrorKind::UnterminatedEscape => "unterminated escape sequence",
            ErrorKind::Handler => "handler failed",
        }
    }
}

/// Error returned by all parse entry points.
///
/// It keeps the complete input the caller passed in, so the failure can be shown
/// in context, and the 0-based byte offset of the character that caused it. The
/// offset always refers to the caller's string, also when surrounding double
/// quotes were stripped before scanning.
///
/// `Display` renders `"<message> (at <offset + 1>)"`, or
/// `"<key>: <cause> (at <offset + 1>)"` when a handler failed on a keyed item.
#[derive(Debug)]
pub struct Error {
    input: String,
    offset: usize,
    kind: ErrorKind,
    key: Option<String>,
    cause: Option<BoxedCause>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, input: &str, offset: usize) -> Self {
        Error {
            input: input.to_owned(),
            offset,
            kind,
            key: None,
            cause: None,
        }
    }

    pub(crate) fn too_large(input: &str) -> Self {
        Error::new(ErrorKind::TooLarge, input, 0)
    }

    /// Wrap a handler failure. An empty `key` means the handler was given the name.
    pub(crate) fn handler(input: &str, offset: usize, key: &str, cause: BoxedCause) -> Self {
        Error {
            input: input.to_owned(),
            offset,
            kind: ErrorKind::Handler,
            key: (!key.is_empty()).then(|| key.to_owned()),
            cause: Some(cause),
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 0-based byte offset into [`Error::input`].
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based position, as shown in the rendered message.
    pub fn position(&self) -> usize {
        self.offset + 1
    }

    /// The complete tag as passed by the caller.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Key of the item whose handler call failed, if the item had one.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The message without position: the kind's fixed text, or the cause's text for
    /// handler failures.
    pub fn message(&self) -> Cow<'_, str> {
        match &self.cause {
            Some(cause) => Cow::Owned(cause.to_string()),
            None => Cow::Borrowed(self.kind.message()),
        }
    }

    /// The error returned by the caller's handler, for [`ErrorKind::Handler`].
    ///
    /// Use `downcast_ref` to check for a particular error value.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Take ownership of the handler's error.
    pub fn into_cause(self) -> Option<BoxedCause> {
        self.cause
    }

    /// `true` when the input was rejected by the size guard.
    pub fn is_too_large(&self) -> bool {
        self.kind == ErrorKind::TooLarge
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.position();
        match (&self.key, &self.cause) {
            (Some(key), Some(cause)) => write!(f, "{key}: {cause} (at {at})"),
            (None, Some(cause)) => write!(f, "{cause} (at {at})"),
            _ => write!(f, "{} (at {at})", self.kind.message()),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_ref().map(|cause| &**cause as &(dyn StdError + 'static))
    }
}
