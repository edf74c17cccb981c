//! Cursor-driven scanner for the tag mini-language.
//!
//! A tag is a sequence of items separated by unquoted, unescaped commas. Each
//! item is a bare flag (`omitempty`), a pair (`min=5`), or, for the first item in
//! name-extraction mode, the name. Items are scanned in one linear pass; quoting
//! and backslash escapes are resolved inline.
//!
//! Decoded text is handed out as slices of the input whenever an item needed no
//! decoding. Only quoted or escaped halves that contain escapes are copied, into
//! two scratch buffers that are reused for every item of the call.

use std::ops::Range;

use tracing::{debug, trace};

use crate::error::{Error, ErrorKind};
use crate::sink::OptionSink;

/// Whether the first item may be the tag's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every item is an option.
    #[default]
    Options,
    /// A first item without `=` is the name. It is delivered to the sink as
    /// `("", name)`.
    WithName,
}

/// Which half of an item is being scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Half {
    Key,
    Value,
}

/// Where the decoded text of one half lives.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    /// Verbatim slice of the scanned text.
    Slice(Range<usize>),
    /// Decoded into the scratch buffer of its half.
    Buffered,
}

/// One comma-delimited item, before classification.
#[derive(Debug)]
struct Item {
    /// Offset of the item's first byte, leading blanks included.
    start: usize,
    key: Piece,
    /// `None` when the item had no `=`.
    value: Option<Piece>,
}

/// How a present item is dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemKind {
    Name,
    Flag,
    Pair,
}

/// Decoding progress within one half.
struct Decode {
    half: Half,
    /// First byte of the half's content.
    start: usize,
    /// First byte of the verbatim run not yet copied into the buffer.
    run: usize,
    buffered: bool,
}

impl Decode {
    fn new(half: Half, start: usize) -> Self {
        Decode {
            half,
            start,
            run: start,
            buffered: false,
        }
    }
}

/// ASCII blanks skipped around keys and values.
#[inline]
fn is_blank(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Remove one pair of surrounding double quotes, as found when a tag is copied
/// verbatim out of a quoted source literal.
pub(crate) fn strip_outer_quotes(input: &str) -> Option<&str> {
    input.strip_prefix('"')?.strip_suffix('"')
}

pub(crate) struct Scanner<'a> {
    /// The caller's input, kept for error reporting.
    original: &'a str,
    /// The text being scanned (`original` without outer quotes, if stripped).
    src: &'a str,
    /// Offset of `src` within `original`.
    base: usize,
    pos: usize,
    key_buf: String,
    value_buf: String,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(original: &'a str, strip_quotes: bool) -> Self {
        let stripped = if strip_quotes {
            strip_outer_quotes(original)
        } else {
            None
        };
        let (src, base) = match stripped {
            Some(inner) => (inner, 1),
            None => (original, 0),
        };
        Scanner {
            original,
            src,
            base,
            pos: 0,
            key_buf: String::new(),
            value_buf: String::new(),
        }
    }

    /// Scan the whole input, feeding every present item to `sink`.
    ///
    /// Stops at the first failure; pairs already accepted by the sink stay accepted.
    pub(crate) fn run<S: OptionSink + ?Sized>(mut self, mode: Mode, sink: &mut S) -> Result<(), Error> {
        let mut first = true;
        while let Some(item) = self.next_item()? {
            let name_candidate = first && mode == Mode::WithName;
            first = false;

            let Some(kind) = self.classify(&item, name_candidate)? else {
                trace!("skipping empty item at {}", item.start);
                continue;
            };

            let key = self.text(&item.key, Half::Key);
            let value = item.value.as_ref().map_or("", |v| self.text(v, Half::Value));
            let (key, value) = match kind {
                ItemKind::Name => ("", key),
                ItemKind::Flag | ItemKind::Pair => (key, value),
            };
            trace!("{:?} at {}: {:?} = {:?}", kind, item.start, key, value);

            if let Err(cause) = sink.accept(key, value) {
                let err = Error::handler(self.original, self.base + item.start, key, cause.into());
                debug!("tag handler failed: {err}");
                return Err(err);
            }
        }
        Ok(())
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(b) if is_blank(b)) {
            self.pos += 1;
        }
    }

    /// Build an error anchored to the caller's input.
    #[cold]
    fn fail(&self, kind: ErrorKind, offset: usize) -> Error {
        let err = Error::new(kind, self.original, self.base + offset);
        debug!("tag scan failed: {err}");
        err
    }

    fn buffer(&mut self, half: Half) -> &mut String {
        match half {
            Half::Key => &mut self.key_buf,
            Half::Value => &mut self.value_buf,
        }
    }

    fn text(&self, piece: &Piece, half: Half) -> &str {
        match piece {
            Piece::Slice(range) => &self.src[range.clone()],
            Piece::Buffered => match half {
                Half::Key => &self.key_buf,
                Half::Value => &self.value_buf,
            },
        }
    }

    /// Scan the next item, consuming its terminating comma.
    ///
    /// Returns `None` once the input is exhausted. Empty items (`,,`) are returned
    /// with an empty key so the classifier can tell them apart from `=value`.
    fn next_item(&mut self) -> Result<Option<Item>, Error> {
        if self.pos >= self.src.len() {
            return Ok(None);
        }
        let start = self.pos;

        let key = self.scan_half(Half::Key)?;
        let value = if self.peek() == Some(b'=') {
            self.pos += 1;
            Some(self.scan_half(Half::Value)?)
        } else {
            None
        };

        // Halves stop only at a comma or at the end of input.
        if self.peek() == Some(b',') {
            self.pos += 1;
        }
        Ok(Some(Item { start, key, value }))
    }

    fn classify(&self, item: &Item, name_candidate: bool) -> Result<Option<ItemKind>, Error> {
        let key_empty = self.text(&item.key, Half::Key).is_empty();
        match (&item.value, key_empty) {
            // Nothing but blanks between two commas.
            (None, true) => Ok(None),
            (None, false) if name_candidate => Ok(Some(ItemKind::Name)),
            (None, false) => Ok(Some(ItemKind::Flag)),
            (Some(_), true) => Err(self.fail(ErrorKind::EmptyKey, item.start)),
            (Some(_), false) => Ok(Some(ItemKind::Pair)),
        }
    }

    fn scan_half(&mut self, half: Half) -> Result<Piece, Error> {
        self.skip_blanks();
        if self.peek() == Some(b'\'') {
            self.scan_quoted(half)
        } else {
            self.scan_unquoted(half)
        }
    }

    /// Scan up to a comma, the end of input, or (key half only) an `=`.
    /// Trailing blanks are dropped unless escaped.
    fn scan_unquoted(&mut self, half: Half) -> Result<Piece, Error> {
        let src = self.src;
        let bytes = src.as_bytes();
        let mut decode = Decode::new(half, self.pos);
        let mut pos = self.pos;

        while let Some(&b) = bytes.get(pos) {
            match b {
                b',' => break,
                b'=' if half == Half::Key => break,
                b'\'' => return Err(self.fail(ErrorKind::QuoteNotEnclosing, pos)),
                b'\\' => pos = self.push_escape(&mut decode, pos)?,
                _ => pos += 1,
            }
        }
        self.pos = pos;

        let mut end = pos;
        while end > decode.run && is_blank(bytes[end - 1]) {
            end -= 1;
        }
        Ok(self.finish(decode, end))
    }

    /// Scan a single-quoted run starting at the cursor. Only blanks may follow the
    /// closing quote before the item (or, for a key, its half) ends.
    fn scan_quoted(&mut self, half: Half) -> Result<Piece, Error> {
        let src = self.src;
        let bytes = src.as_bytes();
        let open = self.pos;
        let mut decode = Decode::new(half, open + 1);
        let mut pos = open + 1;

        let close = loop {
            match bytes.get(pos) {
                None => return Err(self.fail(ErrorKind::UnterminatedQuote, open)),
                Some(b'\'') => break pos,
                Some(b'\\') => pos = self.push_escape(&mut decode, pos)?,
                Some(_) => pos += 1,
            }
        };

        self.pos = close + 1;
        self.skip_blanks();
        match self.peek() {
            None | Some(b',') => {}
            Some(b'=') if half == Half::Key => {}
            Some(_) => return Err(self.fail(ErrorKind::QuoteNotEnclosing, close)),
        }
        Ok(self.finish(decode, close))
    }

    /// Decode the escape whose backslash is at `backslash`, flushing the pending
    /// verbatim run first. Returns the offset just past the escaped character.
    fn push_escape(&mut self, decode: &mut Decode, backslash: usize) -> Result<usize, Error> {
        let src = self.src;
        let escaped = match src[backslash + 1..].chars().next() {
            None => return Err(self.fail(ErrorKind::UnterminatedEscape, backslash)),
            Some(c) if c.is_alphanumeric() => {
                return Err(self.fail(ErrorKind::InvalidEscape, backslash + 1));
            }
            Some(c) => c,
        };

        let buf = self.buffer(decode.half);
        if !decode.buffered {
            buf.clear();
            decode.buffered = true;
        }
        buf.push_str(&src[decode.run..backslash]);
        buf.push(escaped);

        decode.run = backslash + 1 + escaped.len_utf8();
        Ok(decode.run)
    }

    fn finish(&mut self, decode: Decode, end: usize) -> Piece {
        if decode.buffered {
            let src = self.src;
            self.buffer(decode.half).push_str(&src[decode.run..end]);
            Piece::Buffered
        } else {
            Piece::Slice(decode.start..end)
        }
    }
}
