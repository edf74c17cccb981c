//! `miette` integration.
//!
//! This module is feature-gated behind the `miette` feature.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};

use crate::Error;

/// Convert a parse [`Error`] into a `miette::Report`.
///
/// `file` names where the tag came from (a struct field, a config key) and is
/// shown in the report header. The report owns a copy of the tag.
///
/// # Example
///
/// ```rust,no_run
/// let err = tagparser::parse("min=5,=3").expect_err("empty key expected");
/// let report = tagparser::miette::to_miette_report(&err, "Config.retries");
///
/// // `Debug` formatting uses miette's graphical reporter.
/// eprintln!("{report:?}");
/// ```
pub fn to_miette_report(err: &Error, file: &str) -> miette::Report {
    miette::Report::new(build_diagnostic(err, file))
}

#[derive(Debug)]
struct TagDiagnostic {
    message: String,
    src: NamedSource<String>,
    label: LabeledSpan,
    help: Option<&'static str>,
}

impl fmt::Display for TagDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TagDiagnostic {}

impl Diagnostic for TagDiagnostic {
    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(self.label.clone())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help.map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

fn build_diagnostic(err: &Error, file: &str) -> TagDiagnostic {
    let input = err.input();
    let start = err.offset().min(input.len());
    let len = input[start..].chars().next().map_or(0, char::len_utf8);

    TagDiagnostic {
        message: err.to_string(),
        src: NamedSource::new(file, input.to_owned()),
        label: LabeledSpan::at(start..start + len, err.message().into_owned()),
        help: help_for(err.kind()),
    }
}

fn help_for(kind: crate::ErrorKind) -> Option<&'static str> {
    use crate::ErrorKind::*;
    match kind {
        QuoteNotEnclosing => Some("quote the whole key or value: key='a b'"),
        InvalidEscape => Some("only punctuation and blanks can be escaped with a backslash"),
        UnterminatedQuote => Some("add the closing single quote"),
        EmptyKey => Some("give the option a name before `=`"),
        _ => None,
    }
}
