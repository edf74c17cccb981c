use std::error::Error as _;
use std::fmt;

use tagparser::{Error, ErrorKind, parse, parse_func, parse_func_with_name};

#[derive(Debug, PartialEq)]
struct Simulated;

impl fmt::Display for Simulated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("simulated error")
    }
}

impl std::error::Error for Simulated {}

#[test]
fn handler_error_on_name() {
    let err = parse_func_with_name("foo,bar=boz", |key, _| {
        if key.is_empty() { Err(Simulated) } else { Ok(()) }
    })
    .unwrap_err();

    assert_eq!(err.to_string(), "simulated error (at 1)");
    assert_eq!(err.kind(), ErrorKind::Handler);
    assert_eq!(err.key(), None);
    assert!(err.cause().is_some_and(|c| c.downcast_ref::<Simulated>().is_some()));
}

#[test]
fn handler_error_on_key() {
    let err = parse_func_with_name("foo,bar=boz", |key, _| {
        if key == "bar" { Err(Simulated) } else { Ok(()) }
    })
    .unwrap_err();

    assert_eq!(err.to_string(), "bar: simulated error (at 5)");
    assert_eq!(err.key(), Some("bar"));
    assert_eq!(err.message(), "simulated error");
    assert!(err.source().is_some_and(|c| c.is::<Simulated>()));

    let cause = err.into_cause().expect("handler errors carry a cause");
    assert_eq!(cause.downcast_ref::<Simulated>(), Some(&Simulated));
}

#[test]
fn handler_error_stops_scanning() {
    let mut calls = Vec::new();
    let err = parse_func("a,b,c,'unterminated", |key, _| {
        calls.push(key.to_owned());
        if key == "b" { Err(Simulated) } else { Ok(()) }
    })
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Handler);
    assert_eq!(calls, ["a", "b"]);
}

#[test]
fn pairs_before_syntax_error_are_delivered() {
    let mut calls = Vec::new();
    let err = parse_func("a=1,b=2,c='3", |key, value| {
        calls.push(format!("{key}={value}"));
        Ok::<(), Simulated>(())
    })
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnterminatedQuote);
    assert_eq!(calls, ["a=1", "b=2"]);
}

#[test]
fn anyhow_errors_are_accepted_as_causes() {
    let err = parse_func("min=abc", |key, value| -> anyhow::Result<()> {
        if key == "min" {
            value.parse::<u32>()?;
        }
        Ok(())
    })
    .unwrap_err();

    assert_eq!(err.key(), Some("min"));
    assert!(err.to_string().starts_with("min: invalid digit"));
    assert!(err.to_string().ends_with("(at 1)"));
}

#[test]
fn error_kinds_and_messages() {
    let cases = [
        ("'unterminated", ErrorKind::UnterminatedQuote, "unterminated quote"),
        ("foo'bar'", ErrorKind::QuoteNotEnclosing, "quotes must enclose"),
        (r"key\nvalue", ErrorKind::InvalidEscape, "invalid escape"),
        (r"key\x=value", ErrorKind::InvalidEscape, "invalid escape"),
        (r"opt1,opt\x2", ErrorKind::InvalidEscape, "invalid escape"),
        ("key1,=value", ErrorKind::EmptyKey, "empty key"),
        (r"key='value\", ErrorKind::UnterminatedEscape, "unterminated escape"),
        (r"al\", ErrorKind::UnterminatedEscape, "unterminated escape"),
        (r"k='a\nb'", ErrorKind::InvalidEscape, "invalid escape"),
    ];

    for (input, kind, text) in cases {
        let err: Error = parse(input).expect_err(input);
        assert_eq!(err.kind(), kind, "{input:?}");
        assert!(err.to_string().contains(text), "{input:?}: {err}");
        assert!(err.cause().is_none(), "{input:?}");
        assert_eq!(err.input(), input);
    }
}

#[test]
fn quote_after_content_points_at_quote() {
    let err = parse("foo'bar'").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::QuoteNotEnclosing);
    assert_eq!(err.offset(), 3);
    assert_eq!(err.position(), 4);
}

#[test]
fn unterminated_escape_points_at_backslash() {
    let err = parse(r"al\").unwrap_err();
    assert_eq!(err.offset(), 2);
}

#[test]
fn invalid_escape_points_at_escaped_character() {
    let err = parse(r"opt1,opt\x2").unwrap_err();
    assert_eq!(err.offset(), 9);
}

#[test]
fn escapes_inside_quotes_follow_the_same_rule() {
    let err = parse(r"k='a\nb'").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEscape);
    assert_eq!(err.offset(), 5);

    let tag = parse(r"k='a\,b'").unwrap();
    assert_eq!(tag.get("k"), Some("a,b"));
}

#[test]
fn errors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<Error>();
    assert_send_sync::<tagparser::Tag>();
    assert_send_sync::<tagparser::Options>();
}
