use alloc::string::ToString;

use crate::{JsonError, JsonEvent, JsonReader, ReaderOptions, StringSource};

/// Drains a reader until it errors, panicking if the input parses cleanly.
fn read_until_error(text: &str) -> JsonError {
    let mut reader = JsonReader::from_string(text);
    loop {
        match reader.read() {
            Ok(true) => {}
            Ok(false) => panic!("expected a parse failure for {text:?}"),
            Err(err) => return err,
        }
    }
}

#[test]
fn truncated_documents_dont_evaluate() {
    for text in ["{", "[", r#"{"a""#, r#"{"a":"#, "[1,", r#"{"a":1,"#] {
        assert_eq!(read_until_error(text), JsonError::IncompleteJson, "{text}");
    }
    assert_eq!(
        read_until_error("[").to_string(),
        "input doesn't evaluate to proper JSON text"
    );
}

#[test]
fn empty_input_is_not_a_document() {
    assert_eq!(read_until_error(""), JsonError::IncompleteJson);
    assert_eq!(read_until_error("  \t\n"), JsonError::IncompleteJson);
    // Comments alone leave no document either.
    assert_eq!(read_until_error("/* only */"), JsonError::IncompleteJson);
}

#[test]
fn table_misses_name_the_unexpected_terminal() {
    assert_eq!(read_until_error("{]"), JsonError::InvalidToken("]"));
    assert_eq!(
        read_until_error("{]").to_string(),
        "invalid token ']' in input string"
    );
    assert_eq!(read_until_error("[1 2]"), JsonError::InvalidToken("NUMBER"));
    assert_eq!(read_until_error(r#"{"a" 1}"#), JsonError::InvalidToken("NUMBER"));
    assert_eq!(read_until_error("[,]"), JsonError::InvalidToken(","));
    assert_eq!(read_until_error(r#"{"a":1 "b":2}"#), JsonError::InvalidToken("\""));
    assert_eq!(read_until_error("]"), JsonError::InvalidToken("]"));
}

#[test]
fn trailing_garbage_is_a_fresh_parse_error() {
    let mut reader = JsonReader::from_string("{} ]");
    assert!(reader.read().unwrap());
    assert!(reader.read().unwrap());
    assert!(!reader.read().unwrap()); // document accepted
    assert_eq!(reader.read().unwrap_err(), JsonError::InvalidToken("]"));
}

#[test]
fn lexical_errors_carry_position() {
    assert_eq!(
        read_until_error("[@]"),
        JsonError::InvalidCharacter {
            ch: '@',
            line: 1,
            column: 2
        }
    );
}

#[test]
fn truncated_lexemes_are_lexical_errors() {
    assert!(matches!(
        read_until_error("tru"),
        JsonError::UnexpectedEndOfInput { .. }
    ));
    assert!(matches!(
        read_until_error("[1."),
        JsonError::UnexpectedEndOfInput { .. }
    ));
    assert!(matches!(
        read_until_error(r#"["abc"#),
        JsonError::UnexpectedEndOfInput { .. }
    ));
}

#[test]
fn invalid_escape_is_rejected() {
    assert!(matches!(
        read_until_error(r#"["\x"]"#),
        JsonError::InvalidCharacter { ch: 'x', .. }
    ));
    assert_eq!(
        read_until_error(r#"["\uD800"]"#),
        JsonError::InvalidUnicodeEscape(0xD800)
    );
}

#[test]
fn out_of_range_numbers_are_rejected() {
    let err = read_until_error("[18446744073709551616]");
    assert_eq!(
        err,
        JsonError::NumberOutOfRange("18446744073709551616".into())
    );
    assert_eq!(
        err.to_string(),
        "number '18446744073709551616' is out of range"
    );
}

#[test]
fn extensions_can_be_turned_off() {
    let strict = ReaderOptions {
        allow_comments: false,
        allow_single_quoted_strings: false,
        ..Default::default()
    };

    let mut reader = JsonReader::new(StringSource::new("// hi\n1"), strict);
    assert!(matches!(
        reader.read().unwrap_err(),
        JsonError::InvalidCharacter { ch: '/', .. }
    ));

    let mut reader = JsonReader::new(StringSource::new("'x'"), strict);
    assert!(matches!(
        reader.read().unwrap_err(),
        JsonError::InvalidCharacter { ch: '\'', .. }
    ));
}

#[test]
fn iterator_reports_one_error_then_stops() {
    let mut reader = JsonReader::from_string("[1, oops]");
    let mut events = 0usize;
    let mut errors = 0usize;
    for item in &mut reader {
        match item {
            Ok(_) => events += 1,
            Err(_) => errors += 1,
        }
    }
    assert_eq!((events, errors), (2, 1));
    assert_eq!(reader.token(), None);
}

#[test]
fn error_does_not_consume_the_reader() {
    // The caller decides what to do after a failure; the source stays open
    // and further reads simply keep failing at the same spot.
    let mut reader = JsonReader::from_string("{,}");
    assert!(reader.read().unwrap());
    assert_eq!(reader.take_token(), Some(JsonEvent::ObjectStart));
    assert_eq!(reader.read().unwrap_err(), JsonError::InvalidToken(","));
    assert!(!reader.end_of_input());
}
