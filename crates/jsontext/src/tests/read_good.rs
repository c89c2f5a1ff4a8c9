use alloc::{vec, vec::Vec};

use super::utils::read_events;
use crate::{JsonEvent, JsonReader, ReaderOptions, StringSource};

#[test]
fn object_with_mixed_members() {
    assert_eq!(
        read_events(r#"{"a":1,"b":[true,null,"x"]}"#),
        vec![
            JsonEvent::ObjectStart,
            JsonEvent::PropertyName("a".into()),
            JsonEvent::Int(1),
            JsonEvent::PropertyName("b".into()),
            JsonEvent::ArrayStart,
            JsonEvent::Boolean(true),
            JsonEvent::Null,
            JsonEvent::String("x".into()),
            JsonEvent::ArrayEnd,
            JsonEvent::ObjectEnd,
        ]
    );
}

#[test]
fn numbers_take_their_narrowest_type() {
    assert_eq!(
        read_events("[1, 2.5, 3e2, 9999999999]"),
        vec![
            JsonEvent::ArrayStart,
            JsonEvent::Int(1),
            JsonEvent::Double(2.5),
            JsonEvent::Double(300.0),
            JsonEvent::Long(9_999_999_999),
            JsonEvent::ArrayEnd,
        ]
    );
}

#[test]
fn unsigned_range_numbers() {
    assert_eq!(
        read_events("[9223372036854775808]"),
        vec![
            JsonEvent::ArrayStart,
            JsonEvent::ULong(9_223_372_036_854_775_808),
            JsonEvent::ArrayEnd,
        ]
    );
}

#[test]
fn comments_and_single_quotes_by_default() {
    assert_eq!(
        read_events("/*c*/ {'k': 'v' /* c */} // tail"),
        vec![
            JsonEvent::ObjectStart,
            JsonEvent::PropertyName("k".into()),
            JsonEvent::String("v".into()),
            JsonEvent::ObjectEnd,
        ]
    );
}

#[test]
fn empty_containers() {
    assert_eq!(
        read_events("{}"),
        vec![JsonEvent::ObjectStart, JsonEvent::ObjectEnd]
    );
    assert_eq!(
        read_events("[]"),
        vec![JsonEvent::ArrayStart, JsonEvent::ArrayEnd]
    );
    assert_eq!(
        read_events("[[],{}]"),
        vec![
            JsonEvent::ArrayStart,
            JsonEvent::ArrayStart,
            JsonEvent::ArrayEnd,
            JsonEvent::ObjectStart,
            JsonEvent::ObjectEnd,
            JsonEvent::ArrayEnd,
        ]
    );
}

#[test]
fn top_level_scalars() {
    assert_eq!(read_events("true"), vec![JsonEvent::Boolean(true)]);
    assert_eq!(read_events("null"), vec![JsonEvent::Null]);
    assert_eq!(read_events("-4"), vec![JsonEvent::Int(-4)]);
    assert_eq!(
        read_events("\"solo\""),
        vec![JsonEvent::String("solo".into())]
    );
}

#[test]
fn empty_string_values() {
    assert_eq!(
        read_events(r#"{"": ""}"#),
        vec![
            JsonEvent::ObjectStart,
            JsonEvent::PropertyName("".into()),
            JsonEvent::String("".into()),
            JsonEvent::ObjectEnd,
        ]
    );
}

#[test]
fn escapes_reach_the_event_unescaped() {
    assert_eq!(
        read_events(r#"["A\n\t\\\"\/"]"#),
        vec![
            JsonEvent::ArrayStart,
            JsonEvent::String("A\n\t\\\"/".into()),
            JsonEvent::ArrayEnd,
        ]
    );
}

#[test]
fn deeply_nested_structures() {
    let events = read_events(r#"{"a":{"b":{"c":[[[1]]]}}}"#);
    assert_eq!(events.len(), 16);
    assert_eq!(events[6], JsonEvent::ArrayStart);
    assert_eq!(events[9], JsonEvent::Int(1));
}

#[test]
fn whitespace_is_insignificant() {
    assert_eq!(
        read_events("\t{\r\n \"a\" :\t1 }\n"),
        read_events(r#"{"a":1}"#)
    );
}

#[test]
fn second_document_in_the_same_source() {
    let mut reader = JsonReader::from_string("{\"a\":1} [2]");

    let mut first = Vec::new();
    while reader.read().unwrap() {
        first.push(reader.take_token().unwrap());
    }
    assert!(reader.end_of_json());
    assert_eq!(first.len(), 4);

    // More text remains, so reading continues with a fresh document.
    let mut second = Vec::new();
    while reader.read().unwrap() {
        second.push(reader.take_token().unwrap());
    }
    assert_eq!(
        second,
        vec![JsonEvent::ArrayStart, JsonEvent::Int(2), JsonEvent::ArrayEnd]
    );

    // Nothing further: only whitespace-free end of input.
    assert!(!reader.read().unwrap());
    assert!(reader.end_of_input());
}

#[test]
fn iterator_crosses_document_boundaries() {
    let events = read_events("1 2 [3]");
    assert_eq!(
        events,
        vec![
            JsonEvent::Int(1),
            JsonEvent::Int(2),
            JsonEvent::ArrayStart,
            JsonEvent::Int(3),
            JsonEvent::ArrayEnd,
        ]
    );
}

#[test]
fn close_seals_the_reader() {
    let mut reader = JsonReader::from_string("[1, 2]");
    assert!(reader.read().unwrap());
    reader.close();
    assert!(!reader.read().unwrap());
    assert!(reader.end_of_input());
    assert!(reader.end_of_json());
}

#[test]
fn skip_non_members_is_carried() {
    let reader = JsonReader::from_string("{}");
    assert!(reader.skip_non_members);

    let strict = JsonReader::new(
        StringSource::new("{}"),
        ReaderOptions {
            skip_non_members: false,
            ..Default::default()
        },
    );
    assert!(!strict.skip_non_members);
}

#[test]
fn latched_token_survives_until_taken() {
    let mut reader = JsonReader::from_string("[7]");
    assert!(reader.read().unwrap());
    assert_eq!(reader.token(), Some(&JsonEvent::ArrayStart));
    assert_eq!(reader.token(), Some(&JsonEvent::ArrayStart));
    assert!(reader.read().unwrap());
    assert_eq!(reader.take_token(), Some(JsonEvent::Int(7)));
    assert_eq!(reader.token(), None);
}
