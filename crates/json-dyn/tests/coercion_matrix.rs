//! Coercion matrix: optional, defaulted and strict accessors across every
//! value case.

use json_dyn::{ErrorKind, JsonError, JsonType, Value};
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

// ---------------------------------------------------------------------------
// Optional accessors match only their own case
// ---------------------------------------------------------------------------

#[test]
fn optional_accessors() {
    assert_eq!(v(json!("5")).as_i64(), None);
    assert_eq!(v(json!(5)).as_str(), None);
    assert_eq!(v(json!(1)).as_bool(), None);
    assert_eq!(v(json!(5)).as_i64(), Some(5));
    assert_eq!(v(json!(5.9)).as_i64(), Some(5));
    assert_eq!(v(json!(-1)).as_u64(), None);
    assert_eq!(v(json!(u64::MAX)).as_u64(), Some(u64::MAX));
    assert_eq!(v(json!(u64::MAX)).as_i64(), None);
    assert_eq!(v(json!(2)).as_f64(), Some(2.0));
    assert_eq!(v(json!([1])).as_array().map(Vec::len), Some(1));
    assert!(v(json!({})).as_object().is_some());
    assert!(v(json!(null)).as_object().is_none());
}

// ---------------------------------------------------------------------------
// Defaulted accessors
// ---------------------------------------------------------------------------

#[test]
fn string_coercion() {
    assert_eq!(v(json!("s")).string_value(), "s");
    assert_eq!(v(json!(12)).string_value(), "12");
    assert_eq!(v(json!(1.5)).string_value(), "1.5");
    assert_eq!(v(json!(true)).string_value(), "true");
    assert_eq!(v(json!(null)).string_value(), "");
    assert_eq!(v(json!([1])).string_or("d"), "d");
}

#[test]
fn integer_coercion() {
    let cases = [
        (json!(42), 42),
        (json!(-3.99), -3),
        (json!("17"), 17),
        (json!(" 8 "), 8),
        (json!("2.5"), 2),
        (json!("1e3"), 1000),
        (json!(true), 1),
        (json!(false), 0),
        (json!("abc"), -1),
        (json!(null), -1),
        (json!({"a": 1}), -1),
        (json!([]), -1),
    ];
    for (input, expected) in cases {
        assert_eq!(v(input.clone()).i64_or(-1), expected, "{input}");
    }
    assert_eq!(v(json!(null)).i64_value(), 0);
}

#[test]
fn unsigned_coercion() {
    assert_eq!(v(json!(7)).u64_value(), 7);
    assert_eq!(v(json!(-7)).u64_or(9), 9);
    assert_eq!(v(json!("-7")).u64_or(9), 9);
    assert_eq!(v(json!("18446744073709551615")).u64_value(), u64::MAX);
    assert_eq!(v(json!(1e30)).u64_value(), u64::MAX);
}

#[test]
fn float_coercion() {
    assert_eq!(v(json!(3)).f64_value(), 3.0);
    assert_eq!(v(json!("0.25")).f64_value(), 0.25);
    assert_eq!(v(json!("inf")).f64_or(-1.0), -1.0);
    assert_eq!(v(json!("NaN")).f64_or(-1.0), -1.0);
    assert_eq!(v(json!(true)).f64_value(), 1.0);
    assert_eq!(v(json!({})).f64_or(0.5), 0.5);
}

#[test]
fn bool_coercion() {
    let truthy = [json!(true), json!(1), json!(-0.5), json!("true"), json!("YES"), json!("1")];
    for input in truthy {
        assert!(v(input.clone()).bool_value(), "{input}");
    }
    let falsy = [json!(false), json!(0), json!(0.0), json!("False"), json!("no"), json!("0")];
    for input in falsy {
        assert!(!v(input.clone()).bool_or(true), "{input}");
    }
    assert!(v(json!("maybe")).bool_or(true));
    assert!(!v(json!(null)).bool_value());
}

#[test]
fn container_defaults_are_empty() {
    assert!(v(json!("x")).array_value().is_empty());
    assert!(v(json!(1)).object_value().is_empty());
    assert_eq!(v(json!([1, 2])).array_value().len(), 2);
    assert_eq!(v(json!({"k": 1})).object_value().len(), 1);
}

// ---------------------------------------------------------------------------
// Strict accessors
// ---------------------------------------------------------------------------

#[test]
fn strict_accessors_report_mismatch() {
    assert_eq!(v(json!("12")).try_i64(), Ok(12));
    assert_eq!(
        v(json!("twelve")).try_i64(),
        Err(JsonError::TypeMismatch {
            expected: "i64",
            found: JsonType::String
        })
    );
    assert_eq!(
        v(json!([1])).try_object().unwrap_err().kind(),
        ErrorKind::TypeMismatch
    );
    assert_eq!(v(json!(null)).try_string().unwrap_err().kind(), ErrorKind::TypeMismatch);
    assert_eq!(v(json!({"a": 1})).try_object().map(|m| m.len()), Ok(1));
    assert_eq!(v(json!([true])).try_array().map(<[Value]>::len), Ok(1));
    assert_eq!(v(json!("no")).try_bool(), Ok(false));
    assert_eq!(v(json!(2.5)).try_f64(), Ok(2.5));
    assert_eq!(v(json!(3)).try_u64(), Ok(3));
}

#[test]
fn strict_accessors_surface_carried_error() {
    let invalid = Value::Invalid(JsonError::NotExist("k".into()));
    assert_eq!(invalid.try_i64(), Err(JsonError::NotExist("k".into())));
    assert_eq!(invalid.try_string(), Err(JsonError::NotExist("k".into())));
    assert_eq!(invalid.i64_or(4), 4);
    assert_eq!(invalid.string_value(), "");
}

// ---------------------------------------------------------------------------
// Accessors on cursors
// ---------------------------------------------------------------------------

#[test]
fn cursor_accessors() {
    let doc = v(json!({"port": "8080", "debug": "yes", "hosts": ["a", "b"]}));
    assert_eq!(doc.by_key("port").u64_value(), 8080);
    assert!(doc.by_key("debug").bool_value());
    assert_eq!(doc.by_key("hosts").array_value().len(), 2);
    assert_eq!(doc.by_key("missing").string_or("none"), "none");
    assert_eq!(
        doc.by_key("missing").try_u64(),
        Err(JsonError::NotExist("missing".into()))
    );
    assert_eq!(
        doc.by_key("hosts").try_u64().unwrap_err().kind(),
        ErrorKind::TypeMismatch
    );
}
