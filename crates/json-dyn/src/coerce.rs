//! Typed accessors.
//!
//! Every target type has three forms:
//! - optional (`as_*`): `Some` only when the case matches,
//! - defaulted (`*_value`, `*_or`): best-effort coercion, never fails,
//! - strict (`try_*`): the same coercion, `TypeMismatch` instead of a default.
//!
//! Coercion matrix used by the defaulted and strict forms:
//!
//! | target | String | Number | Bool |
//! |--------|--------|--------|------|
//! | string | itself | decimal text | `"true"`/`"false"` |
//! | i64/u64 | integer parse, else float parse truncated | integer part | 1/0 |
//! | f64 | float parse | float value | 1.0/0.0 |
//! | bool | `true/yes/1`, `false/no/0` (any case) | nonzero | itself |
//!
//! Null, arrays, objects and `Invalid` coerce to nothing. Arrays and objects
//! only match themselves.

use std::borrow::Cow;

use crate::error::JsonError;
use crate::navigate::Cursor;
use crate::value::{Map, Value};

fn coerce_string(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) | Value::Invalid(_) => None,
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => Some(n.to_i64_saturating()),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| parse_float(s).map(|f| f as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) | Value::Invalid(_) => None,
    }
}

fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.to_u64_saturating(),
        Value::String(s) => s.trim().parse::<u64>().ok().or_else(|| {
            parse_float(s)
                .filter(|f| *f > -1.0)
                .map(|f| f as u64)
        }),
        Value::Bool(b) => Some(u64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) | Value::Invalid(_) => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(n.as_f64()),
        Value::String(s) => parse_float(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) | Value::Invalid(_) => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(!n.is_zero()),
        Value::String(s) => {
            let s = s.trim();
            if ["true", "yes", "1"].iter().any(|t| s.eq_ignore_ascii_case(t)) {
                Some(true)
            } else if ["false", "no", "0"].iter().any(|t| s.eq_ignore_ascii_case(t)) {
                Some(false)
            } else {
                None
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) | Value::Invalid(_) => None,
    }
}

impl Value {
    fn strict<T>(&self, coerced: Option<T>, expected: &'static str) -> Result<T, JsonError> {
        match (coerced, self) {
            (Some(value), _) => Ok(value),
            (None, Value::Invalid(error)) => Err(error.clone()),
            (None, other) => Err(JsonError::TypeMismatch {
                expected,
                found: other.json_type(),
            }),
        }
    }

    // ── Optional ──────────────────────────────────────────────────────────

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    // ── Defaulted ─────────────────────────────────────────────────────────

    pub fn string_value(&self) -> String {
        self.string_or("")
    }

    pub fn string_or(&self, default: &str) -> String {
        coerce_string(self).map_or_else(|| default.to_string(), Cow::into_owned)
    }

    pub fn i64_value(&self) -> i64 {
        self.i64_or(0)
    }

    pub fn i64_or(&self, default: i64) -> i64 {
        coerce_i64(self).unwrap_or(default)
    }

    pub fn u64_value(&self) -> u64 {
        self.u64_or(0)
    }

    pub fn u64_or(&self, default: u64) -> u64 {
        coerce_u64(self).unwrap_or(default)
    }

    pub fn f64_value(&self) -> f64 {
        self.f64_or(0.0)
    }

    pub fn f64_or(&self, default: f64) -> f64 {
        coerce_f64(self).unwrap_or(default)
    }

    pub fn bool_value(&self) -> bool {
        self.bool_or(false)
    }

    pub fn bool_or(&self, default: bool) -> bool {
        coerce_bool(self).unwrap_or(default)
    }

    pub fn array_value(&self) -> &[Value] {
        self.as_array().map_or(&[][..], Vec::as_slice)
    }

    pub fn object_value(&self) -> Cow<'_, Map> {
        self.as_object()
            .map_or_else(|| Cow::Owned(Map::new()), Cow::Borrowed)
    }

    // ── Strict ────────────────────────────────────────────────────────────

    pub fn try_string(&self) -> Result<String, JsonError> {
        self.strict(coerce_string(self), "string").map(Cow::into_owned)
    }

    pub fn try_i64(&self) -> Result<i64, JsonError> {
        self.strict(coerce_i64(self), "i64")
    }

    pub fn try_u64(&self) -> Result<u64, JsonError> {
        self.strict(coerce_u64(self), "u64")
    }

    pub fn try_f64(&self) -> Result<f64, JsonError> {
        self.strict(coerce_f64(self), "f64")
    }

    pub fn try_bool(&self) -> Result<bool, JsonError> {
        self.strict(coerce_bool(self), "bool")
    }

    pub fn try_array(&self) -> Result<&[Value], JsonError> {
        self.strict(self.as_array().map(Vec::as_slice), "array")
    }

    pub fn try_object(&self) -> Result<&Map, JsonError> {
        self.strict(self.as_object(), "object")
    }
}

/// The same accessors on a cursor; a failed cursor behaves like `Invalid`.
impl<'a> Cursor<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        self.get().and_then(Value::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.get().and_then(Value::as_i64)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.get().and_then(Value::as_u64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.get().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.get().and_then(Value::as_bool)
    }

    pub fn as_array(&self) -> Option<&'a Vec<Value>> {
        self.get().and_then(Value::as_array)
    }

    pub fn as_object(&self) -> Option<&'a Map> {
        self.get().and_then(Value::as_object)
    }

    pub fn string_value(&self) -> String {
        self.string_or("")
    }

    pub fn string_or(&self, default: &str) -> String {
        self.get()
            .map_or_else(|| default.to_string(), |value| value.string_or(default))
    }

    pub fn i64_value(&self) -> i64 {
        self.i64_or(0)
    }

    pub fn i64_or(&self, default: i64) -> i64 {
        self.get().map_or(default, |value| value.i64_or(default))
    }

    pub fn u64_value(&self) -> u64 {
        self.u64_or(0)
    }

    pub fn u64_or(&self, default: u64) -> u64 {
        self.get().map_or(default, |value| value.u64_or(default))
    }

    pub fn f64_value(&self) -> f64 {
        self.f64_or(0.0)
    }

    pub fn f64_or(&self, default: f64) -> f64 {
        self.get().map_or(default, |value| value.f64_or(default))
    }

    pub fn bool_value(&self) -> bool {
        self.bool_or(false)
    }

    pub fn bool_or(&self, default: bool) -> bool {
        self.get().map_or(default, |value| value.bool_or(default))
    }

    pub fn array_value(&self) -> &'a [Value] {
        self.get().map_or(&[][..], Value::array_value)
    }

    pub fn object_value(&self) -> Cow<'a, Map> {
        self.get()
            .map_or_else(|| Cow::Owned(Map::new()), Value::object_value)
    }

    pub fn try_string(&self) -> Result<String, JsonError> {
        self.clone().require()?.try_string()
    }

    pub fn try_i64(&self) -> Result<i64, JsonError> {
        self.clone().require()?.try_i64()
    }

    pub fn try_u64(&self) -> Result<u64, JsonError> {
        self.clone().require()?.try_u64()
    }

    pub fn try_f64(&self) -> Result<f64, JsonError> {
        self.clone().require()?.try_f64()
    }

    pub fn try_bool(&self) -> Result<bool, JsonError> {
        self.clone().require()?.try_bool()
    }

    pub fn try_array(&self) -> Result<&'a [Value], JsonError> {
        self.clone().require()?.try_array()
    }

    pub fn try_object(&self) -> Result<&'a Map, JsonError> {
        self.clone().require()?.try_object()
    }
}
