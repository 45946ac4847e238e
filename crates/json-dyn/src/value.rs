//! The [`Value`] enum and its structural behavior: type inspection, equality,
//! ordering, literal construction and text rendering.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::JsonError;
use crate::number::Number;
use crate::path::PathStep;

/// Object storage: insertion-ordered, unique keys, last write wins.
pub type Map = IndexMap<String, Value>;

/// Any JSON value, or the [`Invalid`](Value::Invalid) sentinel left behind by
/// a failed operation.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
    Invalid(JsonError),
}

/// Case of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Invalid,
}

impl JsonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Bool => "bool",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
            JsonType::Invalid => "invalid",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn json_type(&self) -> JsonType {
        match self {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
            Value::Invalid(_) => JsonType::Invalid,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid(_))
    }

    /// True for every JSON value, including `null`.
    pub fn exists(&self) -> bool {
        !self.is_invalid()
    }

    /// The error carried by an `Invalid` value.
    pub fn error(&self) -> Option<&JsonError> {
        match self {
            Value::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// Number of children of an array or object; 0 for everything else.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Invalid(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Children of an array (index steps) or object (key steps).
    pub fn entries(&self) -> Entries<'_> {
        match self {
            Value::Array(items) => Entries::Array(items.iter().enumerate()),
            Value::Object(map) => Entries::Object(map.iter()),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Invalid(_) => Entries::Empty,
        }
    }

    /// Builds a value from any serializable data.
    ///
    /// Data outside the JSON data model (maps with non-string keys, failing
    /// `Serialize` impls) yields `Invalid(UnsupportedType)`.
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Value {
        match serde_json::to_value(data) {
            Ok(json) => Value::from(json),
            Err(err) => Value::Invalid(JsonError::UnsupportedType(err.to_string())),
        }
    }

    /// Converts to a `serde_json` tree, failing on the first `Invalid` node.
    pub fn to_serde_json(&self) -> Result<serde_json::Value, JsonError> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => match n.to_serde_json() {
                Some(number) => serde_json::Value::Number(number),
                None => return Err(JsonError::UnsupportedType(format!("number {n}"))),
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(Value::to_serde_json)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), value.to_serde_json()?);
                }
                serde_json::Value::Object(out)
            }
            Value::Invalid(error) => return Err(error.clone()),
        })
    }
}

/// Iterator returned by [`Value::entries`].
pub enum Entries<'a> {
    Array(std::iter::Enumerate<std::slice::Iter<'a, Value>>),
    Object(indexmap::map::Iter<'a, String, Value>),
    Empty,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (PathStep, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Array(iter) => iter.next().map(|(i, v)| (PathStep::Index(i), v)),
            Entries::Object(iter) => iter.next().map(|(k, v)| (PathStep::Key(k.clone()), v)),
            Entries::Empty => None,
        }
    }
}

// ── Equality / ordering ───────────────────────────────────────────────────

/// Structural equality; objects compare order-independently and `Invalid`
/// equals nothing, itself included.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Invalid(_), _) | (_, Value::Invalid(_)) => false,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Invalid(_), _) | (_, Value::Invalid(_)) => None,
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::Array(a), Value::Array(b)) => a.partial_cmp(b),
            (Value::Object(a), Value::Object(b)) => (a == b).then_some(Ordering::Equal),
            _ => None,
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Number(n) if *n == Number::from(*other))
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Number(n) if n.as_f64() == *other)
    }
}

// ── Literal construction ─────────────────────────────────────────────────

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(number) => Value::Number(number),
            None => Value::Invalid(JsonError::UnsupportedType(format!(
                "non-finite number {value}"
            ))),
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::from(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::String(value.into_owned())
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<JsonError> for Value {
    fn from(error: JsonError) -> Self {
        Value::Invalid(error)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::Array(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        map.into_iter().collect()
    }
}

impl<T: Into<Value>, S: BuildHasher> From<HashMap<String, T, S>> for Value {
    fn from(map: HashMap<String, T, S>) -> Self {
        map.into_iter().collect()
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                let number = Number::from(&n);
                if number.as_f64().is_finite() {
                    Value::Number(number)
                } else {
                    Value::Invalid(JsonError::UnsupportedType(format!(
                        "number out of range: {n}"
                    )))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => map.into_iter().collect(),
        }
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ── Text rendering ───────────────────────────────────────────────────────

/// Compact JSON text. `Invalid` nodes render as `<invalid: message>`, so the
/// output is only guaranteed to be JSON for trees without sentinels; use
/// [`serialize`](crate::serialize) for checked output.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_str("}")
            }
            Value::Invalid(error) => write!(f, "<invalid: {error}>"),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_of_every_case() {
        let cases = [
            (Value::Null, JsonType::Null, "null"),
            (Value::from(true), JsonType::Bool, "bool"),
            (Value::from(1.5), JsonType::Number, "number"),
            (Value::from("s"), JsonType::String, "string"),
            (Value::from(vec![1, 2]), JsonType::Array, "array"),
            (Value::from(json!({})), JsonType::Object, "object"),
            (
                Value::Invalid(JsonError::NotExist("k".into())),
                JsonType::Invalid,
                "invalid",
            ),
        ];
        for (value, ty, name) in cases {
            assert_eq!(value.json_type(), ty);
            assert_eq!(ty.as_str(), name);
        }
    }

    #[test]
    fn invalid_is_never_equal() {
        let invalid = Value::Invalid(JsonError::NotExist("k".into()));
        assert_ne!(invalid, invalid.clone());
        assert_ne!(invalid, Value::Null);
        assert!(invalid.partial_cmp(&invalid).is_none());
    }

    #[test]
    fn objects_compare_without_order() {
        let a: Value = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Value = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
        assert_eq!(a.to_string(), r#"{"x":1,"y":2}"#);
        assert_eq!(b.to_string(), r#"{"y":2,"x":1}"#);
    }

    #[test]
    fn ordering_of_scalars() {
        assert!(Value::from(1) < Value::from(2.5));
        assert!(Value::from("a") < Value::from("b"));
        assert!(Value::from(1).partial_cmp(&Value::from("1")).is_none());
        assert!(Value::from(vec![1, 2]) < Value::from(vec![1, 3]));
        assert!(Value::from(false) < Value::from(true));
        assert_eq!(Value::Null.partial_cmp(&Value::Null), Some(Ordering::Equal));
        let a = Value::from(json!({"k": 1}));
        let b = Value::from(json!({"k": 2}));
        assert!(a.partial_cmp(&b).is_none());
        assert!(Value::Null.partial_cmp(&Value::from(false)).is_none());
    }

    #[test]
    fn overflowing_json_numbers_convert_to_invalid() {
        let json: serde_json::Value = serde_json::from_str("[1e400, 2]").unwrap();
        let value = Value::from(json);
        assert_eq!(
            value.by_index(0).error().map(JsonError::kind),
            Some(crate::ErrorKind::UnsupportedType)
        );
        assert_eq!(value.by_index(1).i64_value(), 2);
    }

    #[test]
    fn non_finite_floats_are_unsupported() {
        let v = Value::from(f64::NAN);
        assert_eq!(
            v.error().map(JsonError::kind),
            Some(crate::ErrorKind::UnsupportedType)
        );
        assert!(Value::from(f32::INFINITY).is_invalid());
    }

    #[test]
    fn from_serialize_rejects_non_string_keys() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        let v = Value::from_serialize(&map);
        assert_eq!(
            v.error().map(JsonError::kind),
            Some(crate::ErrorKind::UnsupportedType)
        );
        let ok = Value::from_serialize(&("a", 1, [true]));
        assert_eq!(ok, Value::from(json!(["a", 1, [true]])));
    }

    #[test]
    fn literal_conversions() {
        assert_eq!(Value::from(()), Value::Null);
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), "x");
        assert_eq!(Value::from(&[1u8, 2][..]), Value::from(json!([1, 2])));
        let mut tree = BTreeMap::new();
        tree.insert("k".to_string(), vec![true]);
        assert_eq!(Value::from(tree), Value::from(json!({"k": [true]})));
        assert_eq!(Value::from(u64::MAX), Value::from(json!(18446744073709551615u64)));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let v: Value = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(v.len(), 2);
        assert_eq!(v.to_string(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn entries_and_len() {
        let v = Value::from(json!({"a": 1, "b": [2, 3]}));
        let steps: Vec<PathStep> = v.entries().map(|(step, _)| step).collect();
        assert_eq!(steps, vec![PathStep::from("a"), PathStep::from("b")]);
        let arr = Value::from(json!([true, false]));
        let first = arr.entries().next().unwrap();
        assert_eq!(first.0, PathStep::Index(0));
        assert_eq!(*first.1, true);
        assert_eq!(Value::from("abc").len(), 0);
        assert!(Value::from("abc").is_empty());
        assert_eq!(Value::from("abc").entries().count(), 0);
    }

    #[test]
    fn display_escapes_and_marks_invalid() {
        let v = Value::Array(vec![
            Value::from("a\"b\n"),
            Value::Invalid(JsonError::NotExist("k".into())),
        ]);
        assert_eq!(
            v.to_string(),
            r#"["a\"b\n",<invalid: key "k" does not exist>]"#
        );
    }

    #[test]
    fn to_serde_json_rejects_invalid() {
        let ok = Value::from(json!({"a": [1.25, null]}));
        assert_eq!(ok.to_serde_json().unwrap(), json!({"a": [1.25, null]}));
        let mut bad = ok.clone();
        bad.set_key("b", Value::Invalid(JsonError::NotExist("z".into())))
            .unwrap();
        assert_eq!(
            bad.to_serde_json(),
            Err(JsonError::NotExist("z".into()))
        );
    }
}
