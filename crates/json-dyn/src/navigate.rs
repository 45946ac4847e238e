//! Path navigation and assignment.
//!
//! Reads go through [`Cursor`], a borrowed view that either points into the
//! tree or carries the error of the first step that failed. Every later step
//! on a failed cursor returns that same error, so chains such as
//! `root.by_key("a").by_index(0).by_key("b")` never need intermediate checks.

use json_dyn_pointer::{array_index, Pointer};
use log::debug;

use crate::error::JsonError;
use crate::path::{to_pointer, PathStep};
use crate::value::{JsonType, Value};

const SUBSCRIPT_KEY: &str = "subscript by key";
const SUBSCRIPT_INDEX: &str = "subscript by index";
const ASSIGN_KEY: &str = "assign by key";
const ASSIGN_INDEX: &str = "assign by index";

/// Result of navigating a borrowed tree.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    target: Result<&'a Value, JsonError>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn found(value: &'a Value) -> Self {
        match value {
            Value::Invalid(error) => Self::failed(error.clone()),
            _ => Self { target: Ok(value) },
        }
    }

    pub(crate) fn failed(error: JsonError) -> Self {
        Self { target: Err(error) }
    }

    pub fn by_key(self, key: &str) -> Cursor<'a> {
        match self.target {
            Ok(value) => value.by_key(key),
            Err(error) => Self::failed(error),
        }
    }

    pub fn by_index(self, index: usize) -> Cursor<'a> {
        match self.target {
            Ok(value) => value.by_index(index),
            Err(error) => Self::failed(error),
        }
    }

    pub fn step(self, step: &PathStep) -> Cursor<'a> {
        match step {
            PathStep::Key(key) => self.by_key(key),
            PathStep::Index(index) => self.by_index(*index),
        }
    }

    pub fn path(self, path: &[PathStep]) -> Cursor<'a> {
        path.iter().fold(self, Cursor::step)
    }

    pub fn pointer(self, pointer: &str) -> Cursor<'a> {
        match self.target {
            Ok(value) => value.pointer(pointer),
            Err(error) => Self::failed(error),
        }
    }

    /// The found value, `None` after a failed step.
    pub fn get(&self) -> Option<&'a Value> {
        self.target.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&JsonError> {
        self.target.as_ref().err()
    }

    pub fn exists(&self) -> bool {
        self.target.is_ok()
    }

    pub fn json_type(&self) -> JsonType {
        match self.target {
            Ok(value) => value.json_type(),
            Err(_) => JsonType::Invalid,
        }
    }

    /// Fail-fast form: the found value or the first failure.
    pub fn require(self) -> Result<&'a Value, JsonError> {
        self.target
    }

    /// Owned result: a clone of the found subtree, or `Invalid`.
    pub fn to_value(&self) -> Value {
        match &self.target {
            Ok(value) => (*value).clone(),
            Err(error) => Value::Invalid(error.clone()),
        }
    }

    pub fn into_value(self) -> Value {
        match self.target {
            Ok(value) => value.clone(),
            Err(error) => Value::Invalid(error),
        }
    }
}

impl PartialEq<Value> for Cursor<'_> {
    fn eq(&self, other: &Value) -> bool {
        self.get().is_some_and(|value| value == other)
    }
}

impl Value {
    /// Root cursor for chained navigation.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::found(self)
    }

    pub fn by_key(&self, key: &str) -> Cursor<'_> {
        match self {
            Value::Object(map) => match map.get(key) {
                Some(child) => Cursor::found(child),
                None => Cursor::failed(JsonError::NotExist(key.to_string())),
            },
            Value::Invalid(error) => Cursor::failed(error.clone()),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => {
                Cursor::failed(JsonError::WrongType {
                    op: SUBSCRIPT_KEY,
                    found: self.json_type(),
                })
            }
        }
    }

    pub fn by_index(&self, index: usize) -> Cursor<'_> {
        match self {
            Value::Array(items) => match items.get(index) {
                Some(child) => Cursor::found(child),
                None => Cursor::failed(JsonError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                }),
            },
            Value::Invalid(error) => Cursor::failed(error.clone()),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Object(_) => {
                Cursor::failed(JsonError::WrongType {
                    op: SUBSCRIPT_INDEX,
                    found: self.json_type(),
                })
            }
        }
    }

    pub fn path(&self, path: &[PathStep]) -> Cursor<'_> {
        self.cursor().path(path)
    }

    /// Navigates RFC 6901 pointer text. A token is an index on arrays when it
    /// is a canonical array index and a key everywhere else.
    pub fn pointer(&self, pointer: &str) -> Cursor<'_> {
        match Pointer::parse(pointer) {
            Ok(pointer) => pointer.iter().fold(self.cursor(), |cursor, token| {
                match (cursor.get(), array_index(token)) {
                    (Some(Value::Array(_)), Some(index)) => cursor.by_index(index),
                    _ => cursor.by_key(token),
                }
            }),
            Err(err) => Cursor::failed(JsonError::ParseFailure(err.to_string())),
        }
    }

    /// Fail-fast check of a single value.
    pub fn require(&self) -> Result<&Value, JsonError> {
        match self {
            Value::Invalid(error) => Err(error.clone()),
            _ => Ok(self),
        }
    }

    // ── Mutable access ────────────────────────────────────────────────────

    pub fn by_key_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    pub fn by_index_mut(&mut self, index: usize) -> Option<&mut Value> {
        match self {
            Value::Array(items) => items.get_mut(index),
            _ => None,
        }
    }

    fn step_mut(&mut self, step: &PathStep) -> Result<&mut Value, JsonError> {
        let found = self.json_type();
        match (self, step) {
            (Value::Object(map), PathStep::Key(key)) => map
                .get_mut(key.as_str())
                .ok_or_else(|| JsonError::NotExist(key.clone())),
            (Value::Array(items), PathStep::Index(index)) => {
                let len = items.len();
                items
                    .get_mut(*index)
                    .ok_or(JsonError::IndexOutOfBounds { index: *index, len })
            }
            (Value::Invalid(error), _) => Err(error.clone()),
            (_, PathStep::Key(_)) => Err(JsonError::WrongType {
                op: SUBSCRIPT_KEY,
                found,
            }),
            (_, PathStep::Index(_)) => Err(JsonError::WrongType {
                op: SUBSCRIPT_INDEX,
                found,
            }),
        }
    }

    pub fn path_mut(&mut self, path: &[PathStep]) -> Result<&mut Value, JsonError> {
        let mut node = self;
        for step in path {
            node = node.step_mut(step)?;
        }
        Ok(node)
    }

    // ── Assignment ────────────────────────────────────────────────────────

    /// Upserts `key` on an object, returning the replaced value.
    pub fn set_key(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, JsonError> {
        match self {
            Value::Object(map) => Ok(map.insert(key.into(), value.into())),
            Value::Invalid(error) => Err(error.clone()),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => {
                Err(JsonError::WrongType {
                    op: ASSIGN_KEY,
                    found: self.json_type(),
                })
            }
        }
    }

    /// Replaces element `index` of an array, or appends when `index` equals
    /// the length.
    pub fn set_index(
        &mut self,
        index: usize,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, JsonError> {
        match self {
            Value::Array(items) => {
                let len = items.len();
                if index < len {
                    Ok(Some(std::mem::replace(&mut items[index], value.into())))
                } else if index == len {
                    items.push(value.into());
                    Ok(None)
                } else {
                    Err(JsonError::IndexOutOfBounds { index, len })
                }
            }
            Value::Invalid(error) => Err(error.clone()),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Object(_) => {
                Err(JsonError::WrongType {
                    op: ASSIGN_INDEX,
                    found: self.json_type(),
                })
            }
        }
    }

    pub fn set(
        &mut self,
        step: impl Into<PathStep>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, JsonError> {
        match step.into() {
            PathStep::Key(key) => self.set_key(key, value),
            PathStep::Index(index) => self.set_index(index, value),
        }
    }

    /// Assigns at the end of `path`; every parent must already exist. An empty
    /// path replaces the whole (non-invalid) value.
    pub fn set_path(
        &mut self,
        path: &[PathStep],
        value: impl Into<Value>,
    ) -> Result<Option<Value>, JsonError> {
        let Some((last, parents)) = path.split_last() else {
            self.require()?;
            return Ok(Some(std::mem::replace(self, value.into())));
        };
        self.path_mut(parents)?.set(last.clone(), value)
    }

    /// Lenient [`set_path`](Self::set_path): leaves the tree untouched and
    /// returns `false` when the assignment cannot be made.
    pub fn assign_path(&mut self, path: &[PathStep], value: impl Into<Value>) -> bool {
        match self.set_path(path, value) {
            Ok(_) => true,
            Err(error) => {
                debug!("skipped assignment at {:?}: {error}", to_pointer(path).to_string());
                false
            }
        }
    }

    /// Removes `key` from an object, keeping the order of the other keys.
    pub fn remove_key(&mut self, key: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map.shift_remove(key),
            _ => None,
        }
    }

    pub fn remove_index(&mut self, index: usize) -> Option<Value> {
        match self {
            Value::Array(items) if index < items.len() => Some(items.remove(index)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;

    fn doc() -> Value {
        Value::from(json!({"a": {"b": 1}, "list": [10, {"c": "x"}]}))
    }

    #[test]
    fn nested_lookup() {
        let root = doc();
        assert_eq!(root.by_key("a").by_key("b").to_value(), Value::from(1));
        assert_eq!(root.by_key("list").by_index(1).by_key("c").as_str(), Some("x"));
    }

    #[test]
    fn first_failure_is_kept() {
        let root = doc();
        let cursor = root.by_key("x").by_key("b").by_index(4);
        assert_eq!(cursor.error(), Some(&JsonError::NotExist("x".into())));

        let cursor = root.by_key("a").by_index(0).by_key("zzz");
        assert_eq!(cursor.error().map(JsonError::kind), Some(ErrorKind::WrongType));

        let cursor = root.by_key("list").by_index(7).by_key("c");
        assert_eq!(
            cursor.error(),
            Some(&JsonError::IndexOutOfBounds { index: 7, len: 2 })
        );
    }

    #[test]
    fn invalid_root_propagates_its_own_error() {
        let invalid = Value::Invalid(JsonError::ParseFailure("eof".into()));
        let cursor = invalid.by_key("a").by_index(0);
        assert_eq!(
            cursor.require(),
            Err(JsonError::ParseFailure("eof".into()))
        );
        assert!(invalid.require().is_err());
    }

    #[test]
    fn path_and_pointer() {
        let root = doc();
        let path = [PathStep::from("list"), PathStep::from(1), PathStep::from("c")];
        assert_eq!(root.path(&path).as_str(), Some("x"));
        assert_eq!(root.pointer("/list/1/c").as_str(), Some("x"));
        assert_eq!(root.pointer("").to_value(), root);
        assert_eq!(
            root.pointer("/list/01").error().map(JsonError::kind),
            Some(ErrorKind::WrongType)
        );
        assert_eq!(
            root.pointer("list").error().map(JsonError::kind),
            Some(ErrorKind::ParseFailure)
        );
    }

    #[test]
    fn pointer_tokens_on_objects_are_keys() {
        let root = Value::from(json!({"0": "zero"}));
        assert_eq!(root.pointer("/0").as_str(), Some("zero"));
    }

    #[test]
    fn set_key_upserts() {
        let mut root = doc();
        assert_eq!(root.set_key("n", 5), Ok(None));
        assert_eq!(root.set_key("n", 6), Ok(Some(Value::from(5))));
        assert_eq!(root.by_key("n").i64_value(), 6);
    }

    #[test]
    fn set_index_replaces_or_appends() {
        let mut list = Value::from(json!([1, 2]));
        assert_eq!(list.set_index(0, "a"), Ok(Some(Value::from(1))));
        assert_eq!(list.set_index(2, "c"), Ok(None));
        assert_eq!(
            list.set_index(5, "z"),
            Err(JsonError::IndexOutOfBounds { index: 5, len: 3 })
        );
        assert_eq!(list, Value::from(json!(["a", 2, "c"])));
    }

    #[test]
    fn assignment_never_converts_type() {
        let mut scalar = Value::from("text");
        assert!(scalar.set_key("a", 1).is_err());
        assert!(scalar.set_index(0, 1).is_err());
        assert_eq!(scalar, "text");

        let mut invalid = Value::Invalid(JsonError::NotExist("q".into()));
        assert_eq!(
            invalid.set_key("a", 1),
            Err(JsonError::NotExist("q".into()))
        );
        assert!(invalid.is_invalid());
    }

    #[test]
    fn set_path_and_assign_path() {
        let mut root = doc();
        let path = [PathStep::from("list"), PathStep::from(1), PathStep::from("d")];
        assert_eq!(root.set_path(&path, true), Ok(None));
        assert_eq!(root.pointer("/list/1/d").as_bool(), Some(true));

        let missing = [PathStep::from("nope"), PathStep::from("d")];
        assert!(!root.assign_path(&missing, 1));
        assert!(root.by_key("nope").error().is_some());

        let mut replaced = Value::from(1);
        assert_eq!(replaced.set_path(&[], "new"), Ok(Some(Value::from(1))));
        assert_eq!(replaced, "new");
    }

    #[test]
    fn mutable_lookup_and_removal() {
        let mut root = doc();
        if let Ok(b) = root.path_mut(&[PathStep::from("a"), PathStep::from("b")]) {
            *b = Value::from(2);
        }
        assert_eq!(root.pointer("/a/b").i64_value(), 2);
        assert!(root.by_key_mut("a").is_some());
        assert!(root.by_index_mut(0).is_none());

        let mut obj = Value::from(json!({"x": 1, "y": 2, "z": 3}));
        assert_eq!(obj.remove_key("y"), Some(Value::from(2)));
        assert_eq!(obj.to_string(), r#"{"x":1,"z":3}"#);
        let mut list = Value::from(json!([1, 2]));
        assert_eq!(list.remove_index(0), Some(Value::from(1)));
        assert_eq!(list.remove_index(5), None);
    }
}
