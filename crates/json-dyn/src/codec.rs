//! Text boundary: parse JSON bytes into a [`Value`] and serialize it back.

use std::str::FromStr;

use log::debug;
use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{JsonError, SerializeError};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Accept a scalar at the top level. When false, only arrays and objects
    /// are accepted as documents.
    pub allow_fragments: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_fragments: true,
        }
    }
}

impl ParseOptions {
    pub fn with_allow_fragments(mut self, allow_fragments: bool) -> Self {
        self.allow_fragments = allow_fragments;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    /// Two-space indented output.
    pub pretty: bool,
    /// Emit object keys in lexicographic order at every depth instead of
    /// insertion order.
    pub sorted_keys: bool,
}

impl SerializeOptions {
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_sorted_keys(mut self, sorted_keys: bool) -> Self {
        self.sorted_keys = sorted_keys;
        self
    }
}

/// Parses UTF-8 JSON text.
pub fn parse(bytes: &[u8], options: &ParseOptions) -> Result<Value, JsonError> {
    let json: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|err| JsonError::ParseFailure(err.to_string()))?;
    if !options.allow_fragments && !(json.is_array() || json.is_object()) {
        return Err(JsonError::ParseFailure(
            "top-level value must be an array or object".to_string(),
        ));
    }
    let value = Value::from(json);
    // Only out-of-range numbers leave sentinels behind.
    if let Some(error) = value.first_invalid() {
        return Err(JsonError::ParseFailure(error.to_string()));
    }
    Ok(value)
}

/// Encodes a value as JSON bytes. Fails without output if any node is
/// `Invalid`.
pub fn serialize(value: &Value, options: &SerializeOptions) -> Result<Vec<u8>, SerializeError> {
    if let Some(error) = value.first_invalid() {
        return Err(SerializeError::InvalidValue(error.clone()));
    }
    let ordered = Ordered {
        value,
        sorted_keys: options.sorted_keys,
    };
    let bytes = if options.pretty {
        serde_json::to_vec_pretty(&ordered)?
    } else {
        serde_json::to_vec(&ordered)?
    };
    Ok(bytes)
}

impl Value {
    /// Strict parse with default options.
    pub fn parse(bytes: &[u8]) -> Result<Value, JsonError> {
        parse(bytes, &ParseOptions::default())
    }

    /// Lenient parse: failures come back as `Invalid(ParseFailure)`.
    pub fn from_slice(bytes: &[u8]) -> Value {
        Self::from_slice_with(bytes, &ParseOptions::default())
    }

    pub fn from_slice_with(bytes: &[u8], options: &ParseOptions) -> Value {
        match parse(bytes, options) {
            Ok(value) => value,
            Err(error) => {
                debug!("parse failed: {error}");
                Value::Invalid(error)
            }
        }
    }

    pub fn to_json_string(&self, options: &SerializeOptions) -> Result<String, SerializeError> {
        let bytes = serialize(self, options)?;
        // serde_json only emits UTF-8.
        String::from_utf8(bytes)
            .map_err(|err| SerializeError::Encode(<serde_json::Error as serde::ser::Error>::custom(err.to_string())))
    }
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Value::parse(s.as_bytes())
    }
}

struct Ordered<'a> {
    value: &'a Value,
    sorted_keys: bool,
}

impl<'a> Ordered<'a> {
    fn child(&self, value: &'a Value) -> Self {
        Self {
            value,
            sorted_keys: self.sorted_keys,
        }
    }
}

impl Serialize for Ordered<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                if self.sorted_keys {
                    entries.sort_by(|a, b| a.0.cmp(b.0));
                }
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &self.child(value))?;
                }
                out.end()
            }
            Value::Invalid(error) => Err(S::Error::custom(format!(
                "cannot serialize invalid value: {error}"
            ))),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Ordered {
            value: self,
            sorted_keys: false,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::from(serde_json::Value::deserialize(deserializer)?);
        match value.first_invalid() {
            Some(error) => Err(D::Error::custom(error)),
            None => Ok(value),
        }
    }
}
