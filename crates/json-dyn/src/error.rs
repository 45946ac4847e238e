//! Error types shared by the lenient and strict APIs.
//!
//! A [`JsonError`] is what an [`Invalid`](crate::Value::Invalid) value carries
//! and what every strict operation returns.

use thiserror::Error;

use crate::value::JsonType;

/// Fieldless classification of a [`JsonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotExist,
    IndexOutOfBounds,
    WrongType,
    ParseFailure,
    UnsupportedType,
    TypeMismatch,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotExist => "not_exist",
            ErrorKind::IndexOutOfBounds => "index_out_of_bounds",
            ErrorKind::WrongType => "wrong_type",
            ErrorKind::ParseFailure => "parse_failure",
            ErrorKind::UnsupportedType => "unsupported_type",
            ErrorKind::TypeMismatch => "type_mismatch",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonError {
    #[error("key {0:?} does not exist")]
    NotExist(String),
    #[error("index {index} is out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("cannot {op} on {found}")]
    WrongType { op: &'static str, found: JsonType },
    #[error("parse failure: {0}")]
    ParseFailure(String),
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: JsonType,
    },
}

impl JsonError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JsonError::NotExist(_) => ErrorKind::NotExist,
            JsonError::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            JsonError::WrongType { .. } => ErrorKind::WrongType,
            JsonError::ParseFailure(_) => ErrorKind::ParseFailure,
            JsonError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            JsonError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }
}

/// Failure of the serialize boundary.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("cannot serialize invalid value: {0}")]
    InvalidValue(JsonError),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
