//! Key/index path steps.

use std::fmt;

use json_dyn_pointer::Pointer;

/// One navigation step: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<&String> for PathStep {
    fn from(key: &String) -> Self {
        Self::Key(key.clone())
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Pointer text for a path, e.g. `[Key("a"), Index(0)]` → `/a/0`.
pub fn to_pointer(path: &[PathStep]) -> Pointer {
    let mut pointer = Pointer::root();
    for step in path {
        match step {
            PathStep::Key(key) => pointer.push(key.as_str()),
            PathStep::Index(index) => pointer.push_index(*index),
        }
    }
    pointer
}
