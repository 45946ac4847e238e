//! Dynamically-typed JSON values with failure-tolerant navigation.
//!
//! A [`Value`] is a JSON tree plus one extra case, `Invalid`, which carries the
//! [`JsonError`] of a failed lookup, conversion or parse. Navigation never
//! panics: a missing key or a wrong container type yields an `Invalid` cursor,
//! and every later step keeps the first error. Callers pick per call site
//! between three styles:
//!
//! - optional accessors (`as_i64`, `as_str`, ...) returning `Option`
//! - defaulted accessors (`i64_value`, `string_or`, ...) that never fail
//! - strict accessors (`try_i64`, `require`, ...) returning `Result`
//!
//! ```
//! use json_dyn::{SerializeOptions, Value};
//!
//! let doc = Value::parse(br#"{"user": {"name": "ada", "tags": ["x"]}}"#).unwrap();
//! assert_eq!(doc.by_key("user").by_key("name").as_str(), Some("ada"));
//! assert_eq!(doc.by_key("user").by_key("age").i64_value(), 0);
//! assert!(doc.by_key("user").by_key("tags").by_index(3).require().is_err());
//!
//! let merged = doc.merge(&Value::parse(br#"{"user": {"tags": ["y"]}}"#).unwrap());
//! let text = merged.to_json_string(&SerializeOptions::default()).unwrap();
//! assert_eq!(text, r#"{"user":{"name":"ada","tags":["x","y"]}}"#);
//! ```

mod codec;
mod coerce;
mod error;
mod merge;
mod navigate;
mod number;
mod path;
mod value;
mod walk;

pub use codec::{parse, serialize, ParseOptions, SerializeOptions};
pub use error::{ErrorKind, JsonError, SerializeError};
pub use json_dyn_pointer::{Pointer, PointerError};
pub use merge::{ArrayMerge, MergePolicy};
pub use navigate::Cursor;
pub use number::Number;
pub use path::{to_pointer, PathStep};
pub use value::{Entries, JsonType, Map, Value};
pub use walk::{try_walk, walk};
