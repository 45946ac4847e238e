//! Recursive value visitor.

use std::ops::ControlFlow;

use crate::error::JsonError;
use crate::value::Value;

/// Walk every node in a value tree, calling `callback` on each.
///
/// The callback is called on the root value first, then on every nested value
/// (arrays and object values are descended into).
pub fn walk<F>(value: &Value, callback: &mut F)
where
    F: FnMut(&Value),
{
    let _ = try_walk(value, &mut |node| {
        callback(node);
        ControlFlow::<()>::Continue(())
    });
}

/// [`walk`] that stops at the first `Break`.
pub fn try_walk<'a, B, F>(value: &'a Value, callback: &mut F) -> ControlFlow<B>
where
    F: FnMut(&'a Value) -> ControlFlow<B>,
{
    callback(value)?;
    match value {
        Value::Array(items) => {
            for item in items {
                try_walk(item, callback)?;
            }
        }
        Value::Object(map) => {
            for (_key, item) in map {
                try_walk(item, callback)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Invalid(_) => {}
    }
    ControlFlow::Continue(())
}

impl Value {
    /// Error of the first `Invalid` node in walk order.
    pub fn first_invalid(&self) -> Option<&JsonError> {
        match try_walk(self, &mut |node| match node {
            Value::Invalid(error) => ControlFlow::Break(error),
            _ => ControlFlow::Continue(()),
        }) {
            ControlFlow::Break(error) => Some(error),
            ControlFlow::Continue(()) => None,
        }
    }
}
