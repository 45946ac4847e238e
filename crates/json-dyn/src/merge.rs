//! Recursive structural merge.
//!
//! Objects merge key by key, arrays follow [`ArrayMerge`], and any other
//! pairing (including an `Invalid` on either side) lets the overlay win.

use log::trace;
use serde::Deserialize;

use crate::value::Value;

/// How two arrays at the same position combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMerge {
    /// Overlay elements are appended after the base elements.
    #[default]
    Concatenate,
    /// Overlay element `i` replaces base element `i`; extra overlay elements
    /// are appended.
    ReplaceByIndex,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MergePolicy {
    pub arrays: ArrayMerge,
}

impl MergePolicy {
    pub fn with_arrays(mut self, arrays: ArrayMerge) -> Self {
        self.arrays = arrays;
        self
    }
}

impl Value {
    pub fn merge(&self, overlay: &Value) -> Value {
        self.merge_with_policy(overlay, MergePolicy::default())
    }

    pub fn merge_with_policy(&self, overlay: &Value, policy: MergePolicy) -> Value {
        let mut merged = self.clone();
        merged.merge_from_with_policy(overlay.clone(), policy);
        merged
    }

    /// In-place [`merge`](Self::merge).
    pub fn merge_from(&mut self, overlay: Value) {
        self.merge_from_with_policy(overlay, MergePolicy::default());
    }

    pub fn merge_from_with_policy(&mut self, overlay: Value, policy: MergePolicy) {
        merge_into(self, overlay, policy);
    }
}

fn merge_into(base: &mut Value, overlay: Value, policy: MergePolicy) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_into(existing, value, policy),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base), Value::Array(overlay)) => match policy.arrays {
            ArrayMerge::Concatenate => base.extend(overlay),
            ArrayMerge::ReplaceByIndex => {
                for (index, value) in overlay.into_iter().enumerate() {
                    match base.get_mut(index) {
                        Some(slot) => *slot = value,
                        None => base.push(value),
                    }
                }
            }
        },
        (base, overlay) => {
            if base.json_type() != overlay.json_type() {
                trace!(
                    "merge: {} replaced by {}",
                    base.json_type(),
                    overlay.json_type()
                );
            }
            *base = overlay;
        }
    }
}
