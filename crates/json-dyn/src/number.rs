//! Numeric representation.
//!
//! A [`Number`] is readable as `i64`, `u64` and `f64` at the same time.
//! Integers are stored exactly (`u64` only above `i64::MAX`); everything else
//! is an `f64` that keeps the decimal text it was parsed from, so fractional
//! values and integers beyond 64 bits serialize back unchanged.
//!
//! Reading an integer through [`Number::as_f64`] is lossy above 2^53, and
//! numbers whose text exceeds `f64` precision compare by their `f64` value.
//! Both are accepted limitations.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Exclusive upper bound of `i64` as `f64` (2^63).
const I64_END: f64 = 9_223_372_036_854_775_808.0;
/// Exclusive upper bound of `u64` as `f64` (2^64).
const U64_END: f64 = 18_446_744_073_709_551_616.0;

#[derive(Debug, Clone, Copy)]
enum N {
    Int(i64),
    UInt(u64),
    Float(f64),
}

#[derive(Debug, Clone)]
pub struct Number {
    n: N,
    text: Option<Box<str>>,
}

impl Number {
    /// Builds a float; `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self {
            n: N::Float(value),
            text: None,
        })
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.n, N::Int(_) | N::UInt(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    pub fn is_zero(&self) -> bool {
        match self.n {
            N::Int(i) => i == 0,
            N::UInt(u) => u == 0,
            N::Float(f) => f == 0.0,
        }
    }

    /// Integer value, truncating a fraction toward zero; `None` outside the
    /// `i64` range.
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::Int(i) => Some(i),
            N::UInt(_) => None,
            N::Float(f) => (f.is_finite() && f >= -I64_END && f < I64_END).then(|| f as i64),
        }
    }

    /// Like [`as_i64`](Self::as_i64) for the `u64` range.
    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::Int(i) => u64::try_from(i).ok(),
            N::UInt(u) => Some(u),
            N::Float(f) => (f.is_finite() && f > -1.0 && f < U64_END).then(|| f as u64),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.n {
            N::Int(i) => i as f64,
            N::UInt(u) => u as f64,
            N::Float(f) => f,
        }
    }

    /// Integer part clamped to the `i64` range.
    pub fn to_i64_saturating(&self) -> i64 {
        match self.n {
            N::Int(i) => i,
            N::UInt(_) => i64::MAX,
            N::Float(f) => f as i64,
        }
    }

    /// Integer part clamped to the `u64` range; `None` for negative values.
    pub fn to_u64_saturating(&self) -> Option<u64> {
        match self.n {
            N::Int(i) => u64::try_from(i).ok(),
            N::UInt(u) => Some(u),
            N::Float(f) => (f > -1.0).then(|| f as u64),
        }
    }

    /// Decimal text kept from parsing, if any. The parser normalizes
    /// exponents (`1E2` is kept as `1e+2`); mantissa digits are unchanged.
    pub fn source_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub(crate) fn to_serde_json(&self) -> Option<serde_json::Number> {
        match (self.n, self.text.as_deref()) {
            (N::Int(i), _) => Some(i.into()),
            (N::UInt(u), _) => Some(u.into()),
            (N::Float(_), Some(text)) => serde_json::Number::from_str(text).ok(),
            (N::Float(f), None) => serde_json::Number::from_f64(f),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(number: &serde_json::Number) -> Self {
        if let Some(i) = number.as_i64() {
            return Self::from(i);
        }
        if let Some(u) = number.as_u64() {
            return Self::from(u);
        }
        let text = number.to_string();
        let float = text
            .parse::<f64>()
            .ok()
            .or_else(|| number.as_f64())
            .unwrap_or_default();
        Self {
            n: N::Float(float),
            text: Some(text.into_boxed_str()),
        }
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self { n: N::Int(value as i64), text: None }
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    let value = value as u64;
                    let n = match i64::try_from(value) {
                        Ok(i) => N::Int(i),
                        Err(_) => N::UInt(value),
                    };
                    Self { n, text: None }
                }
            }
        )*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.n, other.n) {
            (N::Float(_), _) | (_, N::Float(_)) => self.as_f64().partial_cmp(&other.as_f64()),
            (a, b) => Some(wide(a).cmp(&wide(b))),
        }
    }
}

fn wide(n: N) -> i128 {
    match n {
        N::Int(i) => i128::from(i),
        N::UInt(u) => i128::from(u),
        N::Float(f) => f as i128,
    }
}

/// Canonical decimal text: the kept source text, otherwise the shortest text
/// that reads back to the same value (`1.0`, `1e300`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.n, self.text.as_deref()) {
            (N::Int(i), _) => write!(f, "{i}"),
            (N::UInt(u), _) => write!(f, "{u}"),
            (N::Float(_), Some(text)) => f.write_str(text),
            (N::Float(v), None) => match serde_json::Number::from_f64(v) {
                Some(number) => write!(f, "{number}"),
                None => write!(f, "{v}"),
            },
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self.n, self.text.as_deref()) {
            (N::Int(i), _) => serializer.serialize_i64(i),
            (N::UInt(u), _) => serializer.serialize_u64(u),
            (N::Float(v), Some(text)) => match serde_json::Number::from_str(text) {
                Ok(number) => number.serialize(serializer),
                Err(_) => serializer.serialize_f64(v),
            },
            (N::Float(v), None) => serializer.serialize_f64(v),
        }
    }
}
