//! JSON Pointer (RFC 6901) text form of key/index chains.
//!
//! A [`Pointer`] holds unescaped reference tokens. Whether a token addresses an
//! object key or an array element is decided by whoever walks the document;
//! [`array_index`] implements the RFC rule for that decision.
//!
//! Examples:
//! - `"" -> []`
//! - `"/" -> [""]`
//! - `"/a~1b/~0k/0" -> ["a/b", "~k", "0"]`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("json pointer must be empty or start with `/`: {0:?}")]
    NotAbsolute(String),
    #[error("invalid escape in json pointer token {0:?}")]
    InvalidEscape(String),
}

/// Unescapes one reference token (`~1` → `/`, `~0` → `~`).
///
/// A `~` followed by anything other than `0` or `1` is rejected.
pub fn unescape_token(token: &str) -> Result<String, PointerError> {
    if !token.contains('~') {
        return Ok(token.to_string());
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(PointerError::InvalidEscape(token.to_string())),
        }
    }
    Ok(out)
}

/// Escapes one reference token for inclusion in pointer text.
pub fn escape_token(token: &str) -> String {
    if !token.contains('/') && !token.contains('~') {
        return token.to_string();
    }
    token.replace('~', "~0").replace('/', "~1")
}

/// Interprets a token as an array index.
///
/// Only `0` or a digit string without a leading zero qualifies; `"01"`, `"-1"`
/// and `"+1"` are keys, never indices.
pub fn array_index(token: &str) -> Option<usize> {
    let bytes = token.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.iter().all(u8::is_ascii_digit) => token.parse().ok(),
        _ => None,
    }
}

/// Parsed JSON Pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// The empty pointer, addressing the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses absolute pointer text.
    pub fn parse(text: &str) -> Result<Self, PointerError> {
        if text.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = text.strip_prefix('/') else {
            return Err(PointerError::NotAbsolute(text.to_string()));
        };
        let tokens = rest
            .split('/')
            .map(unescape_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn push_index(&mut self, index: usize) {
        self.tokens.push(index.to_string());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.tokens.iter()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str("/")?;
            f.write_str(&escape_token(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Pointer {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
