//! Field tag annotations.
//!
//! A field's tag must hold the annotation `<key>:"<digits>"` exactly once.
//! The rest of the tag, including annotations under other keys, is
//! ignored.

use protogo_foundation::{Error, ErrorKind, Result};
use regex::Regex;

/// Compiled annotation pattern for one tag key.
#[derive(Clone, Debug)]
pub struct TagPattern {
    key: String,
    regex: Regex,
}

impl TagPattern {
    /// Compiles the pattern `<key>:"(\d+)"`.
    ///
    /// `\d` matches any Unicode decimal digit; such digits pass the
    /// pattern but fail [`parse_number`].
    ///
    /// # Errors
    /// Returns `InvalidTagKey` if `key` is empty or holds a space, quote,
    /// colon or control character.
    pub fn new(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(invalid_key(key, "key is empty"));
        }
        if let Some(c) = key
            .chars()
            .find(|&c| c == ' ' || c == '"' || c == ':' || c.is_control())
        {
            return Err(invalid_key(key, &format!("key may not contain {c:?}")));
        }
        let regex = Regex::new(&format!(r#"{}:"(\d+)""#, regex::escape(key)))
            .map_err(|e| invalid_key(key, &e.to_string()))?;
        Ok(Self {
            key: key.to_string(),
            regex,
        })
    }

    /// Returns the tag key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the digit strings of every annotation in `tag`.
    #[must_use]
    pub fn values<'t>(&self, tag: &'t str) -> Vec<&'t str> {
        self.regex
            .captures_iter(tag)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}

/// Parses an annotation value as a field number.
///
/// Returns `None` for non-ASCII digits and values that overflow `u32`.
#[must_use]
pub fn parse_number(digits: &str) -> Option<u32> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn invalid_key(key: &str, message: &str) -> Error {
    Error::new(ErrorKind::InvalidTagKey {
        key: key.to_string(),
        message: message.to_string(),
    })
}
