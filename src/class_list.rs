//! Ordered class token set with the same rules as the DOM's `DOMTokenList`.
//!
//! The in-memory document keeps one `ClassList` per element so that toggling
//! in tests produces exactly the `class` attribute a browser would: tokens
//! split on ASCII whitespace, duplicates dropped, additions appended, and
//! empty or whitespace-bearing tokens rejected.

#[cfg(test)]
#[path = "class_list_test.rs"]
mod class_list_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Check that `token` is usable as a single class.
///
/// # Errors
///
/// Returns [`Error::InvalidClassName`] for an empty token or one containing
/// ASCII whitespace; the browser throws `SyntaxError` / `InvalidCharacterError`.
pub fn validate_token(token: &str) -> Result<(), Error> {
    if token.is_empty() {
        return Err(Error::InvalidClassName { name: token.to_owned(), reason: "empty" });
    }
    if token.contains(|c: char| c.is_ascii_whitespace()) {
        return Err(Error::InvalidClassName { name: token.to_owned(), reason: "contains whitespace" });
    }
    Ok(())
}

/// Class tokens of a single element, in attribute order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Empty class list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `class` attribute value.
    #[must_use]
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::new();
        for token in attr.split_ascii_whitespace() {
            list.push_unique(token);
        }
        list
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Append `token` if absent. Returns `true` if it was added.
    ///
    /// # Errors
    ///
    /// Returns the [`validate_token`] errors.
    pub fn add(&mut self, token: &str) -> Result<bool, Error> {
        validate_token(token)?;
        Ok(self.push_unique(token))
    }

    /// Remove `token` if present. Returns `true` if it was removed.
    ///
    /// # Errors
    ///
    /// Returns the [`validate_token`] errors.
    pub fn remove(&mut self, token: &str) -> Result<bool, Error> {
        validate_token(token)?;
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        Ok(self.tokens.len() != before)
    }

    /// Remove `token` if present, add it otherwise. Returns whether it is present afterwards.
    ///
    /// # Errors
    ///
    /// Returns the [`validate_token`] errors.
    pub fn toggle(&mut self, token: &str) -> Result<bool, Error> {
        if self.remove(token)? {
            return Ok(false);
        }
        self.tokens.push(token.to_owned());
        Ok(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    // Callers guarantee `token` is a valid class.
    fn push_unique(&mut self, token: &str) -> bool {
        if self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_owned());
        true
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

impl From<String> for ClassList {
    fn from(attr: String) -> Self {
        Self::parse(&attr)
    }
}

impl From<ClassList> for String {
    fn from(list: ClassList) -> Self {
        list.to_string()
    }
}
