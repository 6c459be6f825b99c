//! Binder configuration: which class marks toggleable elements and which class
//! represents the expanded state.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::class_list::validate_token;
use crate::consts::{DEFAULT_EXPANDED_CLASS, DEFAULT_MARKER_CLASS};
use crate::error::Error;

/// Class names used by the binder.
///
/// Both fields are optional when deserializing and fall back to
/// [`DEFAULT_MARKER_CLASS`] / [`DEFAULT_EXPANDED_CLASS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinderConfig {
    /// Elements carrying this class get a click handler.
    pub marker_class: String,
    /// Class toggled on click.
    pub expanded_class: String,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            marker_class: DEFAULT_MARKER_CLASS.to_owned(),
            expanded_class: DEFAULT_EXPANDED_CLASS.to_owned(),
        }
    }
}

impl BinderConfig {
    /// Parse a JSON object such as `{"expanded_class": "big"}` and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed JSON and the [`BinderConfig::validate`]
    /// errors for unusable class names.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both class names are usable as DOM class tokens and distinct.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClassName`] for an empty name or one containing
    /// ASCII whitespace, and [`Error::SameClass`] when both names are equal.
    pub fn validate(&self) -> Result<(), Error> {
        validate_token(&self.marker_class)?;
        validate_token(&self.expanded_class)?;
        if self.marker_class == self.expanded_class {
            return Err(Error::SameClass(self.marker_class.clone()));
        }
        Ok(())
    }
}
