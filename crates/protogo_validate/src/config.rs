//! Configuration for a validation run.

use protogo_foundation::Result;

use crate::tag::TagPattern;

/// Tag key recognized when none is configured.
pub const DEFAULT_TAG_KEY: &str = "protogo";

/// Configuration for a validation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Struct tag key holding the field number, as in `protogo:"1"`.
    pub tag_key: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the tag key.
    #[must_use]
    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Compiles the annotation pattern for the configured key.
    ///
    /// # Errors
    /// Returns `InvalidTagKey` if the key cannot appear in a struct tag.
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.tag_key)
    }
}
