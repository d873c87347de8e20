//! Run options for building a deck, loadable from a JSON config file.

use crate::paths::{DEFAULT_EXTENSIONS, DEFAULT_SUFFIX};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default slide height in inches (16:9 widescreen).
pub const DEFAULT_SLIDE_HEIGHT_IN: f64 = 7.5;

/// Default slide width in inches (16:9 widescreen).
pub const DEFAULT_SLIDE_WIDTH_IN: f64 = 13.333;

/// Options controlling how images become slides.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "slide_width_inch": 10.0, "extensions": [".png"], "sort": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckOptions {
    /// Slide height for newly created decks.
    pub slide_height_inch: f64,

    /// Slide width for newly created decks.
    pub slide_width_inch: f64,

    /// Image extensions to pick up, compared case-insensitively.
    pub extensions: Vec<String>,

    /// Suffix for the output file when an existing deck is extended.
    pub suffix: String,

    /// Sort images by file name instead of using directory-listing order.
    pub sort: bool,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            slide_height_inch: DEFAULT_SLIDE_HEIGHT_IN,
            slide_width_inch: DEFAULT_SLIDE_WIDTH_IN,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            suffix: DEFAULT_SUFFIX.to_string(),
            sort: false,
        }
    }
}

impl DeckOptions {
    /// Create options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slide size for new decks.
    pub fn with_slide_size(mut self, height_inch: f64, width_inch: f64) -> Self {
        self.slide_height_inch = height_inch;
        self.slide_width_inch = width_inch;
        self
    }

    /// Replace the extension allow-list.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the output suffix used in append mode.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sort discovered images by file name.
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Parse options from a JSON string and validate them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Invalid options JSON: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        log::debug!("Loaded options from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Check that sizes are positive and finite and the suffix is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("slide_height_inch", self.slide_height_inch),
            ("slide_width_inch", self.slide_width_inch),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::ConfigError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if self.suffix.is_empty() {
            return Err(Error::ConfigError(
                "suffix must not be empty, the original deck would be overwritten".to_string(),
            ));
        }

        if self.suffix.contains(&['/', '\\'][..]) {
            return Err(Error::ConfigError(format!(
                "suffix must not contain path separators: '{}'",
                self.suffix
            )));
        }

        Ok(())
    }
}
