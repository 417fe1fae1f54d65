//! Configuration types for the two conversion stages.
//!
//! These are plain builder-style structs with no CLI framework dependencies.
//! The defaults reproduce the LastPass export and KeePassX import formats;
//! changing them is mostly useful for tests and for exports produced by
//! tools that mimic LastPass.
//!
//! # Example
//!
//! ```rust
//! use lastpass2keepass::config::ConvertConfig;
//!
//! let config = ConvertConfig::new()
//!     .with_line_break_token("<br>")
//!     .with_expire("2030-01-01T00:00");
//!
//! assert_eq!(config.normalizer.line_break_token, "<br>");
//! assert_eq!(config.document.line_break_token, "<br>");
//! ```

use serde::{Deserialize, Serialize};

/// Placeholder for line breaks embedded inside a field.
pub const DEFAULT_LINE_BREAK_TOKEN: &str = "|\t|";

/// Lines matching this pattern open a new logical record.
pub const DEFAULT_RECORD_START: &str = "^http";

/// Literal written before the XML root element.
pub const DEFAULT_DOCTYPE: &str = "<!DOCTYPE KEEPASSX_DATABASE>";

/// `chrono` format for the `creation` and `lastmod` fields.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Configuration for repairing the raw LastPass export.
///
/// # Example
///
/// ```rust
/// use lastpass2keepass::config::NormalizerConfig;
///
/// let config = NormalizerConfig::new().with_record_start("^(http|ftp)");
/// assert_eq!(config.record_start, "^(http|ftp)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Regex a physical line must match to open a new record (default: `^http`)
    pub record_start: String,

    /// Token substituted for embedded line breaks (default: `|\t|`)
    pub line_break_token: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            record_start: DEFAULT_RECORD_START.to_string(),
            line_break_token: DEFAULT_LINE_BREAK_TOKEN.to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the record start pattern.
    #[must_use]
    pub fn with_record_start(mut self, pattern: impl Into<String>) -> Self {
        self.record_start = pattern.into();
        self
    }

    /// Sets the embedded line break token.
    #[must_use]
    pub fn with_line_break_token(mut self, token: impl Into<String>) -> Self {
        self.line_break_token = token.into();
        self
    }
}

/// Configuration for the KeePassX document.
///
/// LastPass has no icons or expiry dates, so those are constants for every
/// group and entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Token restored to a real line break in the `comment` field
    pub line_break_token: String,

    /// Literal prepended to the serialized XML
    pub doctype: String,

    /// `chrono` format string for `creation` / `lastmod`
    pub timestamp_format: String,

    /// Icon id for groups and entries (default: `0`)
    pub icon: String,

    /// Value of every entry's `expire` field (default: `Never`)
    pub expire: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            line_break_token: DEFAULT_LINE_BREAK_TOKEN.to_string(),
            doctype: DEFAULT_DOCTYPE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            icon: "0".to_string(),
            expire: "Never".to_string(),
        }
    }
}

impl DocumentConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the embedded line break token.
    #[must_use]
    pub fn with_line_break_token(mut self, token: impl Into<String>) -> Self {
        self.line_break_token = token.into();
        self
    }

    /// Sets the doctype literal.
    #[must_use]
    pub fn with_doctype(mut self, doctype: impl Into<String>) -> Self {
        self.doctype = doctype.into();
        self
    }

    /// Sets the timestamp format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Sets the icon id.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the expiry value.
    #[must_use]
    pub fn with_expire(mut self, expire: impl Into<String>) -> Self {
        self.expire = expire.into();
        self
    }
}

/// Configuration for the whole conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Raw export repair settings
    pub normalizer: NormalizerConfig,

    /// Output document settings
    pub document: DocumentConfig,
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the line break token on both stages.
    ///
    /// The token written by the normalizer must be the one the document
    /// builder restores, so this is the only setter for it here.
    #[must_use]
    pub fn with_line_break_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.normalizer.line_break_token.clone_from(&token);
        self.document.line_break_token = token;
        self
    }

    /// Sets the record start pattern.
    #[must_use]
    pub fn with_record_start(mut self, pattern: impl Into<String>) -> Self {
        self.normalizer.record_start = pattern.into();
        self
    }

    /// Sets the expiry value.
    #[must_use]
    pub fn with_expire(mut self, expire: impl Into<String>) -> Self {
        self.document.expire = expire.into();
        self
    }

    /// Sets the timestamp format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.document.timestamp_format = format.into();
        self
    }
}
