//! KeePassX document model and the mapping from LastPass entries.
//!
//! A [`Database`] holds one [`Group`] per category, and each group holds one
//! [`KeepassEntry`] per LastPass [`Entry`]. The field mapping is fixed:
//!
//! | KeePassX | Source |
//! |----------|--------|
//! | `title` | `name` |
//! | `username` | `username` |
//! | `password` | `password` |
//! | `url` | `url` |
//! | `comment` | `extra`, line break tokens restored, one layer of `"` removed |
//! | `icon` | constant (`0`) |
//! | `creation` | time of the run |
//! | `lastaccess` | `grouping` |
//! | `lastmod` | time of the run |
//! | `expire` | constant (`Never`) |
//!
//! `lastaccess` carries the category value, not LastPass's `last_touch`.
//! KeePassX imports made with earlier versions of this tool depend on that,
//! so it is kept as is.

use std::fmt::Write;

use chrono::{Local, NaiveDateTime};

use crate::config::DocumentConfig;
use crate::entry::Entry;
use crate::error::{ConvertError, Result};
use crate::grouping::CategoryGroup;
use crate::normalizer::restore_line_breaks;

/// Root of the KeePassX document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    groups: Vec<Group>,
}

impl Database {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// One category in the KeePassX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub title: String,
    pub icon: String,
    pub entries: Vec<KeepassEntry>,
}

/// One entry in the KeePassX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepassEntry {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub comment: String,
    pub icon: String,
    pub creation: String,
    pub lastaccess: String,
    pub lastmod: String,
    pub expire: String,
}

impl KeepassEntry {
    /// Element names and values in document order.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        [
            ("title", self.title.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("url", self.url.as_str()),
            ("comment", self.comment.as_str()),
            ("icon", self.icon.as_str()),
            ("creation", self.creation.as_str()),
            ("lastaccess", self.lastaccess.as_str()),
            ("lastmod", self.lastmod.as_str()),
            ("expire", self.expire.as_str()),
        ]
    }
}

/// Maps grouped entries to a [`Database`].
///
/// The timestamp used for `creation` and `lastmod` is captured once when the
/// builder is created, so every entry of a run carries the same value.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use lastpass2keepass::config::DocumentConfig;
/// use lastpass2keepass::document::DocumentBuilder;
/// use lastpass2keepass::grouping::group_by_category;
/// use lastpass2keepass::Entry;
///
/// let at = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(12, 30, 0).unwrap();
/// let builder = DocumentBuilder::with_timestamp(DocumentConfig::default(), at)?;
///
/// let groups = group_by_category(vec![Entry::new("http://a.com", "u", "p", "", "A", "Work")]);
/// let database = builder.build(&groups);
///
/// let entry = &database.groups()[0].entries[0];
/// assert_eq!(entry.creation, "2024-06-15T12:30");
/// assert_eq!(entry.lastaccess, "Work");
/// # Ok::<(), lastpass2keepass::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    config: DocumentConfig,
    timestamp: String,
}

impl DocumentBuilder {
    /// Creates a builder stamped with the current local time.
    pub fn new(config: DocumentConfig) -> Result<Self> {
        let now = Local::now().naive_local();
        Self::with_timestamp(config, now)
    }

    /// Creates a builder stamped with a fixed time.
    pub fn with_timestamp(config: DocumentConfig, at: NaiveDateTime) -> Result<Self> {
        let timestamp = format_timestamp(at, &config.timestamp_format)?;
        Ok(Self { config, timestamp })
    }

    /// The formatted `creation` / `lastmod` value for this run.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Builds the document, keeping the order of `groups`.
    pub fn build(&self, groups: &[CategoryGroup]) -> Database {
        Database::new(groups.iter().map(|g| self.build_group(g)).collect())
    }

    fn build_group(&self, group: &CategoryGroup) -> Group {
        Group {
            title: group.category().to_string(),
            icon: self.config.icon.clone(),
            entries: group.entries().iter().map(|e| self.build_entry(e)).collect(),
        }
    }

    fn build_entry(&self, entry: &Entry) -> KeepassEntry {
        KeepassEntry {
            title: entry.name().to_string(),
            username: entry.username().to_string(),
            password: entry.password().to_string(),
            url: entry.url().to_string(),
            comment: format_comment(entry.extra(), &self.config.line_break_token),
            icon: self.config.icon.clone(),
            creation: self.timestamp.clone(),
            lastaccess: entry.grouping().to_string(),
            lastmod: self.timestamp.clone(),
            expire: self.config.expire.clone(),
        }
    }
}

/// Formats through `write!` so that a bad format string, or one asking for a
/// time zone a naive time doesn't have, is an error instead of a panic.
fn format_timestamp(at: NaiveDateTime, format: &str) -> Result<String> {
    let mut timestamp = String::new();
    write!(timestamp, "{}", at.format(format)).map_err(|_| {
        ConvertError::InvalidTimestampFormat {
            format: format.to_string(),
        }
    })?;
    Ok(timestamp)
}

/// Turns a LastPass `extra` field into a KeePassX comment.
///
/// Line break tokens become real line breaks, then at most one leading and
/// one trailing double quote are removed.
pub fn format_comment(extra: &str, token: &str) -> String {
    let restored = restore_line_breaks(extra, token);
    let unquoted = restored.strip_prefix('"').unwrap_or(&restored);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.to_string()
}
