//! One parsed LastPass record.
//!
//! The LastPass CSV export has nine positional columns:
//!
//! | Index | Column | Accessor |
//! |-------|--------|----------|
//! | 0 | `url` | [`Entry::url`] |
//! | 1 | `username` | [`Entry::username`] |
//! | 2 | `password` | [`Entry::password`] |
//! | 3 | `extra` | [`Entry::extra`] |
//! | 4 | `name` | [`Entry::name`] |
//! | 5 | `grouping` | [`Entry::grouping`] |
//! | 6 | `last_touch` | [`Entry::last_touch`] |
//! | 7 | `launch_count` | [`Entry::launch_count`] |
//! | 8 | `fav` | [`Entry::fav`] |
//!
//! An [`Entry`] keeps the row exactly as parsed. Only the first six columns
//! are required; older exports stop after `grouping`.
//!
//! # Examples
//!
//! ```
//! use lastpass2keepass::Entry;
//!
//! let entry = Entry::new("http://a.com", "alice", "hunter2", "", "Site A", "Work")
//!     .with_launch_count(3)
//!     .with_fav(true);
//!
//! assert_eq!(entry.grouping(), "Work");
//! assert_eq!(entry.launch_count(), Some("3"));
//! assert_eq!(entry.fav(), Some("1"));
//! ```

use serde::Serialize;

/// Column names of the LastPass export, in order.
pub const FIELD_NAMES: [&str; 9] = [
    "url",
    "username",
    "password",
    "extra",
    "name",
    "grouping",
    "last_touch",
    "launch_count",
    "fav",
];

/// Index of the `grouping` (category) column.
pub const CATEGORY_INDEX: usize = 5;

/// A row must reach the category column to be usable.
pub const MIN_FIELDS: usize = CATEGORY_INDEX + 1;

const LAST_TOUCH_INDEX: usize = 6;
const LAUNCH_COUNT_INDEX: usize = 7;
const FAV_INDEX: usize = 8;

/// A single LastPass record as an ordered list of fields.
///
/// Ordering compares the raw field lists lexicographically, which is what
/// the category ordering in [`crate::grouping`] is built on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Entry {
    fields: Vec<String>,
}

impl Entry {
    /// Creates an entry from the six required columns.
    ///
    /// `last_touch`, `launch_count` and `fav` are present but empty.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        extra: impl Into<String>,
        name: impl Into<String>,
        grouping: impl Into<String>,
    ) -> Self {
        Self {
            fields: vec![
                url.into(),
                username.into(),
                password.into(),
                extra.into(),
                name.into(),
                grouping.into(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Wraps a parsed row, or returns `None` if it stops before `grouping`.
    pub fn from_fields(fields: Vec<String>) -> Option<Self> {
        if fields.len() < MIN_FIELDS {
            return None;
        }
        Some(Self { fields })
    }

    /// Builder-style method to set `last_touch`.
    #[must_use]
    pub fn with_last_touch(self, last_touch: impl Into<String>) -> Self {
        self.with_field(LAST_TOUCH_INDEX, last_touch.into())
    }

    /// Builder-style method to set `launch_count`.
    #[must_use]
    pub fn with_launch_count(self, count: u64) -> Self {
        self.with_field(LAUNCH_COUNT_INDEX, count.to_string())
    }

    /// Builder-style method to set `fav` (`1` or `0`).
    #[must_use]
    pub fn with_fav(self, fav: bool) -> Self {
        self.with_field(FAV_INDEX, if fav { "1" } else { "0" }.to_string())
    }

    fn with_field(mut self, index: usize, value: String) -> Self {
        if self.fields.len() <= index {
            self.fields.resize(index + 1, String::new());
        }
        self.fields[index] = value;
        self
    }

    /// All fields as parsed.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at `index`, if the row has it.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Site address; `http://sn` for secure notes.
    pub fn url(&self) -> &str {
        &self.fields[0]
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.fields[1]
    }

    /// Stored password, as exported.
    pub fn password(&self) -> &str {
        &self.fields[2]
    }

    /// Free-form note. Embedded line breaks are still tokens here.
    pub fn extra(&self) -> &str {
        &self.fields[3]
    }

    /// Display name of the site or note.
    pub fn name(&self) -> &str {
        &self.fields[4]
    }

    /// Category path, e.g. `Email` or `Finance\Banks`. Not split.
    pub fn grouping(&self) -> &str {
        &self.fields[CATEGORY_INDEX]
    }

    /// Last use as a Unix timestamp, if the export has the column.
    pub fn last_touch(&self) -> Option<&str> {
        self.field(LAST_TOUCH_INDEX)
    }

    /// Number of times the site was launched, if present.
    pub fn launch_count(&self) -> Option<&str> {
        self.field(LAUNCH_COUNT_INDEX)
    }

    /// Favorite flag (`1` or `0`), if present.
    pub fn fav(&self) -> Option<&str> {
        self.field(FAV_INDEX)
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`: an entry has at least [`MIN_FIELDS`] fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
