//! Groups entries by their `grouping` column.
//!
//! Groups are keyed by the raw category string. LastPass category paths such
//! as `Finance\Banks` are not split into nested groups.
//!
//! # Group order
//!
//! Groups are ordered by comparing their entry lists as sequences, not by
//! category name. Two groups are ordered by their first differing entry, and
//! entries compare field by field starting with the URL. This matches the
//! order KeePassX users got from earlier versions of this converter.

use std::collections::HashMap;

use tracing::debug;

use crate::entry::Entry;

/// Entries sharing one category value, in the order they appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    category: String,
    entries: Vec<Entry>,
}

impl CategoryGroup {
    /// Creates an empty group.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            entries: Vec::new(),
        }
    }

    /// The raw category string shared by all entries.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the group and returns its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// Partitions entries by category and orders the groups.
///
/// Every entry lands in exactly one group. Within a group, entries keep their
/// input order.
///
/// # Example
///
/// ```rust
/// use lastpass2keepass::Entry;
/// use lastpass2keepass::grouping::group_by_category;
///
/// let groups = group_by_category(vec![
///     Entry::new("http://b.com", "u", "p", "", "B", "Alpha"),
///     Entry::new("http://a.com", "u", "p", "", "A", "Zeta"),
/// ]);
///
/// // "Zeta" comes first: its entries sort before "Alpha"'s.
/// assert_eq!(groups[0].category(), "Zeta");
/// assert_eq!(groups[1].category(), "Alpha");
/// ```
pub fn group_by_category(entries: Vec<Entry>) -> Vec<CategoryGroup> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for entry in entries {
        let position = match positions.get(entry.grouping()) {
            Some(&position) => position,
            None => {
                let position = groups.len();
                positions.insert(entry.grouping().to_string(), position);
                groups.push(CategoryGroup::new(entry.grouping()));
                position
            }
        };
        groups[position].entries.push(entry);
    }

    groups.sort_by(|a, b| a.entries.cmp(&b.entries));

    debug!(groups = groups.len(), "grouped entries by category");
    groups
}
