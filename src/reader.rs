//! Parses normalized CSV text into [`Entry`] rows.
//!
//! The first row is the export's header and is always dropped, whatever it
//! contains. An export without a header line normalizes to text that starts
//! with a line break; that empty first line is the dropped header, so the
//! first record is kept. Other blank lines produce no row.

use tracing::debug;

use crate::entry::{Entry, MIN_FIELDS};
use crate::error::{ConvertError, Result};

/// Parses the whole normalized stream and returns its data rows.
///
/// # Errors
///
/// - [`ConvertError::Parse`] if a quoted field is never closed
/// - [`ConvertError::MissingHeader`] if the stream has no rows at all
/// - [`ConvertError::NoEntries`] if only the header row is present
/// - [`ConvertError::MalformedRow`] if a data row has fewer than six fields
///
/// # Example
///
/// ```rust
/// use lastpass2keepass::reader::read_entries;
///
/// let csv = "url,username,password,extra,name,grouping,fav\n\
///            http://a.com,u1,p1,note,Site A,Work,0";
/// let entries = read_entries(csv)?;
///
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].grouping(), "Work");
/// # Ok::<(), lastpass2keepass::ConvertError>(())
/// ```
pub fn read_entries(normalized: &str) -> Result<Vec<Entry>> {
    if let Some(line) = find_unterminated_quote(normalized) {
        return Err(ConvertError::unterminated_quote(line));
    }

    let (body, blank_header) = match strip_leading_break(normalized) {
        Some(rest) => (rest, true),
        None => (normalized, false),
    };
    let line_offset = u64::from(blank_header);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(body.as_bytes());
    let mut records = reader.records();

    if blank_header {
        debug!("dropped empty header line");
    } else {
        let header = records.next().ok_or(ConvertError::MissingHeader)??;
        debug!(fields = header.len(), "dropped header row");
    }

    let mut entries = Vec::new();
    for result in records {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line()) + line_offset;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        let count = fields.len();

        let entry = Entry::from_fields(fields)
            .ok_or_else(|| ConvertError::malformed_row(line, count, MIN_FIELDS))?;
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(ConvertError::NoEntries);
    }

    debug!(entries = entries.len(), "parsed entries");
    Ok(entries)
}

/// Text after a line break at the very start, if there is one.
fn strip_leading_break(text: &str) -> Option<&str> {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
}

/// Returns the line of a quoted field that never closes, if any.
///
/// Follows the same quoting rules as the CSV reader: a quote only opens a
/// field at the start of that field, and `""` inside a quoted field is an
/// escaped quote.
fn find_unterminated_quote(text: &str) -> Option<u64> {
    let mut line = 1u64;
    let mut open_since: Option<u64> = None;
    let mut field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if open_since.is_some() {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                }
                '"' => open_since = None,
                '\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if field_start => {
                open_since = Some(line);
                field_start = false;
            }
            ',' | '\r' => field_start = true,
            '\n' => {
                line += 1;
                field_start = true;
            }
            _ => field_start = false,
        }
    }

    open_since
}
