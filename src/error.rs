//! Unified error types for lastpass2keepass.
//!
//! Every failure in the conversion is fatal for the run: there is no retry and
//! no partial output. [`ConvertError`] carries enough context (file path, OS
//! reason, offending line) for the binary to print a single human-readable
//! message and exit.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Shown when a file is missing or not accessible, alongside the OS reason.
pub const FILE_ERROR_HINT: &str = "You either need more permissions or the file does not exist.";

/// The hint only fits missing files and permission problems, not e.g. an
/// input that is not valid UTF-8.
fn file_hint(source: &io::Error) -> String {
    match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => format!(" {FILE_ERROR_HINT}"),
        _ => String::new(),
    }
}

/// A specialized [`Result`] type for conversion operations.
///
/// # Example
///
/// ```rust
/// use lastpass2keepass::error::Result;
/// use lastpass2keepass::Entry;
///
/// fn my_function() -> Result<Vec<Entry>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConvertError>;

/// The error type for all conversion operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// No input path was given on the command line.
    #[error("USAGE: lastpass2keepass <lastpass-csv>")]
    MissingArgument,

    /// The input export could not be read.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - The file is not valid UTF-8
    #[error("Cannot read file: '{}' Error: '{source}'.{}", path.display(), file_hint(source))]
    FileRead {
        /// The path that was being read
        path: PathBuf,
        /// The underlying OS error
        #[source]
        source: io::Error,
    },

    /// The output document could not be written.
    #[error("Cannot write to disk... exiting. File: '{}' Error: '{source}'.{}", path.display(), file_hint(source))]
    FileWrite {
        /// The path that was being written
        path: PathBuf,
        /// The underlying OS error
        #[source]
        source: io::Error,
    },

    /// The normalized stream has no rows at all, so there is no header to drop.
    #[error("The export is empty: expected a header row naming the fields")]
    MissingHeader,

    /// The export has a header row but no entries after it.
    #[error("The export contains a header row but no entries")]
    NoEntries,

    /// The normalized stream is not well-formed delimited text.
    #[error("Failed to parse the export as CSV: {0}")]
    Parse(#[source] ParseErrorKind),

    /// A data row does not reach the category field.
    #[error("Malformed entry on line {line}: expected at least {expected} fields, found {fields}")]
    MalformedRow {
        /// Line in the normalized stream where the row starts
        line: u64,
        /// Number of fields the row actually has
        fields: usize,
        /// Minimum number of fields required
        expected: usize,
    },

    /// The configured record-start pattern does not compile.
    #[error("Invalid record start pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as configured
        pattern: String,
        /// The regex compilation error
        #[source]
        source: regex::Error,
    },

    /// The configured timestamp format is not a valid `chrono` format string.
    #[error("Invalid timestamp format '{format}'")]
    InvalidTimestampFormat {
        /// The format as configured
        format: String,
    },

    /// The XML writer failed.
    #[error("Failed to serialize the KeePassX document: {0}")]
    Serialize(String),
}

/// Kinds of parse errors that can occur while reading the normalized stream.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// A quoted field was opened but never closed.
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote {
        /// Line where the opening quote appears
        line: u64,
    },
    /// Error reported by the CSV reader
    #[error("{0}")]
    Csv(#[from] csv::Error),
}

impl From<csv::Error> for ConvertError {
    fn from(err: csv::Error) -> Self {
        ConvertError::Parse(ParseErrorKind::Csv(err))
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ConvertError {
    /// Creates a read error for the given input path.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a write error for the given output path.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error for a quote that is never closed.
    pub fn unterminated_quote(line: u64) -> Self {
        ConvertError::Parse(ParseErrorKind::UnterminatedQuote { line })
    }

    /// Creates a malformed row error.
    pub fn malformed_row(line: u64, fields: usize, expected: usize) -> Self {
        ConvertError::MalformedRow {
            line,
            fields,
            expected,
        }
    }

    /// Creates a serialization error from any writer error.
    pub fn serialize(err: impl std::fmt::Display) -> Self {
        ConvertError::Serialize(err.to_string())
    }

    /// Returns `true` if this is a read or write error.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ConvertError::FileRead { .. } | ConvertError::FileWrite { .. }
        )
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ConvertError::Parse(_))
    }

    /// Returns `true` if the export had nothing to convert.
    pub fn is_empty_export(&self) -> bool {
        matches!(self, ConvertError::MissingHeader | ConvertError::NoEntries)
    }
}

// ============================================================================
// Tests
// ============================================================================
