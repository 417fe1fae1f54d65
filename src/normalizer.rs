//! Repairs a raw LastPass export into one-record-per-line CSV.
//!
//! LastPass writes secure notes and multi-line `extra` fields verbatim, so a
//! single logical record can span several physical lines. Standard CSV readers
//! would either split those records or choke on them. The normalizer walks the
//! export line by line and classifies every line:
//!
//! - **Record start** (`^http` by default): a new logical record begins.
//! - **Record end** (ends with `,<digit>`): the final line of a multi-line
//!   record; the digit is the trailing `fav` field.
//! - **Fragment**: anything else, i.e. a piece of a field with an embedded
//!   line break. The break is replaced by a token so it survives CSV parsing.
//!
//! The output text has the same shape earlier versions of this tool wrote to
//! their intermediate file: every record is preceded by `\n`, and fragments
//! before the first record (the header row) are kept verbatim at the top.

use regex::Regex;
use tracing::debug;

use crate::config::NormalizerConfig;
use crate::error::{ConvertError, Result};

/// A record's last line ends with a comma and a single digit.
const RECORD_END_PATTERN: &str = ",[0-9]$";

/// Classification of one physical line of the raw export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a new logical record
    RecordStart,
    /// Closes a multi-line record
    RecordEnd,
    /// Interior piece of a field containing a line break
    Fragment,
}

/// Repairs raw exports according to a [`NormalizerConfig`].
///
/// # Example
///
/// ```rust
/// use lastpass2keepass::config::NormalizerConfig;
/// use lastpass2keepass::normalizer::Normalizer;
///
/// let normalizer = Normalizer::new(&NormalizerConfig::default())?;
/// let raw = "http://a.com,u,p,\n\"first\nsecond\",Site,Work,0,0,0\n";
/// let normalized = normalizer.normalize(raw);
///
/// assert_eq!(
///     normalized.as_str(),
///     "\nhttp://a.com,u,p,\"first|\t|second\",Site,Work,0,0,0"
/// );
/// # Ok::<(), lastpass2keepass::ConvertError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Normalizer {
    record_start: Regex,
    record_end: Regex,
    line_break_token: String,
}

impl Normalizer {
    /// Compiles the line patterns for the given configuration.
    pub fn new(config: &NormalizerConfig) -> Result<Self> {
        Ok(Self {
            record_start: compile(&config.record_start)?,
            record_end: compile(RECORD_END_PATTERN)?,
            line_break_token: config.line_break_token.clone(),
        })
    }

    /// Returns the token substituted for embedded line breaks.
    pub fn line_break_token(&self) -> &str {
        &self.line_break_token
    }

    /// Classifies a physical line with its terminator already removed.
    ///
    /// Record start is tested before record end, so a complete single-line
    /// record is always a [`LineKind::RecordStart`].
    pub fn classify(&self, line: &str) -> LineKind {
        if self.record_start.is_match(line) {
            LineKind::RecordStart
        } else if self.record_end.is_match(line) {
            LineKind::RecordEnd
        } else {
            LineKind::Fragment
        }
    }

    /// Repairs the whole export.
    ///
    /// Empty input yields empty output; it is not an error at this stage.
    pub fn normalize(&self, raw: &str) -> NormalizedExport {
        let mut records = RecordAccumulator::new(&self.line_break_token);
        let mut lines = 0usize;

        for physical in raw.split_inclusive('\n') {
            lines += 1;
            let (line, has_break) = split_terminator(physical);

            match self.classify(line) {
                LineKind::RecordStart => records.start(line.trim()),
                LineKind::RecordEnd => records.push(line.trim()),
                LineKind::Fragment => {
                    records.push(line);
                    if has_break {
                        records.push_break();
                    }
                }
            }
        }

        let normalized = records.finish(lines);
        debug!(
            lines = normalized.line_count(),
            records = normalized.record_count(),
            "normalized raw export"
        );
        normalized
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConvertError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Splits a physical line into its content and whether it ended in a break.
/// Both `\n` and `\r\n` count as a break.
fn split_terminator(physical: &str) -> (&str, bool) {
    match physical.strip_suffix('\n') {
        Some(line) => (line.strip_suffix('\r').unwrap_or(line), true),
        None => (physical, false),
    }
}

/// Replaces every line break token in `field` with a real line break.
///
/// This is the inverse of the fragment rule: a note split over several
/// physical lines comes back with its original breaks.
pub fn restore_line_breaks(field: &str, token: &str) -> String {
    if token.is_empty() {
        return field.to_string();
    }
    field.replace(token, "\n")
}

/// Builds the normalized text one logical record at a time.
///
/// Text pushed before the first record start goes straight to the output.
struct RecordAccumulator<'a> {
    token: &'a str,
    output: String,
    current: Option<String>,
    records: usize,
}

impl<'a> RecordAccumulator<'a> {
    fn new(token: &'a str) -> Self {
        Self {
            token,
            output: String::new(),
            current: None,
            records: 0,
        }
    }

    fn start(&mut self, line: &str) {
        self.flush();
        self.current = Some(line.to_string());
    }

    fn push(&mut self, text: &str) {
        match self.current.as_mut() {
            Some(record) => record.push_str(text),
            None => self.output.push_str(text),
        }
    }

    fn push_break(&mut self) {
        let token = self.token;
        self.push(token);
    }

    fn flush(&mut self) {
        if let Some(record) = self.current.take() {
            self.output.push('\n');
            self.output.push_str(&record);
            self.records += 1;
        }
    }

    fn finish(mut self, lines: usize) -> NormalizedExport {
        self.flush();
        NormalizedExport {
            text: self.output,
            records: self.records,
            lines,
        }
    }
}

/// Result of normalizing a raw export: well-formed CSV text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedExport {
    text: String,
    records: usize,
    lines: usize,
}

impl NormalizedExport {
    /// The normalized CSV text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the export and returns the CSV text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of logical records that began with a record start line.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Number of physical lines in the raw input.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Returns `true` if the raw input produced no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for NormalizedExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
