//! End-to-end conversion of a LastPass export.
//!
//! Everything happens in memory: raw text is normalized, parsed, grouped and
//! serialized, and the document is written to disk once at the end. Nothing
//! is written if any stage fails.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ConvertConfig;
use crate::document::DocumentBuilder;
use crate::error::{ConvertError, Result};
use crate::grouping::group_by_category;
use crate::normalizer::{NormalizedExport, Normalizer};
use crate::output::to_xml;
use crate::reader::read_entries;

/// Appended to the input path to name the output document.
pub const OUTPUT_SUFFIX: &str = ".export.xml";

/// Returns the default output path for an input: the input path with
/// [`OUTPUT_SUFFIX`] appended.
///
/// ```rust
/// use std::path::Path;
/// use lastpass2keepass::pipeline::output_path_for;
///
/// assert_eq!(
///     output_path_for("export.csv"),
///     Path::new("export.csv.export.xml")
/// );
/// ```
pub fn output_path_for(input: impl AsRef<Path>) -> PathBuf {
    let mut path = OsString::from(input.as_ref().as_os_str());
    path.push(OUTPUT_SUFFIX);
    PathBuf::from(path)
}

/// Counts collected during one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Physical lines in the raw export
    pub raw_lines: usize,
    /// Logical records found by the normalizer
    pub records: usize,
    /// Data rows parsed, header excluded
    pub entries: usize,
    /// Category groups in the document
    pub groups: usize,
}

/// Output of [`Converter::convert_str`].
#[derive(Debug, Clone)]
pub struct Conversion {
    normalized: NormalizedExport,
    xml: String,
    stats: ConversionStats,
}

impl Conversion {
    /// The repaired intermediate CSV.
    pub fn normalized(&self) -> &NormalizedExport {
        &self.normalized
    }

    /// The KeePassX document, doctype included.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    pub fn stats(&self) -> ConversionStats {
        self.stats
    }

    /// Consumes the conversion and returns the document.
    pub fn into_xml(self) -> String {
        self.xml
    }
}

/// Runs the conversion pipeline with a given configuration.
///
/// # Example
///
/// ```rust
/// use lastpass2keepass::pipeline::Converter;
///
/// let raw = "url,username,password,extra,name,grouping,fav\n\
///            http://a.com,u1,p1,note,Site A,Work,0\n";
/// let conversion = Converter::new().convert_str(raw)?;
///
/// assert!(conversion.xml().starts_with("<!DOCTYPE KEEPASSX_DATABASE><database>"));
/// assert_eq!(conversion.stats().entries, 1);
/// # Ok::<(), lastpass2keepass::ConvertError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
    timestamp: Option<NaiveDateTime>,
}

impl Converter {
    /// Creates a converter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConvertConfig) -> Self {
        Self {
            config,
            timestamp: None,
        }
    }

    /// Builder-style method to pin `creation` / `lastmod` to a fixed time
    /// instead of the time of the run.
    #[must_use]
    pub fn with_timestamp(mut self, at: NaiveDateTime) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Converts raw export text to a KeePassX document.
    pub fn convert_str(&self, raw: &str) -> Result<Conversion> {
        let normalizer = Normalizer::new(&self.config.normalizer)?;
        let normalized = normalizer.normalize(raw);

        let entries = read_entries(normalized.as_str())?;
        let entry_count = entries.len();
        let groups = group_by_category(entries);

        let builder = match self.timestamp {
            Some(at) => DocumentBuilder::with_timestamp(self.config.document.clone(), at)?,
            None => DocumentBuilder::new(self.config.document.clone())?,
        };
        debug!(timestamp = builder.timestamp(), "building document");
        let database = builder.build(&groups);
        let xml = to_xml(&database, &self.config.document)?;

        let stats = ConversionStats {
            raw_lines: normalized.line_count(),
            records: normalized.record_count(),
            entries: entry_count,
            groups: groups.len(),
        };
        info!(
            entries = stats.entries,
            groups = stats.groups,
            "converted export"
        );

        Ok(Conversion {
            normalized,
            xml,
            stats,
        })
    }

    /// Converts the export at `input` and writes the document to `output`.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ConversionStats> {
        let conversion = self.convert_input(input)?;
        self.write_document(&conversion, output)?;
        Ok(conversion.stats())
    }

    /// Reads and converts the export at `input` without writing anything.
    pub fn convert_input(&self, input: impl AsRef<Path>) -> Result<Conversion> {
        let input = input.as_ref();
        let raw = fs::read_to_string(input).map_err(|e| ConvertError::file_read(input, e))?;
        debug!(path = %input.display(), bytes = raw.len(), "read raw export");
        self.convert_str(&raw)
    }

    /// Writes the document of a conversion to `path`, replacing any file
    /// already there.
    pub fn write_document(&self, conversion: &Conversion, path: impl AsRef<Path>) -> Result<()> {
        write_text(path.as_ref(), conversion.xml())
    }

    /// Writes the repaired intermediate CSV of a conversion to `path`.
    pub fn write_normalized(&self, conversion: &Conversion, path: impl AsRef<Path>) -> Result<()> {
        write_text(path.as_ref(), conversion.normalized().as_str())
    }
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| ConvertError::file_write(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
