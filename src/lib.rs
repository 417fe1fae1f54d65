//! # lastpass2keepass
//!
//! A Rust library for converting LastPass CSV exports into KeePassX XML
//! import files.
//!
//! ## Overview
//!
//! LastPass exports are almost CSV: secure notes and multi-line `extra`
//! fields are written verbatim, so one record can span several physical
//! lines. Conversion runs in two stages:
//!
//! 1. **Normalize**: repair the raw export into one-record-per-line CSV,
//!    replacing embedded line breaks with a token ([`normalizer`]).
//! 2. **Build**: parse the rows ([`reader`]), group them by category
//!    ([`grouping`]), map them to the KeePassX model ([`document`]) and
//!    serialize the result ([`output`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lastpass2keepass::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let input = "lastpass.csv";
//!     let stats = Converter::new().convert_file(input, output_path_for(input))?;
//!     println!("{} entries in {} groups", stats.entries, stats.groups);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`pipeline`] - [`Converter`](pipeline::Converter), the end-to-end conversion
//! - [`config`] - [`ConvertConfig`](config::ConvertConfig) and per-stage configs
//! - [`normalizer`] - line classification and export repair
//! - [`reader`] - CSV parsing into [`Entry`] rows
//! - [`grouping`] - [`CategoryGroup`](grouping::CategoryGroup) and group ordering
//! - [`document`] - KeePassX model and [`DocumentBuilder`](document::DocumentBuilder)
//! - [`output`] - [`to_xml`](output::to_xml), [`write_xml`](output::write_xml)
//! - `cli` - CLI arguments (feature `cli`)
//! - [`error`] - [`ConvertError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod grouping;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod reader;

// Re-export the main types at the crate root for convenience
pub use entry::Entry;
pub use error::{ConvertError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use lastpass2keepass::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Entry;

    // Error types
    pub use crate::error::{ConvertError, Result};

    // Configuration
    pub use crate::config::{ConvertConfig, DocumentConfig, NormalizerConfig};

    // Stages
    pub use crate::document::{Database, DocumentBuilder};
    pub use crate::grouping::{CategoryGroup, group_by_category};
    pub use crate::normalizer::{NormalizedExport, Normalizer, restore_line_breaks};
    pub use crate::reader::read_entries;

    // Output
    pub use crate::output::{to_xml, write_xml};

    // Pipeline
    pub use crate::pipeline::{Conversion, ConversionStats, Converter, output_path_for};
}
