//! Output writers.
//!
//! - [`write_xml`] / [`to_xml`] - KeePassX XML import document
//!
//! # Example
//!
//! ```rust
//! use lastpass2keepass::config::DocumentConfig;
//! use lastpass2keepass::document::Database;
//! use lastpass2keepass::output::to_xml;
//!
//! let xml = to_xml(&Database::default(), &DocumentConfig::default())?;
//! assert_eq!(xml, "<!DOCTYPE KEEPASSX_DATABASE><database/>");
//! # Ok::<(), lastpass2keepass::ConvertError>(())
//! ```

mod xml_writer;

pub use xml_writer::{to_xml, write_xml};
