//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the argument structure of the
//! `lastpass2keepass` binary.
//!
//! The input path is optional at the clap level. A missing input is reported
//! by the binary as [`ConvertError::MissingArgument`](crate::ConvertError::MissingArgument)
//! with the same framed output as every other error.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::Level;

use crate::pipeline::output_path_for;

/// Convert a LastPass CSV export into a KeePassX XML import file.
#[derive(Parser, Debug, Clone)]
#[command(name = "lastpass2keepass")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    lastpass2keepass lastpass.csv
    lastpass2keepass lastpass.csv -o keepass.xml
    lastpass2keepass lastpass.csv --normalized repaired.csv -v")]
pub struct Args {
    /// Path to the LastPass CSV export
    pub input: Option<PathBuf>,

    /// Path to output file [default: <INPUT>.export.xml]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the repaired intermediate CSV to this path
    #[arg(long, value_name = "PATH")]
    pub normalized: Option<PathBuf>,

    /// Print debug logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Output path for `input`: `--output` if given, otherwise the input
    /// path with `.export.xml` appended.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| output_path_for(input))
    }

    /// Maximum level for the stderr log.
    pub fn log_level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::WARN }
    }
}
