//! # lastpass2keepass CLI
//!
//! Command-line interface for the lastpass2keepass library.

use std::process;

use clap::Parser as ClapParser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lastpass2keepass::ConvertError;
use lastpass2keepass::cli::Args;
use lastpass2keepass::pipeline::Converter;

/// Printed before and after every message block.
const HORIZONTAL_RULE: &str = "____________________________________________________________";

fn main() {
    let args = <Args as ClapParser>::parse();
    setup_logging(args.log_level());

    match run(&args) {
        Ok(message) => formatted_print(&message),
        Err(e) => {
            formatted_print(&e.to_string());
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<String, ConvertError> {
    let input = args.input.as_deref().ok_or(ConvertError::MissingArgument)?;
    let output = args.output_path(input);

    let converter = Converter::new();
    let conversion = converter.convert_input(input)?;

    if let Some(path) = &args.normalized {
        converter.write_normalized(&conversion, path)?;
    }
    converter.write_document(&conversion, &output)?;

    let stats = conversion.stats();
    Ok(format!(
        "'{}' has been successfully converted to the KeePassXML format.\n\
         Converted data can be found in the '{}' file.\n\
         {} entries in {} groups.",
        input.display(),
        output.display(),
        stats.entries,
        stats.groups
    ))
}

fn formatted_print(message: &str) {
    println!("{HORIZONTAL_RULE}");
    println!("{message}");
    println!("{HORIZONTAL_RULE}");
}

fn setup_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
