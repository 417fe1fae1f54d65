//! KeePassX XML output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::config::DocumentConfig;
use crate::document::{Database, Group, KeepassEntry};
use crate::error::{ConvertError, Result};

type XmlWriter = Writer<Vec<u8>>;

/// Writes the database to `output_path` as a KeePassX import file.
///
/// The file is created or truncated.
pub fn write_xml(
    database: &Database,
    output_path: impl AsRef<Path>,
    config: &DocumentConfig,
) -> Result<()> {
    let path = output_path.as_ref();
    let xml = to_xml(database, config)?;
    let mut file = File::create(path).map_err(|e| ConvertError::file_write(path, e))?;
    file.write_all(xml.as_bytes())
        .map_err(|e| ConvertError::file_write(path, e))?;
    Ok(())
}

/// Converts the database to a KeePassX XML string.
///
/// # Format
/// ```xml
/// <!DOCTYPE KEEPASSX_DATABASE><database><group><title>Work</title><icon>0</icon><entry><title>Site</title>...</entry></group></database>
/// ```
///
/// No XML declaration and no indentation. Only `&`, `<` and `>` are escaped
/// in text; everything else is written as UTF-8. Elements with an empty value
/// are self-closing (`<comment/>`).
pub fn to_xml(database: &Database, config: &DocumentConfig) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    if database.groups().is_empty() {
        emit(&mut writer, Event::Empty(BytesStart::new("database")))?;
    } else {
        start(&mut writer, "database")?;
        for group in database.groups() {
            write_group(&mut writer, group)?;
        }
        end(&mut writer, "database")?;
    }

    let body = String::from_utf8(writer.into_inner()).map_err(ConvertError::serialize)?;

    let mut xml = String::with_capacity(config.doctype.len() + body.len());
    xml.push_str(&config.doctype);
    xml.push_str(&body);
    Ok(xml)
}

fn write_group(writer: &mut XmlWriter, group: &Group) -> Result<()> {
    start(writer, "group")?;
    text_element(writer, "title", &group.title)?;
    text_element(writer, "icon", &group.icon)?;
    for entry in &group.entries {
        write_entry(writer, entry)?;
    }
    end(writer, "group")
}

fn write_entry(writer: &mut XmlWriter, entry: &KeepassEntry) -> Result<()> {
    start(writer, "entry")?;
    for (name, value) in entry.fields() {
        text_element(writer, name, value)?;
    }
    end(writer, "entry")
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        return emit(writer, Event::Empty(BytesStart::new(name)));
    }
    start(writer, name)?;
    emit(writer, Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    end(writer, name)
}

fn start(writer: &mut XmlWriter, name: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map(|_| ())
        .map_err(ConvertError::serialize)
}
