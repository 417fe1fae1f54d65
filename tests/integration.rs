//! Integration tests for the conversion pipeline with real files

use chrono::NaiveDate;
use lastpass2keepass::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn converter() -> Converter {
    let at = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    Converter::new().with_timestamp(at)
}

/// Text of every `<name>` element, in document order.
fn element_texts<'a>(xml: &'a str, name: &str) -> Vec<&'a str> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");
    let mut texts = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find(&open) {
        let after = &rest[start + open.len()..];
        let end = after.find(&close).unwrap();
        texts.push(&after[..end]);
        rest = &after[end + close.len()..];
    }
    texts
}

const TWO_ROWS: &str = concat!(
    "url,username,password,extra,name,grouping,last_touch,launch_count,fav\n",
    "http://a.com,u1,p1,note,Site A,Work,1400000000,3,0\n",
    "http://b.com,u2,p2,,Site B,Home,1400000001,0,1\n",
);

// =========================================================================
// Document shape
// =========================================================================

#[test]
fn test_two_categories_two_groups() {
    let xml = converter().convert_str(TWO_ROWS).unwrap().into_xml();

    assert_eq!(xml.matches("<group>").count(), 2);
    assert_eq!(xml.matches("<entry>").count(), 2);

    let work = xml.find("<title>Work</title>").unwrap();
    let home = xml.find("<title>Home</title>").unwrap();
    assert!(work < home);

    let work_group = &xml[work..home];
    assert!(work_group.contains("<comment>note</comment>"));
    assert!(work_group.contains("<url>http://a.com</url>"));
}

#[test]
fn test_exact_entry_element() {
    let xml = converter().convert_str(TWO_ROWS).unwrap().into_xml();
    let expected = concat!(
        "<entry><title>Site B</title><username>u2</username><password>p2</password>",
        "<url>http://b.com</url><comment/><icon>0</icon>",
        "<creation>2024-01-15T10:30</creation><lastaccess>Home</lastaccess>",
        "<lastmod>2024-01-15T10:30</lastmod><expire>Never</expire></entry>",
    );
    assert!(xml.contains(expected));
}

#[test]
fn test_multi_line_note_becomes_comment() {
    let raw = concat!(
        "url,username,password,extra,name,grouping,last_touch,launch_count,fav\n",
        "http://a.com,u1,p1,\n",
        "\"line1\n",
        "line2\",Site A,Work,1400000000,3,0\n",
    );
    let conversion = converter().convert_str(raw).unwrap();

    assert!(conversion.normalized().as_str().contains("\"line1|\t|line2\""));
    assert_eq!(element_texts(conversion.xml(), "comment"), vec!["line1\nline2"]);
}

#[test]
fn test_creation_and_lastmod_identical_across_run() {
    let raw = fs::read_to_string(fixture("lastpass_export.csv")).unwrap();
    let xml = Converter::new().convert_str(&raw).unwrap().into_xml();

    let creation = element_texts(&xml, "creation");
    let lastmod = element_texts(&xml, "lastmod");
    assert_eq!(creation.len(), 5);
    assert_eq!(creation, lastmod);
    assert!(creation.iter().all(|c| *c == creation[0]));
}

#[test]
fn test_lastaccess_carries_category() {
    let xml = converter().convert_str(TWO_ROWS).unwrap().into_xml();
    assert_eq!(element_texts(&xml, "lastaccess"), vec!["Work", "Home"]);
}

// =========================================================================
// Fixture export
// =========================================================================

#[test]
fn test_fixture_stats() {
    let raw = fs::read_to_string(fixture("lastpass_export.csv")).unwrap();
    let stats = converter().convert_str(&raw).unwrap().stats();

    assert_eq!(stats.raw_lines, 9);
    assert_eq!(stats.records, 5);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.groups, 4);
}

#[test]
fn test_fixture_group_order() {
    let raw = fs::read_to_string(fixture("lastpass_export.csv")).unwrap();
    let xml = converter().convert_str(&raw).unwrap().into_xml();

    // First title of each group is the group title, then the entry titles
    let titles = element_texts(&xml, "title");
    assert_eq!(
        titles,
        vec![
            "Finance\\Banks",
            "My Bank",
            "Email",
            "Example Mail",
            "News",
            "Shopping",
            "Shop",
            "Secure Notes",
            "Database Server",
        ]
    );
}

#[test]
fn test_fixture_escaping_and_quoting() {
    let raw = fs::read_to_string(fixture("lastpass_export.csv")).unwrap();
    let xml = converter().convert_str(&raw).unwrap().into_xml();

    assert!(xml.contains("<url>http://bank.example.com/login?a=1&amp;b=2</url>"));
    assert!(xml.contains("<password>p&lt;a&gt;ss</password>"));
    assert!(xml.contains("<comment>Account no, 4411</comment>"));
    assert!(xml.contains(
        "<comment>NoteType:Server\nHostname:db.internal\nUsername:root</comment>"
    ));
}

#[test]
fn test_convert_file_round_trip_on_disk() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.csv");
    fs::copy(fixture("lastpass_export.csv"), &input).unwrap();
    let output = output_path_for(&input);

    let stats = converter().convert_file(&input, &output).unwrap();
    assert_eq!(stats.entries, 5);

    let written = fs::read_to_string(&output).unwrap();
    let in_memory = converter()
        .convert_str(&fs::read_to_string(&input).unwrap())
        .unwrap()
        .into_xml();
    assert_eq!(written, in_memory);
    assert!(written.starts_with("<!DOCTYPE KEEPASSX_DATABASE><database><group>"));
}

#[test]
fn test_write_normalized_separate_file() {
    let dir = tempdir().unwrap();
    let normalized_path = dir.path().join("normalized.csv");
    let raw = fs::read_to_string(fixture("lastpass_export.csv")).unwrap();

    let converter = converter();
    let conversion = converter.convert_str(&raw).unwrap();
    converter
        .write_normalized(&conversion, &normalized_path)
        .unwrap();

    let normalized = fs::read_to_string(&normalized_path).unwrap();
    // Header plus one line per record
    assert_eq!(normalized.lines().count(), 6);
    assert!(normalized.contains(
        "\nhttp://sn,,,\"NoteType:Server|\t|Hostname:db.internal|\t|Username:root\",Database Server,Secure Notes,1400000300,0,0"
    ));
}

// =========================================================================
// Stage by stage
// =========================================================================

#[test]
fn test_stages_compose_like_converter() {
    let raw = fs::read_to_string(fixture("lastpass_export.csv")).unwrap();
    let at = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();

    let normalizer = Normalizer::new(&NormalizerConfig::default()).unwrap();
    let normalized = normalizer.normalize(&raw);
    let entries = read_entries(normalized.as_str()).unwrap();
    let groups = group_by_category(entries);
    let database = DocumentBuilder::with_timestamp(DocumentConfig::default(), at)
        .unwrap()
        .build(&groups);
    let xml = to_xml(&database, &DocumentConfig::default()).unwrap();

    assert_eq!(database.entry_count(), 5);
    assert_eq!(xml, converter().convert_str(&raw).unwrap().into_xml());
}

#[test]
fn test_write_xml_matches_to_xml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.xml");
    let entries = vec![Entry::new("http://a.com", "u", "p", "", "Site", "Work")];
    let database = DocumentBuilder::new(DocumentConfig::default())
        .unwrap()
        .build(&group_by_category(entries));

    write_xml(&database, &path, &DocumentConfig::default()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        to_xml(&database, &DocumentConfig::default()).unwrap()
    );
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_custom_line_break_token() {
    let raw = concat!(
        "url,username,password,extra,name,grouping,fav\n",
        "http://a.com,u,p,\n",
        "\"one\n",
        "two\",Site,Work,0\n",
    );
    let config = ConvertConfig::new().with_line_break_token("<BR>");
    let conversion = Converter::with_config(config).convert_str(raw).unwrap();

    assert!(conversion.normalized().as_str().contains("\"one<BR>two\""));
    assert_eq!(element_texts(conversion.xml(), "comment"), vec!["one\ntwo"]);
}

#[test]
fn test_custom_record_start() {
    let raw = concat!(
        "url,username,password,extra,name,grouping,fav\n",
        "ftp://files.example.com,u,p,,Files,Work,0\n",
        "http://a.com,u,p,,Site,Work,0\n",
    );
    let config = ConvertConfig::new().with_record_start("^(http|ftp)");
    let stats = Converter::with_config(config).convert_str(raw).unwrap().stats();
    assert_eq!(stats.records, 2);
    assert_eq!(stats.entries, 2);
}

#[test]
fn test_custom_expire() {
    let config = ConvertConfig::new().with_expire("2099-12-31T23:59");
    let xml = Converter::with_config(config)
        .convert_str(TWO_ROWS)
        .unwrap()
        .into_xml();
    assert_eq!(
        element_texts(&xml, "expire"),
        vec!["2099-12-31T23:59", "2099-12-31T23:59"]
    );
}
