//! Benchmarks for the conversion stages.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench conversion -- normalize`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use lastpass2keepass::config::{DocumentConfig, NormalizerConfig};
use lastpass2keepass::document::DocumentBuilder;
use lastpass2keepass::grouping::group_by_category;
use lastpass2keepass::normalizer::Normalizer;
use lastpass2keepass::output::to_xml;
use lastpass2keepass::pipeline::Converter;
use lastpass2keepass::reader::read_entries;

// =============================================================================
// Test Data Generators
// =============================================================================

const CATEGORIES: [&str; 5] = ["Email", "Work", "Finance\\Banks", "Shopping", "Secure Notes"];

/// A raw export where every fourth record carries a three-line note.
fn generate_export(count: usize) -> String {
    let mut raw =
        String::from("url,username,password,extra,name,grouping,last_touch,launch_count,fav\n");
    for i in 0..count {
        let category = CATEGORIES[i % CATEGORIES.len()];
        let fav = i % 2;
        if i % 4 == 0 {
            raw.push_str(&format!(
                "http://sn,,,\n\"NoteType:Server\nHostname:host{i}\nUsername:root\",Note {i},{category},1400000000,0,{fav}\n"
            ));
        } else {
            raw.push_str(&format!(
                "http://site{i}.example.com,user{i},pass{i},,Site {i},{category},1400000000,{i},{fav}\n"
            ));
        }
    }
    raw
}

const SIZES: [usize; 3] = [100, 1_000, 10_000];

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = Normalizer::new(&NormalizerConfig::default()).unwrap();

    for size in SIZES {
        let raw = generate_export(size);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| black_box(normalizer.normalize(black_box(raw))));
        });
    }
    group.finish();
}

fn bench_read_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_entries");
    let normalizer = Normalizer::new(&NormalizerConfig::default()).unwrap();

    for size in SIZES {
        let normalized = normalizer.normalize(&generate_export(size)).into_string();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &normalized,
            |b, normalized| {
                b.iter(|| black_box(read_entries(black_box(normalized)).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_build_and_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_and_serialize");
    let normalizer = Normalizer::new(&NormalizerConfig::default()).unwrap();
    let at = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    let builder = DocumentBuilder::with_timestamp(DocumentConfig::default(), at).unwrap();

    for size in SIZES {
        let normalized = normalizer.normalize(&generate_export(size));
        let entries = read_entries(normalized.as_str()).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| {
                let groups = group_by_category(entries.clone());
                let database = builder.build(&groups);
                black_box(to_xml(&database, builder.config()).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_full_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_conversion");
    let converter = Converter::new();

    for size in SIZES {
        let raw = generate_export(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| black_box(converter.convert_str(black_box(raw)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_read_entries,
    bench_build_and_serialize,
    bench_full_conversion
);

criterion_main!(benches);
