//! Benchmark – feeding a synthetic document through `jsonloom::Parser` in
//! varying numbers of chunks.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jsonloom::{chunks_of, IncompleteStrings, Parser, ParserOptions};

/// Produce a deterministic JSON document of roughly `target_len` bytes: an
/// object holding one long string and a numbers array, so both the string
/// and the literal paths get exercised.
fn make_payload(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 64);
    s.push_str("{\"data\":\"");
    while s.len() < target_len * 3 / 4 {
        s.push_str("streaming json ");
    }
    s.push_str("\",\"nums\":[0");
    let mut n = 1usize;
    while s.len() < target_len {
        s.push_str(",");
        s.push_str(&n.to_string());
        n += 1;
    }
    s.push_str("]}");
    s
}

fn run_parser(payload: &str, parts: usize, options: &ParserOptions) -> usize {
    let chunk_size = payload.len().div_ceil(parts);
    let mut parser = Parser::new(options.clone());
    for chunk in chunks_of(payload, chunk_size) {
        parser.push(chunk).expect("payload is valid");
    }
    parser.close().expect("payload is complete");
    parser.value().as_object().map_or(0, |m| m.len())
}

fn bench_streaming(c: &mut Criterion) {
    let payload = make_payload(64 * 1024);
    let mut group = c.benchmark_group("streaming");

    for parts in [1usize, 16, 256] {
        group.bench_with_input(
            BenchmarkId::new("plain", parts),
            &parts,
            |b, &parts| {
                let options = ParserOptions::default();
                b.iter(|| run_parser(black_box(&payload), parts, &options));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("surfacing", parts),
            &parts,
            |b, &parts| {
                let options = ParserOptions {
                    incomplete_strings: IncompleteStrings::WithSuffix("...".into()),
                    ..Default::default()
                };
                b.iter(|| run_parser(black_box(&payload), parts, &options));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_streaming);
criterion_main!(benches);
