use criterion::{Criterion, black_box, criterion_group, criterion_main};
use strip_core::{BalancePolicy, BuildMode, MarkerConfig, MarkerSet, scan, strip, strip_active};

/// A synthetic module with a region every few lines
fn synthetic_source(functions: usize) -> String {
    let mut text = String::from("import { api } from './api';\n\n");
    for i in 0..functions {
        text.push_str(&format!("export function handler{i}(req) {{\n"));
        text.push_str(&format!("  console.log('enter {i}'); // BUILD_REMOVE\n"));
        text.push_str("  /* BUILD_REMOVE_START */\n");
        text.push_str(&format!("  validate(req, {i});\n"));
        text.push_str("  /* BUILD_REMOVE_END */\n");
        text.push_str("  // DEBUG_REMOVE_START\n  trace(req);\n  // DEBUG_REMOVE_END\n");
        text.push_str(&format!("  return api.call({i}, req);\n}}\n\n"));
    }
    text
}

fn scan_benchmark(c: &mut Criterion) {
    let source = synthetic_source(1_000);
    let markers = MarkerSet::default();

    c.bench_function("scanner::scan (1k functions)", |b| {
        b.iter(|| {
            scan(black_box(&source), &markers, BalancePolicy::Strict).unwrap();
        })
    });
}

fn strip_benchmark(c: &mut Criterion) {
    let source = synthetic_source(1_000);
    let markers = MarkerSet::default();
    let config = MarkerConfig::default();
    let mode = BuildMode::default();

    c.bench_function("stripper::strip (1k functions)", |b| {
        b.iter(|| {
            strip(black_box(&source), &markers, BalancePolicy::Strict).unwrap();
        })
    });

    c.bench_function("stripper::strip_active (1k functions)", |b| {
        b.iter(|| {
            strip_active(black_box(&source), &config, None, &mode).unwrap();
        })
    });

    let clean: String = synthetic_source(1_000)
        .lines()
        .filter(|line| !line.contains("REMOVE"))
        .map(|line| format!("{line}\n"))
        .collect();
    c.bench_function("stripper::strip (no markers)", |b| {
        b.iter(|| {
            strip(black_box(&clean), &markers, BalancePolicy::Strict).unwrap();
        })
    });
}

criterion_group!(benches, scan_benchmark, strip_benchmark);
criterion_main!(benches);
