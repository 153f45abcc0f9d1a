//! Criterion benchmarks for line handling
//!
//! Run with: cargo bench
//! Results are saved in target/criterion/ for comparison

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gshell::core::dispatch::dispatch;
use gshell::core::operands::partition;
use gshell::core::settings::Settings;
use gshell::core::token::tokenize;

const LINES: [&str; 5] = [
    "+ src/main.rs src/lib.rs README.md Cargo.toml",
    "@feature/login > @master",
    "@main -> @upstream",
    "@a > @b + x.txt - y.txt ~ z.txt",
    "@lib = ~/src/project/lib",
];

/// Benchmark token classification
fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize", |b| {
        b.iter(|| {
            for line in LINES {
                black_box(tokenize(black_box(line)));
            }
        })
    });
}

/// Benchmark partitioning, restarts included
fn bench_partition(c: &mut Criterion) {
    let tokens: Vec<_> = LINES.iter().map(|line| tokenize(line)).collect();
    c.bench_function("partition", |b| {
        b.iter(|| {
            for line in &tokens {
                black_box(partition(black_box(line)));
            }
        })
    });
}

/// Benchmark the whole pure pipeline
fn bench_pipeline(c: &mut Criterion) {
    c.bench_function("tokenize_partition_dispatch", |b| {
        b.iter(|| {
            for line in LINES {
                let operands = partition(&tokenize(black_box(line)));
                let _ = black_box(dispatch(&operands));
            }
        })
    });
}

/// Benchmark settings YAML parsing
fn bench_settings_parse(c: &mut Criterion) {
    let yaml = r#"
history-length: 1000
ignore-submodules:
  - ~/vendor/skip
repositories:
  /home/me/project:
    remotes:
      origin: git@github.com:me/project.git
      upstream: git@github.com:them/project.git
submodules:
  - name: lib
    path: /home/me/project/lib
  - name: docs
    path: /home/me/project/docs
    ignore-dirty: false
"#;
    c.bench_function("settings_parse", |b| {
        b.iter(|| Settings::parse(black_box(yaml)))
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_partition,
    bench_pipeline,
    bench_settings_parse
);
criterion_main!(benches);
