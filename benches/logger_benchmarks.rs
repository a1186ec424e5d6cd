//! Criterion benchmarks for necrolog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use necrolog::core::encoder::{ColorConsoleEncoder, EventEncoder, JsonEncoder};
use necrolog::prelude::*;
use std::io::sink;
use tempfile::TempDir;

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoders(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoders");
    group.throughput(Throughput::Elements(1));

    let entry = LogEntry::new(LogLevel::Info, "Request processed in 12ms");
    let json = JsonEncoder::default();
    let console = ColorConsoleEncoder::new("UTC");

    group.bench_function("json", |b| b.iter(|| json.encode(black_box(&entry))));
    group.bench_function("color_console", |b| {
        b.iter(|| console.encode(black_box(&entry)))
    });

    group.finish();
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn quiet_registry(dir: &TempDir, level: &str) -> Registry {
    Registry::with_console_factory(
        LogConfig::default()
            .with_level(level)
            .with_max_segment_bytes(64 * 1024 * 1024)
            .with_status_dir(dir.path().join("status")),
        |config| ConsoleAppender::new(config.timezone.clone()).with_writer(sink()),
    )
}

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.throughput(Throughput::Elements(1));

    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = quiet_registry(&dir, "warn");
    let path = dir.path().join("bench.log");
    registry.get_or_create(&path);

    group.bench_function("lookup_hit", |b| {
        b.iter(|| black_box(registry.get_or_create(&path)))
    });

    group.bench_function("filtered_emit", |b| {
        b.iter(|| registry.debug(&path, black_box("dropped before the sinks")))
    });

    group.bench_function("synced_emit", |b| {
        b.iter(|| registry.error(&path, black_box("flushed and synced")))
    });

    group.finish();
}

criterion_group!(benches, bench_encoders, bench_registry);
criterion_main!(benches);
