//! Criterion benchmarks for channel_logger

use channel_logger::core::fields::write_fields;
use channel_logger::core::line_format::format_line;
use channel_logger::prelude::*;
use channel_logger::{sanitize_category, EntryPool, LogRecord};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

// ============================================================================
// Ingestion Benchmarks
// ============================================================================

fn bench_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().unwrap();
    let config = LoggerConfig::new(10_000, temp_dir.path()).with_min_level(LogLevel::Info);
    let logger = ChannelLogger::with_config(config).unwrap();

    group.bench_function("filtered_debug", |b| {
        b.iter(|| {
            logger.debug(black_box("bench"), black_box("filtered before enqueue"));
        });
    });

    group.bench_function("info", |b| {
        b.iter(|| {
            logger.info(black_box("bench"), black_box("Info message"));
        });
    });

    group.bench_function("with_fields", |b| {
        b.iter(|| {
            logger.log_with_fields(
                black_box("bench"),
                LogLevel::Info,
                black_box("request"),
                [("status", FieldValue::from(200)), ("path", FieldValue::from("/"))],
            );
        });
    });

    let token = CancellationToken::new();
    token.cancel();
    group.bench_function("cancelled_context", |b| {
        b.iter(|| {
            logger.log_with_context(&token, black_box("bench"), "info", black_box("skipped"));
        });
    });

    group.finish();
    logger.close();
}

fn bench_concurrent_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_ingestion");
    group.throughput(Throughput::Elements(4 * 100));
    group.sample_size(20);

    let temp_dir = TempDir::new().unwrap();
    let logger = Arc::new(ChannelLogger::new(10_000, temp_dir.path()).unwrap());

    group.bench_function("4_threads_x_100", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let logger = Arc::clone(&logger);
                    thread::spawn(move || {
                        for i in 0..100 {
                            logger.info("concurrent", &format!("t{} i{}", t, i));
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
    logger.close();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");

    let mut record = LogRecord::new();
    record.fill("svc", LogLevel::Info, "user logged in");
    record.extend_fields([
        ("user_id", FieldValue::from(12345)),
        ("ip", FieldValue::from("192.168.1.1")),
        ("action", FieldValue::from("login")),
    ]);

    for (name, format) in [
        ("custom_default", TimestampFormat::default()),
        ("rfc3339", TimestampFormat::Rfc3339),
        ("unix_millis", TimestampFormat::UnixMillis),
    ] {
        let mut line = String::with_capacity(256);
        group.bench_function(name, |b| {
            b.iter(|| {
                format_line(black_box(&record), &format, &mut line);
                black_box(line.len())
            });
        });
    }

    let mut out = String::with_capacity(128);
    group.bench_function("fields_only", |b| {
        b.iter(|| {
            out.clear();
            write_fields(black_box(&record.fields), &mut out);
        });
    });

    group.bench_function("sanitize_category", |b| {
        b.iter(|| sanitize_category(black_box("service/http handler@v2")));
    });

    group.finish();
}

// ============================================================================
// Entry Pool Benchmarks
// ============================================================================

fn bench_entry_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("entry_pool");
    group.throughput(Throughput::Elements(1));

    let pool = EntryPool::new(64);
    group.bench_function("acquire_fill_release", |b| {
        b.iter(|| {
            let mut record = pool.acquire();
            record.fill("svc", LogLevel::Info, black_box("pooled message"));
            pool.release(record);
        });
    });

    group.bench_function("fresh_allocation", |b| {
        b.iter(|| {
            let mut record = LogRecord::new();
            record.fill("svc", LogLevel::Info, black_box("fresh message"));
            black_box(record)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_ingestion,
    bench_concurrent_ingestion,
    bench_formatting,
    bench_entry_pool
);
criterion_main!(benches);
