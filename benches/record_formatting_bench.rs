use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use numbench::record::{Approach, RECORD_LEN, itoa_hex, native, std_format, write_macro};
use numbench::sink::{WriteStrategy, write_records};
use std::hint::black_box;

/// One record per iteration, cycling through a fixed index range
fn bench_record_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_rendering");
    group.throughput(Throughput::Bytes(RECORD_LEN as u64));

    let mut i = 0u32;
    group.bench_function("native", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(native::make_record(black_box(i)))
        })
    });
    group.bench_function("std-format", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(std_format::make_record(black_box(i)))
        })
    });
    group.bench_function("itoa-hex", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(itoa_hex::make_record(black_box(i)))
        })
    });
    group.bench_function("write-macro", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(write_macro::make_record(black_box(i)))
        })
    });

    group.finish();
}

/// Write strategies against an in-memory discard sink, so only the buffering differs
fn bench_write_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_strategies");
    let records = 10_000u32;
    group.throughput(Throughput::Bytes(u64::from(records) * (RECORD_LEN as u64 + 1)));

    for strategy in WriteStrategy::ALL {
        for approach in [Approach::Native, Approach::ItoaHex] {
            group.bench_with_input(
                BenchmarkId::new(strategy.label(), approach.label()),
                &records,
                |b, &records| {
                    b.iter(|| {
                        let sink = std::io::sink();
                        let written = match approach {
                            Approach::Native => {
                                write_records(sink, strategy, records, native::make_record)
                            }
                            _ => write_records(sink, strategy, records, itoa_hex::make_record),
                        };
                        black_box(written.unwrap().1)
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_record_rendering, bench_write_strategies);
criterion_main!(benches);
