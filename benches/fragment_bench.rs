//! Benchmarks for fragmentrs.
//!
//! Run with:
//!     cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use fragmentrs::{FragmentConfig, Fragmenter, Reassembler};

fn bench_fragmenter(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragmenter");
    let size = 4 * 1024 * 1024;
    // Deterministic pseudo-random data
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    for fragment_size in [1024, 64 * 1024, 1024 * 1024] {
        group.bench_with_input(
            BenchmarkId::new("each", fragment_size),
            &fragment_size,
            |b, &fragment_size| {
                let mut fragmenter = Fragmenter::from_bytes(data.clone(), FragmentConfig::new(fragment_size));
                b.iter(|| {
                    let mut bytes = 0usize;
                    fragmenter
                        .each(|_, _, payload| {
                            bytes += black_box(payload).len();
                            Ok::<(), std::convert::Infallible>(())
                        })
                        .unwrap();
                    black_box(bytes)
                });
            },
        );
    }

    group.finish();
}

fn bench_reassembler(c: &mut Criterion) {
    let mut group = c.benchmark_group("reassembler");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

    let mut fragmenter = Fragmenter::from_bytes(data, FragmentConfig::new(16 * 1024));
    let fragments: Vec<_> = fragmenter
        .iter()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let total = fragmenter.total();

    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("in_order", |b| {
        b.iter(|| {
            let mut r = Reassembler::in_memory(total);
            for fragment in &fragments {
                r.add(fragment.index, &fragment.data).unwrap();
            }
            black_box(r.hash().unwrap())
        });
    });

    // Worst case for buffering: everything arrives ahead of fragment 1.
    group.bench_function("reversed", |b| {
        b.iter(|| {
            let mut r = Reassembler::in_memory(total);
            for fragment in fragments.iter().rev() {
                r.add(fragment.index, &fragment.data).unwrap();
            }
            black_box(r.hash().unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fragmenter, bench_reassembler);
criterion_main!(benches);
