//! Checksum engine benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sndlink_protocol::crc16;

fn bench_crc16(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc16");

    for size in [60, 4096, 61440] {
        let data = vec![0xA5u8; size];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(crc16(data)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_crc16);
criterion_main!(benches);
