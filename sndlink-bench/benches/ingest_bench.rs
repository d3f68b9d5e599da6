//! Block-ingestion benchmarks: full transfers through the engine, with and
//! without the flash commit stage.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sndlink_mem::{BlockIngestor, IngestStatus, RamFlash, FLASH_PAGE_SIZE, STAGING_CAPACITY};
use sndlink_protocol::{frame, Frame, FRAME_PAYLOAD_LEN};

fn bench_volatile_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_volatile");

    for frames in [64usize, 1024] {
        let data = frame::data_frame(&[0x5Au8; FRAME_PAYLOAD_LEN]).unwrap();
        let stop = frame::stop_frame();

        group.throughput(Throughput::Bytes((frames * FRAME_PAYLOAD_LEN) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(frames), &frames, |b, &frames| {
            let mut ingestor = BlockIngestor::new(STAGING_CAPACITY);
            b.iter(|| {
                for _ in 0..frames {
                    assert_eq!(ingestor.ingest(&Frame::new(&data)), IngestStatus::Continue);
                }
                black_box(ingestor.ingest(&Frame::new(&stop)))
            });
        });
    }

    group.finish();
}

fn bench_durable_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_durable");

    for frames in [64usize, 1024] {
        let data = frame::data_frame(&[0x5Au8; FRAME_PAYLOAD_LEN]).unwrap();
        let stop = frame::stop_frame();

        group.throughput(Throughput::Bytes((frames * FRAME_PAYLOAD_LEN) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(frames), &frames, |b, &frames| {
            let mut ingestor = BlockIngestor::new(STAGING_CAPACITY);
            let mut flash = RamFlash::new(STAGING_CAPACITY, FLASH_PAGE_SIZE);
            b.iter(|| {
                for _ in 0..frames {
                    ingestor
                        .ingest_durable(&Frame::new(&data), &mut flash, 0)
                        .unwrap();
                }
                black_box(ingestor.ingest_durable(&Frame::new(&stop), &mut flash, 0))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_volatile_transfer, bench_durable_transfer);
criterion_main!(benches);
