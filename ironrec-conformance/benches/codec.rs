//! Generated codec benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ironrec_conformance::frames::{self, Frame, Prefixed, Sensor};
use ironrec_conformance::nested::{self, Level1, Level2, Root};
use ironrec_core::{WireDecode, WireEncode, WireReader, WireWriter, decode_from_slice};
use std::hint::black_box;

fn sample_sensor() -> Sensor {
    Sensor {
        id: 17,
        gains: [1.0, 0.5, 0.25],
        label: *b"TEMP",
        scale: 0.01,
        flags: 3,
        offset: -42,
    }
}

fn sample_root(items: usize) -> Root {
    Root {
        top: Level1 {
            header: Level2::default(),
            count: items as u8,
            items: vec![Level2::default(); items],
        },
        notes: Vec::new(),
    }
}

fn benchmark_sensor_encode(c: &mut Criterion) {
    let sensor = sample_sensor();
    let mut writer = WireWriter::with_capacity(frames::BYTE_ORDER, 64);

    c.bench_function("sensor_encode", |b| {
        b.iter(|| {
            writer = WireWriter::with_capacity(frames::BYTE_ORDER, 64);
            black_box(&sensor).encode(&mut writer).expect("encode");
            black_box(writer.len())
        })
    });
}

fn benchmark_sensor_decode(c: &mut Criterion) {
    let mut writer = WireWriter::new(frames::BYTE_ORDER);
    sample_sensor().encode(&mut writer).expect("encode");
    let bytes = writer.into_vec();

    c.bench_function("sensor_decode", |b| {
        b.iter(|| decode_from_slice::<Sensor>(black_box(&bytes), frames::BYTE_ORDER))
    });
}

fn benchmark_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_decode");

    for len in [16usize, 256, 4096] {
        let items: Vec<u32> = (0..len as u32).collect();
        let frame = Frame {
            count: len as u32,
            items: items.clone(),
        };
        let prefixed = Prefixed { items };

        let mut writer = WireWriter::new(frames::BYTE_ORDER);
        frame.encode(&mut writer).expect("encode");
        let counted_bytes = writer.into_vec();

        let mut writer = WireWriter::new(frames::BYTE_ORDER);
        prefixed.encode(&mut writer).expect("encode");
        let prefixed_bytes = writer.into_vec();

        group.throughput(Throughput::Bytes(counted_bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("counted", len), &counted_bytes, |b, bytes| {
            b.iter(|| {
                let mut reader = WireReader::new(black_box(bytes), frames::BYTE_ORDER);
                Frame::decode(&mut reader)
            })
        });
        group.bench_with_input(
            BenchmarkId::new("prefixed", len),
            &prefixed_bytes,
            |b, bytes| {
                b.iter(|| {
                    let mut reader = WireReader::new(black_box(bytes), frames::BYTE_ORDER);
                    Prefixed::decode(&mut reader)
                })
            },
        );
    }

    group.finish();
}

fn benchmark_nested_round_trip(c: &mut Criterion) {
    let root = sample_root(32);

    c.bench_function("nested_round_trip", |b| {
        b.iter(|| {
            let mut writer = WireWriter::new(nested::BYTE_ORDER);
            black_box(&root).encode(&mut writer).expect("encode");
            let bytes = writer.into_vec();
            decode_from_slice::<Root>(&bytes, nested::BYTE_ORDER).expect("decode")
        })
    });
}

criterion_group!(
    benches,
    benchmark_sensor_encode,
    benchmark_sensor_decode,
    benchmark_sequences,
    benchmark_nested_round_trip,
);
criterion_main!(benches);
