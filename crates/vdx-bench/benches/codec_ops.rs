//! Criterion micro-benchmarks for encoding, decoding and stream framing.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vdx_bench::{deep_profile, framed_stream, wide_profile, NODE, WIDE};
use vdx_codec::MessageReader;
use vdx_schema::host_vehicle;
use vdx_test_utils::{host_vehicle_data_with_wheels, sample_host_vehicle_data};

/// Benchmark: Encode a fully populated HostVehicleData.
fn bench_encode_host_vehicle_data(c: &mut Criterion) {
    let registry = vdx_schema::registry().unwrap();
    let record = sample_host_vehicle_data();
    let encoder = registry.encoder();

    c.bench_function("encode_host_vehicle_data", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(1024);
            encoder
                .encode_into(&record, host_vehicle::NAME, &mut buf)
                .unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: Decode the same message.
fn bench_decode_host_vehicle_data(c: &mut Criterion) {
    let registry = vdx_schema::registry().unwrap();
    let encoded = registry
        .encode(&sample_host_vehicle_data(), host_vehicle::NAME)
        .unwrap();
    let decoder = registry.decoder();

    c.bench_function("decode_host_vehicle_data", |b| {
        b.iter(|| {
            let decoded = decoder.decode(&encoded, host_vehicle::NAME).unwrap();
            black_box(&decoded);
        });
    });
}

/// Benchmark: Decode with a growing repeated wheel list.
fn bench_decode_wheels(c: &mut Criterion) {
    let registry = vdx_schema::registry().unwrap();
    let mut group = c.benchmark_group("decode_wheels");
    for wheels in [4u32, 16, 64] {
        let encoded = registry
            .encode(&host_vehicle_data_with_wheels(wheels), host_vehicle::NAME)
            .unwrap();
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(wheels), &encoded, |b, bytes| {
            b.iter(|| black_box(registry.decode(bytes, host_vehicle::NAME).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: Round-trip a 256-field message.
fn bench_wide_roundtrip(c: &mut Criterion) {
    let (registry, record) = wide_profile(256).unwrap();

    c.bench_function("wide_roundtrip_256", |b| {
        b.iter(|| {
            let bytes = registry.encode(&record, WIDE).unwrap();
            black_box(registry.decode(&bytes, WIDE).unwrap());
        });
    });
}

/// Benchmark: Round-trip a message nested 48 levels deep.
fn bench_deep_roundtrip(c: &mut Criterion) {
    let (registry, record) = deep_profile(48).unwrap();

    c.bench_function("deep_roundtrip_48", |b| {
        b.iter(|| {
            let bytes = registry.encode(&record, NODE).unwrap();
            black_box(registry.decode(&bytes, NODE).unwrap());
        });
    });
}

/// Benchmark: Read 1000 framed HostVehicleData messages.
fn bench_stream_read(c: &mut Criterion) {
    let registry = vdx_schema::registry().unwrap();
    let stream = framed_stream(
        registry,
        host_vehicle::NAME,
        &sample_host_vehicle_data(),
        1000,
    )
    .unwrap();

    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("read_1000", |b| {
        b.iter(|| {
            let reader =
                MessageReader::new(stream.as_slice(), registry, host_vehicle::NAME).unwrap();
            black_box(reader.map(Result::unwrap).count());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_encode_host_vehicle_data,
    bench_decode_host_vehicle_data,
    bench_decode_wheels,
    bench_wide_roundtrip,
    bench_deep_roundtrip,
    bench_stream_read
);
criterion_main!(benches);
