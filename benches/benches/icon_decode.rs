//! Benchmark suite for icon decoding
//!
//! Measures container parsing, LZ11 decompression and icon de-tiling on
//! synthetic data shaped like the real icon set.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use garc_benches::{generate_garc, generate_icon_data, generate_lz11_data};
use garc_types::file::{GarcFile, Icon, IconLayout, lz};
use std::hint::black_box;

/// Benchmark icon decoding for both pixel packings
fn bench_icon_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("icon_decode");
	let layout = IconLayout::default();

	for colors in [16u16, 256] {
		let data = generate_icon_data(64, 32, colors);
		group.throughput(Throughput::Elements(layout.raw_pixel_count() as u64));
		group.bench_with_input(BenchmarkId::new("decode", format!("{colors}_colors")), &data, |b, data| {
			b.iter(|| {
				let result = Icon::decode(black_box(data), 0, &layout);
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark LZ11 decompression of a single icon payload
fn bench_lz11(c: &mut Criterion) {
	let mut group = c.benchmark_group("lz11");

	let plain = generate_icon_data(64, 32, 16);
	let packed = generate_lz11_data(&plain);
	group.throughput(Throughput::Bytes(plain.len() as u64));
	group.bench_function("decompress", |b| {
		b.iter(|| {
			let result = lz::decompress(black_box(&packed));
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark parsing a container of icon-sized subfiles
fn bench_container(c: &mut Criterion) {
	let mut group = c.benchmark_group("garc_parse");

	for count in [100usize, 1000] {
		let payloads: Vec<Vec<u8>> = (0..count).map(|_| generate_lz11_data(&generate_icon_data(64, 32, 16))).collect();
		let data = generate_garc(&payloads);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("from_bytes", count), &data, |b, data| {
			b.iter(|| {
				let result = GarcFile::from_bytes(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_icon_decode, bench_lz11, bench_container);
criterion_main!(benches);
