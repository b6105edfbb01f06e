//! Performance benchmarks for the reply decoder

use std::hint::black_box;

use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use reply::ReplyDecoder;
use reply::ReplyParseResult;

fn decode_in_chunks(data: &[u8], chunk: usize) -> ReplyDecoder {
	let mut decoder = ReplyDecoder::new();
	let mut pos = 0;
	let mut end = 0;
	while end < data.len() {
		end = (end + chunk).min(data.len());
		if decoder.feed_at(&data[..end], &mut pos) == ReplyParseResult::Complete {
			break;
		}
	}
	decoder
}

fn bench_decode_status(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode_status");
	let data = b"+OK\r\n";

	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("status", |b| b.iter(|| reply::parse(black_box(data)).unwrap()));
	group.finish();
}

fn bench_decode_bulk(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode_bulk");
	let data = b"$11\r\nhello world\r\n";

	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("bulk", |b| b.iter(|| reply::parse(black_box(data)).unwrap()));
	group.finish();
}

fn bench_decode_multi_bulk(c: &mut Criterion) {
	let mut group = c.benchmark_group("decode_multi_bulk");

	let mut data = Vec::from(&b"*100\r\n"[..]);
	for i in 0..100 {
		data.extend_from_slice(format!("$3\r\n{:03}\r\n", i).as_bytes());
	}

	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("one_shot", |b| {
		b.iter(|| reply::parse(black_box(&data)).unwrap())
	});
	group.bench_function("chunks_of_16", |b| {
		b.iter(|| decode_in_chunks(black_box(&data), 16))
	});
	group.bench_function("byte_at_a_time", |b| {
		b.iter(|| decode_in_chunks(black_box(&data), 1))
	});
	group.finish();
}

criterion_group!(
	benches,
	bench_decode_status,
	bench_decode_bulk,
	bench_decode_multi_bulk,
);

criterion_main!(benches);
