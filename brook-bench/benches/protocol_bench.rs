//! Codec encoding/decoding benchmarks.

use brook_client::{StreamClient, Transport, TransportError};
use brook_protocol::frame::RequestFrame;
use brook_protocol::{
    CompressionAlgorithm, CreateStream, Identifier, ReadCursor, StreamDetails, StreamSummary,
    TopicSummary,
};
use bytes::{Bytes, BytesMut};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn create_test_summary(id: u32) -> StreamSummary {
    StreamSummary {
        id,
        created_at: 1_700_000_000_000_000,
        topics_count: 4,
        size_bytes: 1024 * 1024,
        messages_count: 100_000,
        name: format!("stream-{}", id),
    }
}

fn create_test_details(topics: u32) -> StreamDetails {
    StreamDetails {
        stream: StreamSummary {
            topics_count: topics,
            ..create_test_summary(1)
        },
        topics: (0..topics)
            .map(|id| TopicSummary {
                id,
                created_at: 1_700_000_000_000_000,
                partitions_count: 8,
                message_expiry: 0,
                compression: CompressionAlgorithm::None,
                max_topic_size: u64::MAX,
                replication_factor: 1,
                size_bytes: 4096,
                messages_count: 1000,
                name: format!("topic-{}", id),
            })
            .collect(),
    }
}

fn encode_summaries(count: u32) -> Bytes {
    let mut buf = BytesMut::new();
    for id in 0..count {
        create_test_summary(id).encode(&mut buf).unwrap();
    }
    buf.freeze()
}

/// Replies to every request with the same canned body.
struct CannedTransport(Bytes);

impl Transport for CannedTransport {
    fn send(&self, _command: u32, _payload: Bytes) -> Result<Bytes, TransportError> {
        Ok(self.0.clone())
    }
}

fn bench_request_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_encode");

    let create = CreateStream::new(None, "orders-eu-west");
    group.bench_function("create_stream", |b| {
        b.iter(|| black_box(create.to_bytes().unwrap()));
    });

    let id = Identifier::named("orders-eu-west");
    group.bench_function("identifier", |b| {
        b.iter(|| black_box(id.to_bytes().unwrap()));
    });

    let payload = create.to_bytes().unwrap();
    group.bench_function("frame", |b| {
        b.iter(|| black_box(RequestFrame::new(202, payload.clone()).encode()));
    });

    group.finish();
}

fn bench_list_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_decode");

    for count in [10, 100, 1000] {
        let encoded = encode_summaries(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &encoded, |b, encoded| {
            b.iter(|| {
                let mut cursor = ReadCursor::new(encoded.clone());
                let mut items = Vec::new();
                while !cursor.is_empty() {
                    items.push(StreamSummary::decode(&mut cursor).unwrap());
                }
                black_box(items)
            });
        });
    }

    group.finish();
}

fn bench_details_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("details_decode");

    for topics in [0, 10, 100] {
        let mut buf = BytesMut::new();
        create_test_details(topics).encode(&mut buf).unwrap();
        let encoded = buf.freeze();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(topics), &encoded, |b, encoded| {
            b.iter(|| {
                let mut cursor = ReadCursor::new(encoded.clone());
                black_box(StreamDetails::decode(&mut cursor).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_adapter_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapter_list");

    for count in [10, 1000] {
        let streams = StreamClient::new(CannedTransport(encode_summaries(count)));

        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| black_box(streams.list().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_request_encode,
    bench_list_decode,
    bench_details_decode,
    bench_adapter_list,
);

criterion_main!(benches);
