//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for telnetcodec performance

use bytes::BytesMut;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mudlink_telnetcodec::{FrameDemuxer, TelnetEncoder, consts};

// ============================================================================
// Helpers
// ============================================================================

/// Typical MUD output: prose with a GMCP update and a prompt marker every line.
fn mud_stream(lines: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..lines {
        out.extend_from_slice(format!("\x1b[1;32mYou see a goblin #{i} here.\x1b[0m\r\n").as_bytes());
        out.extend_from_slice(&[consts::IAC, consts::SB, consts::option::GMCP]);
        out.extend_from_slice(format!("Char.Vitals {{\"hp\":{i}}}").as_bytes());
        out.extend_from_slice(&[consts::IAC, consts::SE, consts::IAC, consts::GA]);
    }
    out
}

// ============================================================================
// Demux Benchmarks
// ============================================================================

fn bench_demux_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("demux_stream");
    for lines in [10usize, 100, 1000] {
        let input = mud_stream(lines);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &input, |b, input| {
            b.iter(|| {
                let mut demux = FrameDemuxer::new();
                black_box(demux.feed(black_box(input)))
            });
        });
    }
    group.finish();
}

fn bench_demux_fragmented(c: &mut Criterion) {
    let input = mud_stream(100);
    c.bench_function("demux_fragmented_16", |b| {
        b.iter(|| {
            let mut demux = FrameDemuxer::new();
            let mut count = 0;
            for chunk in input.chunks(16) {
                count += demux.feed(black_box(chunk)).len();
            }
            black_box(count)
        });
    });
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape");
    let plain = vec![b'a'; 4096];
    let dense = vec![consts::IAC; 4096];
    group.bench_function("plain", |b| {
        let mut buffer = BytesMut::with_capacity(8192);
        b.iter(|| {
            buffer.clear();
            TelnetEncoder::escape_into(black_box(&plain), &mut buffer);
        });
    });
    group.bench_function("all_iac", |b| {
        let mut buffer = BytesMut::with_capacity(8192);
        b.iter(|| {
            buffer.clear();
            TelnetEncoder::escape_into(black_box(&dense), &mut buffer);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_demux_stream,
    bench_demux_fragmented,
    bench_escape
);
criterion_main!(benches);
