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

//! Benchmarks for the ANSI parser

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mudlink_ansicodec::{AnsiParser, AnsiSequence, StyleState};
use std::hint::black_box;

fn colored_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("\x1b[1;3{}m{i:>4}\x1b[0m The orc swings at you and misses.\r\n", i % 8))
        .collect()
}

fn bench_parse_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_plain");
    for size in [100usize, 1000, 10000] {
        let text = "A".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            let mut parser = AnsiParser::new();
            b.iter(|| black_box(parser.feed(black_box(text))));
        });
    }
    group.finish();
}

fn bench_parse_and_style(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_style");
    for lines in [10usize, 100, 1000] {
        let text = colored_text(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            let mut parser = AnsiParser::new();
            b.iter(|| {
                let mut style = StyleState::default();
                for sequence in parser.feed(black_box(text)) {
                    if let AnsiSequence::Csi(csi) = sequence {
                        style.apply_sgr(&csi.sgr_params());
                    }
                }
                black_box(style)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_plain, bench_parse_and_style);
criterion_main!(benches);
