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

//! Benchmarks for the terminal engine

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mudlink_terminal::{AnsiTerminalEngine, ScrollbackConfig, render};
use std::hint::black_box;

fn combat_log(lines: usize) -> String {
    (0..lines)
        .map(|i| {
            format!(
                "\x1b[1;31mThe troll\x1b[0m hits you {i} times.  \x1b[32m[HP {}]\x1b[0m\r\n",
                1000 - i
            )
        })
        .collect()
}

fn bench_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_feed");
    for lines in [10usize, 100, 1000] {
        let text = combat_log(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            let mut engine = AnsiTerminalEngine::new(ScrollbackConfig::default()).unwrap();
            b.iter(|| black_box(engine.feed(black_box(text))));
        });
    }
    group.finish();
}

fn bench_to_html(c: &mut Criterion) {
    let mut engine = AnsiTerminalEngine::new(ScrollbackConfig::default()).unwrap();
    let events = engine.feed(&combat_log(100));
    c.bench_function("to_html_100_lines", |b| {
        b.iter(|| black_box(render::to_html(black_box(&events))));
    });
}

criterion_group!(benches, bench_feed, bench_to_html);
criterion_main!(benches);
