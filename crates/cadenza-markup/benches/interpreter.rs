//! Benchmarks for lesson interpretation.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use cadenza_markup::LessonInterpreter;
use cadenza_storage::MockLessonStore;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Generate lesson text with the given number of sections.
fn generate_lesson(sections: usize) -> String {
    let mut text = String::with_capacity(sections * 200);
    text.push_str("# Lesson Title\n\n");

    for i in 0..sections {
        text.push_str(&format!("## Section {i}\n\n"));
        text.push_str("Play the exercise **slowly** with a metronome.\n");
        text.push_str(&format!("image:diagram_{}.png|Diagram {i}|small\n", i % 4));
        text.push_str("video:https://youtu.be/dQw4w9WgXcQ|Demo|large\n");
        text.push_str("image:missing.png\n\n");
    }
    text
}

fn store() -> MockLessonStore {
    (0..4).fold(MockLessonStore::new(), |store, i| {
        store.with_media(&format!("diagram_{i}.png"))
    })
}

fn bench_render_simple(c: &mut Criterion) {
    let store = store();
    let interpreter = LessonInterpreter::new(&store);

    c.bench_function("render_simple_lesson", |b| {
        b.iter(|| interpreter.render_text("# Hello\n\nSimple content."));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let store = store();
    let interpreter = LessonInterpreter::new(&store);

    let mut group = c.benchmark_group("render_by_size");

    for sections in [5, 20, 100] {
        let text = generate_lesson(sections);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("lesson", format!("{sections}s")),
            &text,
            |b, text| b.iter(|| interpreter.render_text(text)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render_simple, bench_render_varying_sizes);
criterion_main!(benches);
