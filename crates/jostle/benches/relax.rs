use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use jostle::{ForceLayout, LayoutOptions, MemoryFeed};
use std::hint::black_box;
use std::time::Duration;

/// Ring with a chord from every node, so each node has degree three or four.
fn ring_with_chords(n: usize) -> MemoryFeed {
    let mut feed = MemoryFeed::new();
    for i in 0..n {
        feed.add_edge(format!("n{i}"), format!("n{}", (i + 1) % n));
        feed.add_edge(format!("n{i}"), format!("n{}", (i * 7 + 3) % n));
    }
    feed
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_layout_step");
    group.measurement_time(Duration::from_secs(5));

    for &n in &[16usize, 64, 256] {
        let feed = ring_with_chords(n);
        let mut engine = ForceLayout::new(LayoutOptions {
            random_seed: 1,
            ..Default::default()
        });
        engine.set_feed(&feed).expect("valid feed");

        group.bench_with_input(BenchmarkId::from_parameter(n), &engine, |b, engine| {
            b.iter_batched(
                || engine.clone(),
                |mut engine| black_box(engine.step()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_set_feed(c: &mut Criterion) {
    let feed = ring_with_chords(256);
    c.bench_function("force_layout_set_feed_256", |b| {
        b.iter(|| {
            let mut engine = ForceLayout::default();
            black_box(engine.set_feed(black_box(&feed)).expect("valid feed"))
        })
    });
}

criterion_group!(benches, bench_step, bench_set_feed);
criterion_main!(benches);
