//! Layout pass benchmarks.
//!
//! A full pass re-measures every card, so cost grows with the number of
//! loaded articles. These track how both strategies scale and how much of
//! a pass is card measurement.
//!
//! Run with: cargo bench --bench layout_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use masonry_feed::layout::{
    layout_breakpoints, layout_shortest_column, BreakpointColumns, FixedHeights, LayoutParams,
};
use masonry_feed::source::mock::generate_articles;
use masonry_feed::view::CardMeasurer;

const WIDTH: f32 = 160.0;

fn params() -> LayoutParams {
    LayoutParams::new(2.0, 32.0)
}

/// Heights resembling measured cards: 9 to 20 rows.
fn fixed_heights(count: usize) -> FixedHeights {
    FixedHeights((0..count).map(|i| 9.0 + ((i * 7) % 12) as f32).collect())
}

/// Pure placement cost with precomputed heights.
fn benchmark_placement_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_scaling");
    let breakpoints = BreakpointColumns::default().scaled(8.0);

    for count in [50, 500, 5_000] {
        group.bench_with_input(BenchmarkId::new("shortest", count), &count, |b, &count| {
            let mut heights = fixed_heights(count);
            b.iter(|| {
                layout_shortest_column(black_box(count), black_box(WIDTH), &params(), &mut heights)
            });
        });
        group.bench_with_input(
            BenchmarkId::new("breakpoints", count),
            &count,
            |b, &count| {
                let mut heights = fixed_heights(count);
                b.iter(|| {
                    layout_breakpoints(
                        black_box(count),
                        black_box(WIDTH),
                        &params(),
                        &breakpoints,
                        &mut heights,
                    )
                });
            },
        );
    }

    group.finish();
}

/// Full pass including word-wrapping every card.
fn benchmark_measured_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("measured_pass");

    for count in [50, 500] {
        let articles = generate_articles(count);
        group.bench_with_input(
            BenchmarkId::new("cards", count),
            &articles,
            |b, articles| {
                b.iter(|| {
                    let mut measurer = CardMeasurer::new(articles);
                    layout_shortest_column(
                        black_box(articles.len()),
                        black_box(WIDTH),
                        &params(),
                        &mut measurer,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(5));
    targets = benchmark_placement_scaling, benchmark_measured_pass
}

criterion_main!(benches);
