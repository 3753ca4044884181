use criterion::{black_box, Criterion};
use frametime_stats::{
    analysis::{aggregate, combine, TickScale},
    common::{plots::BarChart, Dataset, Measurement},
    config::Preset,
};

fn generate_test_data(file_count: usize, rows_per_file: usize, key_count: u32) -> Vec<Dataset> {
    (0..file_count)
        .map(|file| {
            let rows = (0..rows_per_file)
                .map(|x| {
                    let key = (x as u32 % key_count + 1) * 10;
                    let frame_time = 8.0 + ((x * 31 + file * 7) % 250) as f64 / 4.0;
                    Measurement::new(key, frame_time)
                })
                .collect();
            Dataset::new(None, rows)
        })
        .collect()
}

pub fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_frame_times");

    for key_count in [4u32, 64, 1024] {
        let combined = combine(generate_test_data(3, 100_000, key_count));

        group.bench_function(format!("{}_keys", key_count), |b| {
            b.iter(|| aggregate(black_box(&combined)))
        });
    }

    group.finish();
}

pub fn bench_build_chart(c: &mut Criterion) {
    let aggregates = aggregate(&combine(generate_test_data(3, 10_000, 64)));
    let labels = Preset::Cubes.labels();
    let scale = TickScale::default();

    c.bench_function("build_bar_chart", |b| {
        b.iter(|| {
            BarChart::from_aggregates(
                black_box(&aggregates),
                black_box(&labels),
                black_box(&scale),
                black_box(4.0),
            )
        })
    });
}
