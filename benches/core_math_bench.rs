use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use word_scatter::api::{ScatterConfig, ScatterEngine};
use word_scatter::core::{LogScale, MarkerSizing, PointStore, RawRecord, project_points};
use word_scatter::render::NullRenderer;

fn generated_records(count: usize, seed: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            let n = (i + seed) as f64;
            RawRecord::new(
                format!("word{i}"),
                0.01 + (n * 0.37) % 5.0,
                1.0 + (n * 13.0) % 10_000.0,
                (n * 0.11) % 7.0,
            )
        })
        .collect()
}

fn bench_log_scale_round_trip(c: &mut Criterion) {
    let scale = LogScale::new(0.01, 10_000.0, 58.0, 1182.0).expect("valid scale");

    c.bench_function("log_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.value_to_pixel(black_box(4_321.123)).expect("to pixel");
            let _ = scale.pixel_to_value(px).expect("from pixel");
        })
    });
}

fn bench_ingest_10k(c: &mut Criterion) {
    let records = generated_records(10_000, 0);

    c.bench_function("ingest_10k", |b| {
        b.iter(|| {
            let mut store = PointStore::new(MarkerSizing::default()).expect("store");
            let _ = store.ingest(black_box(records.clone()));
        })
    });
}

fn bench_projection_10k(c: &mut Criterion) {
    let mut store = PointStore::new(MarkerSizing::default()).expect("store");
    let _ = store.ingest(generated_records(10_000, 0));
    let x_scale = LogScale::new(0.01, 5.01, 58.0, 1182.0).expect("x scale");
    let y_scale = LogScale::new(1.0, 10_001.0, 692.0, 18.0).expect("y scale");

    c.bench_function("projection_10k", |b| {
        b.iter(|| {
            let _ = project_points(
                black_box(store.points()),
                black_box(x_scale),
                black_box(y_scale),
            )
            .expect("projection should succeed");
        })
    });
}

fn bench_render_pass_after_chunks(c: &mut Criterion) {
    c.bench_function("render_pass_20_chunks_of_100", |b| {
        b.iter(|| {
            let mut engine = ScatterEngine::new(NullRenderer::default(), ScatterConfig::default())
                .expect("engine init");
            for chunk in 0..20 {
                engine
                    .ingest_chunk(generated_records(100, chunk * 100))
                    .expect("ingest");
            }
            black_box(engine.shapes().len())
        })
    });
}

criterion_group!(
    benches,
    bench_log_scale_round_trip,
    bench_ingest_10k,
    bench_projection_10k,
    bench_render_pass_after_chunks
);
criterion_main!(benches);
