use criterion::{black_box, criterion_group, criterion_main, Criterion};
use diabsvm::api::PipelineBuilder;
use diabsvm::{CSVDataset, FeatureVector, Label, Sample};

/// Synthetic two-cluster dataset, deterministic
fn synthetic_dataset(n: usize) -> CSVDataset {
    let samples = (0..n)
        .map(|i| {
            let positive = i % 3 == 0;
            let jitter = (i % 17) as f64 * 0.37;
            let base = if positive { 150.0 } else { 95.0 };
            let values = [
                (i % 9) as f64,
                base + jitter * 3.0,
                70.0 + jitter,
                20.0 + jitter,
                (i % 5) as f64 * 40.0,
                if positive { 34.0 } else { 27.0 } + jitter,
                0.2 + jitter / 10.0,
                25.0 + (i % 40) as f64,
            ];
            let label = if positive {
                Label::Positive
            } else {
                Label::Negative
            };
            Sample::new(FeatureVector::new(values).unwrap(), label)
        })
        .collect();
    CSVDataset::from_samples(samples)
}

fn bench_predict(c: &mut Criterion) {
    let session = PipelineBuilder::new()
        .start_with_dataset(&synthetic_dataset(300))
        .unwrap();
    let fields = ["6", "148", "72", "35", "0", "33.6", "0.627", "50"];

    c.bench_function("predict_raw", |b| {
        b.iter(|| session.predict_raw(black_box(&fields)).unwrap())
    });
}

fn bench_fit(c: &mut Criterion) {
    let dataset = synthetic_dataset(300);

    c.bench_function("fit_300", |b| {
        b.iter(|| {
            PipelineBuilder::new()
                .start_with_dataset(black_box(&dataset))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_predict, bench_fit);
criterion_main!(benches);
