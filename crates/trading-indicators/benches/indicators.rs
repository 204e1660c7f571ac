//! Benchmarks for the EMA implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trading_core::traits::{Indicator, StreamingIndicator};
use trading_indicators::{Ema, IndicatorEngine, StreamingEma};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("batch", size), &data, |b, data| {
            let ema = Ema::new(64);
            b.iter(|| ema.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("streaming", size), &data, |b, data| {
            b.iter(|| {
                let mut ema = StreamingEma::new(64);
                for &x in data {
                    black_box(ema.update(x));
                }
            })
        });
    }

    group.finish();
}

fn benchmark_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("IndicatorEngine");

    for size in [10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("64/256", size), &data, |b, data| {
            b.iter(|| {
                let mut engine = IndicatorEngine::new(64, 256).expect("valid periods");
                for &x in data {
                    engine.update(x);
                    black_box(engine.readings());
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_ema, benchmark_engine);
criterion_main!(benches);
