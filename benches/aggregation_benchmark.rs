//! Benchmark of the grouped aggregations over synthetic manifests
//!
//! Run with: cargo bench --bench aggregation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use manifest_survival::pipeline::{
    fare_summary, median_by_two_keys, run_survey, survival_rate_by_group, GroupKey, Manifest,
    OutlierPolicy,
};
use manifest_survival::AnalysisConfig;

/// Generate a manifest with roughly the Titanic's mix of classes, ports and cabins
fn generate_manifest(n_rows: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let pclass: Vec<i64> = (0..n_rows)
        .map(|_| match rng.gen::<f64>() {
            v if v < 0.24 => 1,
            v if v < 0.45 => 2,
            _ => 3,
        })
        .collect();

    let sex: Vec<&str> = (0..n_rows)
        .map(|_| if rng.gen::<f64>() < 0.65 { "male" } else { "female" })
        .collect();

    let survived: Vec<i64> = sex
        .iter()
        .zip(&pclass)
        .map(|(sex, class)| {
            let base = if *sex == "female" { 0.75 } else { 0.2 };
            let chance = base - 0.1 * (*class as f64 - 1.0);
            i64::from(rng.gen::<f64>() < chance)
        })
        .collect();

    // One in five ages missing, a few estimated as xx.5
    let age: Vec<Option<f64>> = (0..n_rows)
        .map(|_| {
            if rng.gen::<f64>() < 0.2 {
                None
            } else {
                let years = rng.gen_range(0..80) as f64;
                Some(if rng.gen::<f64>() < 0.05 { years + 0.5 } else { years })
            }
        })
        .collect();

    // Mostly third-class fares with a long right tail
    let fare: Vec<f64> = pclass
        .iter()
        .map(|class| {
            let scale = match class {
                1 => 80.0,
                2 => 20.0,
                _ => 10.0,
            };
            let v = rng.gen::<f64>();
            scale * (0.5 + v * v * 3.0)
        })
        .collect();

    let cabin: Vec<Option<String>> = pclass
        .iter()
        .map(|class| {
            if *class == 1 && rng.gen::<f64>() < 0.8 {
                let deck = ['A', 'B', 'C', 'D', 'E'][rng.gen_range(0..5)];
                Some(format!("{}{}", deck, rng.gen_range(1..150)))
            } else {
                None
            }
        })
        .collect();

    let embarked: Vec<Option<&str>> = (0..n_rows)
        .map(|_| match rng.gen::<f64>() {
            v if v < 0.002 => None,
            v if v < 0.72 => Some("S"),
            v if v < 0.91 => Some("C"),
            _ => Some("Q"),
        })
        .collect();

    df! {
        "Survived" => survived,
        "Pclass" => pclass,
        "Sex" => sex,
        "Age" => age,
        "Cabin" => cabin,
        "Fare" => fare,
        "Embarked" => embarked,
    }
    .expect("Failed to create DataFrame")
}

/// Survival rates per grouping key for growing manifests
fn benchmark_survival_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("survival_rates");

    for n_rows in [1_000, 10_000, 100_000] {
        let df = generate_manifest(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        for key in [GroupKey::Sex, GroupKey::Deck, GroupKey::AgeGroup] {
            group.bench_with_input(BenchmarkId::new(key.to_string(), n_rows), &df, |b, df| {
                b.iter(|| {
                    let manifest = Manifest::new(df);
                    let _ = survival_rate_by_group(black_box(&manifest), black_box(&key));
                });
            });
        }
    }

    group.finish();
}

/// Fence vs percentile outlier policies
fn benchmark_fare_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("fare_summary");
    let df = generate_manifest(50_000, 7);
    group.throughput(Throughput::Elements(df.height() as u64));

    for policy in [
        OutlierPolicy::box_plot_fences(),
        OutlierPolicy::percentile_cutoff(),
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy.to_string()),
            &df,
            |b, df| {
                b.iter(|| {
                    let manifest = Manifest::new(df);
                    let _ = fare_summary(
                        black_box(&manifest),
                        black_box(&GroupKey::PassengerClass),
                        black_box(policy),
                    );
                });
            },
        );
    }

    group.bench_function("median_grid", |b| {
        b.iter(|| {
            let manifest = Manifest::new(&df);
            let _ = median_by_two_keys(
                black_box(&manifest),
                black_box(&GroupKey::Embarked),
                black_box(&GroupKey::PassengerClass),
                black_box("Fare"),
            );
        });
    });

    group.finish();
}

/// The whole standard survey
fn benchmark_survey(c: &mut Criterion) {
    let mut group = c.benchmark_group("survey");
    group.sample_size(20);
    let config = AnalysisConfig::default();

    for n_rows in [891, 10_000] {
        let df = generate_manifest(n_rows, 1912);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| {
                let manifest = Manifest::new(df);
                let _ = run_survey(black_box(&manifest), black_box(&config));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_survival_rates,
    benchmark_fare_summary,
    benchmark_survey
);
criterion_main!(benches);
