//! Benchmarks for Bermudan swaption pricing.
//!
//! Run with: cargo bench -p swaptree-pricing

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use swaptree_core::curves::{DiscountCurve, ZeroCurve};
use swaptree_core::daycounts::Act365Fixed;
use swaptree_core::types::{Date, Frequency};
use swaptree_lattice::HullWhite;
use swaptree_pricing::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn reference() -> Date {
    Date::from_ymd(2025, 6, 16).unwrap()
}

fn create_curve() -> Arc<dyn DiscountCurve> {
    Arc::new(
        ZeroCurve::new(
            vec![0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0],
            vec![0.030, 0.032, 0.035, 0.038, 0.042, 0.045, 0.047],
        )
        .unwrap(),
    )
}

/// Bermudan exercisable annually into a swap ending `years` after its start.
fn create_swaption(years: i32) -> SwaptionArguments {
    let start = Date::from_ymd(2026, 6, 16).unwrap();
    let swap = VanillaSwapBuilder::new()
        .swap_type(SwapType::Receiver)
        .nominal(10_000_000.0)
        .fixed_rate(0.04)
        .start(start)
        .maturity(start.add_years(years).unwrap())
        .fixed_frequency(Frequency::Annual)
        .floating_frequency(Frequency::SemiAnnual)
        .build()
        .unwrap();
    let exercise = Exercise::bermudan(swap.fixed_reset_dates.clone()).unwrap();
    SwaptionArguments::new(swap, exercise).unwrap()
}

fn create_engine(steps: usize, underlying: UnderlyingKind) -> TreeSwaptionEngine {
    TreeSwaptionEngine::new(
        Arc::new(HullWhite::default_params()),
        create_curve(),
        TreeEngineConfig::default()
            .with_time_steps(steps)
            .with_underlying(underlying),
    )
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_time_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("bermudan_time_steps");
    let swaption = create_swaption(10);

    for steps in [50, 100, 200, 400] {
        let engine = create_engine(steps, UnderlyingKind::CoterminalStrip);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, _| {
            b.iter(|| {
                engine
                    .calculate(black_box(&swaption), reference(), &Act365Fixed)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_underlying(c: &mut Criterion) {
    let mut group = c.benchmark_group("bermudan_underlying");
    let swaption = create_swaption(10);

    for (name, kind) in [
        ("coterminal_strip", UnderlyingKind::CoterminalStrip),
        ("single_swap", UnderlyingKind::SingleSwap),
    ] {
        let engine = create_engine(100, kind);
        group.bench_function(name, |b| {
            b.iter(|| {
                engine
                    .calculate(black_box(&swaption), reference(), &Act365Fixed)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_maturity(c: &mut Criterion) {
    let mut group = c.benchmark_group("bermudan_maturity");
    let engine = create_engine(100, UnderlyingKind::CoterminalStrip);

    for years in [5, 10, 20] {
        let swaption = create_swaption(years);
        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, _| {
            b.iter(|| {
                engine
                    .calculate(black_box(&swaption), reference(), &Act365Fixed)
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(pricing, bench_time_steps, bench_underlying, bench_maturity);

criterion_main!(pricing);
