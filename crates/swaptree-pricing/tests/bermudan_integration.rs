//! Integration tests for swaptree-pricing.
//!
//! Swaptions are priced on small hand-built lattices whose slice times fall
//! exactly on the swap's reset and payment dates, so exercise boundaries
//! and probabilities can be checked by hand.

use std::sync::Arc;

use approx::assert_relative_eq;
use swaptree_core::curves::{FlatForward, ZeroCurve};
use swaptree_core::daycounts::Act365Fixed;
use swaptree_core::types::{Date, Frequency};
use swaptree_lattice::{HullWhite, Lattice, TabulatedLattice, TimeGrid};
use swaptree_pricing::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Lattice times are whole years from here under ACT/365 until 2028.
fn reference() -> Date {
    date(2025, 1, 1)
}

/// Two annual coupons per leg resetting at 1y and 2y, paying a year later.
fn two_period_swap(swap_type: SwapType, fixed_rate: f64) -> SwapArguments {
    let nominal = 100.0;
    SwapArguments {
        swap_type,
        nominal,
        fixed_rate,
        fixed_reset_dates: vec![date(2026, 1, 1), date(2027, 1, 1)],
        fixed_pay_dates: vec![date(2027, 1, 1), date(2028, 1, 1)],
        fixed_coupons: vec![nominal * fixed_rate; 2],
        floating_reset_dates: vec![date(2026, 1, 1), date(2027, 1, 1)],
        floating_pay_dates: vec![date(2027, 1, 1), date(2028, 1, 1)],
        floating_accrual_times: vec![1.0; 2],
        floating_spreads: vec![0.0; 2],
        floating_coupons: vec![None; 2],
    }
}

/// Trinomial lattice on `[0, 1, 2, 3]` with 1-3-5-7 nodes.
///
/// Node `j` of slice `i` moves to `j`, `j + 1`, `j + 2` with probabilities
/// 1/4, 1/2, 1/4. Its short rate is `0.05 + slope * (j - i)`, so a positive
/// slope orders nodes by increasing rate.
fn trinomial_lattice(slope: f64) -> Arc<dyn Lattice> {
    let grid = TimeGrid::from_times(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    let rates = (0..4)
        .map(|i| {
            (0..2 * i + 1)
                .map(|j| 0.05 + slope * (j as f64 - i as f64))
                .collect()
        })
        .collect();
    let transitions = (0..3)
        .map(|i| {
            (0..2 * i + 1)
                .map(|j| vec![(j, 0.25), (j + 1, 0.5), (j + 2, 0.25)])
                .collect()
        })
        .collect();
    Arc::new(TabulatedLattice::new(grid, rates, transitions).unwrap())
}

fn price_on(
    lattice: Arc<dyn Lattice>,
    args: &SwaptionArguments,
    underlying: UnderlyingKind,
) -> PricingResult<SwaptionResults> {
    let config = TreeEngineConfig::default().with_underlying(underlying);
    TreeSwaptionEngine::with_lattice(lattice, config).calculate(args, reference(), &Act365Fixed)
}

// =============================================================================
// EXERCISE PROBABILITIES
// =============================================================================

#[test]
fn test_two_date_bermudan_probabilities() {
    let lattice = trinomial_lattice(0.01);
    let records = vec![
        ExerciseRecord {
            time: 1.0,
            boundary: Some(ExerciseBoundary {
                node: 1,
                implied_rate: 0.052,
            }),
        },
        ExerciseRecord {
            time: 2.0,
            boundary: None,
        },
    ];
    let calc = CumulativeProbabilityCalculator::new(lattice, 2, records).unwrap();
    let table = calc.table();

    let (probability, marginal) = calc.exercise_probability(0).unwrap();
    assert_relative_eq!(probability, 1.0 - table.cumulative(1, 1), epsilon = 1e-15);
    assert_relative_eq!(marginal, table.marginal(1, 1), epsilon = 1e-15);
    assert_relative_eq!(probability, 0.25, epsilon = 1e-14);
    assert_relative_eq!(marginal, 0.5, epsilon = 1e-14);

    let (probability, marginal) = calc.exercise_probability(1).unwrap();
    assert_eq!(probability, 0.0);
    assert!(marginal.is_nan());
}

#[test]
fn test_unexercised_sweep_conserves_mass() {
    let records = vec![ExerciseRecord {
        time: 3.0,
        boundary: None,
    }];
    let calc = CumulativeProbabilityCalculator::new(trinomial_lattice(0.01), 1, records).unwrap();
    let table = calc.table();
    assert_eq!(table.len(), 4);
    assert_eq!(table.slice(0), &[(1.0, 1.0)]);
    for i in 0..table.len() {
        assert_relative_eq!(table.survival(i), 1.0, epsilon = 1e-14);
    }
}

// =============================================================================
// PRICING ON A GIVEN LATTICE
// =============================================================================

#[test]
fn test_european_out_of_the_money_never_exercised() {
    let swap = two_period_swap(SwapType::Receiver, 0.5);
    let args = SwaptionArguments::new(swap, Exercise::european(date(2026, 1, 1))).unwrap();
    let results = price_on(trinomial_lattice(0.01), &args, UnderlyingKind::CoterminalStrip).unwrap();

    assert_eq!(results.npv, 0.0);
    assert_eq!(results.exercises.len(), 1);
    let report = &results.exercises[0];
    assert!(!report.exercised);
    assert_eq!(report.boundary_node, None);
    assert_eq!(report.probability, 0.0);
    assert!(report.boundary_probability.is_nan());
    assert!(report.boundary_rate.is_nan());

    let map = results
        .additional_results
        .exercise_probability_and_swap_boundary()
        .unwrap();
    let (probability, rate) = map[&date(2026, 1, 1)];
    assert_eq!(probability, 0.0);
    assert!(rate.is_nan());
}

#[test]
fn test_never_exercised_results_read_back_from_json() {
    let swap = two_period_swap(SwapType::Receiver, 0.5);
    let args = SwaptionArguments::new(swap, Exercise::european(date(2026, 1, 1))).unwrap();
    let results = price_on(trinomial_lattice(0.01), &args, UnderlyingKind::CoterminalStrip).unwrap();

    let json = serde_json::to_string(&results).unwrap();
    let back: SwaptionResults = serde_json::from_str(&json).unwrap();

    assert_eq!(back.npv, results.npv);
    assert_eq!(back.exercise_dates(), results.exercise_dates());
    let report = &back.exercises[0];
    assert!(!report.exercised);
    assert_eq!(report.boundary_node, None);
    assert_eq!(report.probability, 0.0);
    assert!(report.boundary_probability.is_nan());
    assert!(report.boundary_rate.is_nan());

    let (probability, rate) = back
        .additional_results
        .exercise_probability_and_swap_boundary()
        .unwrap()[&date(2026, 1, 1)];
    assert_eq!(probability, 0.0);
    assert!(rate.is_nan());
}

#[test]
fn test_single_entry_strip_matches_swap() {
    let swap = two_period_swap(SwapType::Receiver, 0.05);
    let args = SwaptionArguments::new(swap, Exercise::european(date(2026, 1, 1))).unwrap();

    let strip = price_on(trinomial_lattice(0.01), &args, UnderlyingKind::CoterminalStrip).unwrap();
    let single = price_on(trinomial_lattice(0.01), &args, UnderlyingKind::SingleSwap).unwrap();
    assert!(strip.npv > 0.0);
    assert_relative_eq!(strip.npv, single.npv, max_relative = 1e-12);
    assert_eq!(strip.exercises[0].boundary_node, single.exercises[0].boundary_node);
    assert_relative_eq!(
        strip.exercises[0].boundary_rate,
        single.exercises[0].boundary_rate,
        max_relative = 1e-12
    );
}

#[test]
fn test_single_entry_strip_member_matches_swap_values() {
    let swap = two_period_swap(SwapType::Payer, 0.05);
    let lattice = trinomial_lattice(0.01);
    let entry = date(2026, 1, 1);

    let mut strip = CoterminalSwapStrip::new(&swap, reference(), &Act365Fixed, &[entry]).unwrap();
    strip.initialize(Arc::clone(&lattice), 3.0).unwrap();
    strip.rollback(1.0).unwrap();

    let mut single = DiscretizedSwap::new(&swap, reference(), &Act365Fixed, Some(entry)).unwrap();
    single.initialize(lattice, 3.0).unwrap();
    single.rollback(1.0).unwrap();

    let member = strip.swap(0).unwrap();
    assert_eq!(member.values().len(), 3);
    for (a, b) in member.values().iter().zip(single.values()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn test_receiver_boundary_on_ordered_lattice() {
    let swap = two_period_swap(SwapType::Receiver, 0.05);
    let exercise = Exercise::bermudan(vec![date(2026, 1, 1), date(2027, 1, 1)]).unwrap();
    let args = SwaptionArguments::new(swap, exercise).unwrap();
    let results = price_on(trinomial_lattice(0.01), &args, UnderlyingKind::CoterminalStrip).unwrap();

    assert_eq!(results.exercises.len(), 2);
    assert_eq!(results.exercise_dates(), vec![date(2026, 1, 1), date(2027, 1, 1)]);
    // At 2y only the last coupon is left: it pays off above the fixed rate.
    let last = &results.exercises[1];
    assert!(last.exercised);
    let node = last.boundary_node.unwrap();
    assert!(node > 0 && node < 5);
    assert!(last.boundary_rate > 0.0);
    for report in &results.exercises {
        assert!(is_probability(report.probability));
    }
}

#[test]
fn test_inverted_lattice_reports_lowest_exercising_node() {
    // A payer here gains when rates fall, so on an ordered lattice the
    // bottom node exercises and the boundary sits at node 0 even though
    // higher nodes may not exercise.
    let swap = two_period_swap(SwapType::Payer, 0.05);
    let args = SwaptionArguments::new(swap, Exercise::european(date(2026, 1, 1))).unwrap();
    let results = price_on(trinomial_lattice(0.02), &args, UnderlyingKind::CoterminalStrip).unwrap();

    let report = &results.exercises[0];
    assert_eq!(report.boundary_node, Some(0));
    // Survivors are node 0 alone; the rest of the slice counts as exercised.
    assert_relative_eq!(report.probability, 0.75, epsilon = 1e-14);
    assert_relative_eq!(report.boundary_probability, 0.25, epsilon = 1e-14);
    assert!(results.npv > 0.0);
}

#[test]
fn test_past_exercise_dates_excluded() {
    let swap = two_period_swap(SwapType::Receiver, 0.05);
    let exercise = Exercise::bermudan(vec![date(2024, 7, 1), date(2026, 1, 1), date(2027, 1, 1)]).unwrap();
    let args = SwaptionArguments::new(swap, exercise).unwrap();
    let results = price_on(trinomial_lattice(0.01), &args, UnderlyingKind::CoterminalStrip).unwrap();

    assert_eq!(results.exercise_dates(), vec![date(2026, 1, 1), date(2027, 1, 1)]);
    let map = results
        .additional_results
        .exercise_probability_and_swap_boundary()
        .unwrap();
    assert!(!map.contains_key(&date(2024, 7, 1)));
}

#[test]
fn test_exercise_off_lattice_rejected() {
    let swap = two_period_swap(SwapType::Receiver, 0.05);
    let args = SwaptionArguments::new(swap, Exercise::european(date(2026, 7, 1))).unwrap();
    let result = price_on(trinomial_lattice(0.01), &args, UnderlyingKind::CoterminalStrip);
    assert!(matches!(result, Err(PricingError::Lattice(_))));
}

// =============================================================================
// HULL-WHITE END TO END
// =============================================================================

fn hull_white_engine(
    curve: Arc<dyn swaptree_core::curves::DiscountCurve>,
    underlying: UnderlyingKind,
) -> TreeSwaptionEngine {
    TreeSwaptionEngine::new(
        Arc::new(HullWhite::new(0.05, 0.012)),
        curve,
        TreeEngineConfig::default()
            .with_time_steps(60)
            .with_underlying(underlying),
    )
}

fn is_probability(p: f64) -> bool {
    (-1e-12..=1.0 + 1e-12).contains(&p)
}

#[test]
fn test_hull_white_bermudan_dominates_europeans() {
    let reference = date(2025, 3, 17);
    let swap = VanillaSwapBuilder::new()
        .swap_type(SwapType::Receiver)
        .nominal(1_000_000.0)
        .fixed_rate(0.042)
        .start(date(2026, 3, 17))
        .maturity(date(2032, 3, 17))
        .fixed_frequency(Frequency::Annual)
        .floating_frequency(Frequency::SemiAnnual)
        .build()
        .unwrap();
    let curve = Arc::new(
        ZeroCurve::new(vec![0.5, 2.0, 5.0, 10.0], vec![0.035, 0.038, 0.041, 0.043]).unwrap(),
    );
    // A single swap underlying puts every exercise style on the same grid.
    let engine = hull_white_engine(curve, UnderlyingKind::SingleSwap);

    let bermudan = SwaptionArguments::new(
        swap.clone(),
        Exercise::bermudan(swap.fixed_reset_dates.clone()).unwrap(),
    )
    .unwrap();
    let results = engine.calculate(&bermudan, reference, &Act365Fixed).unwrap();
    assert_eq!(results.exercises.len(), 6);
    for report in &results.exercises {
        assert!(is_probability(report.probability));
        if report.exercised {
            assert!(report.boundary_rate.is_finite());
        }
    }

    for date in &swap.fixed_reset_dates {
        let european = SwaptionArguments::new(swap.clone(), Exercise::european(*date)).unwrap();
        let e = engine.calculate(&european, reference, &Act365Fixed).unwrap();
        assert!(results.npv >= e.npv - 1e-8, "bermudan {} < european {}", results.npv, e.npv);
    }
}

#[test]
fn test_hull_white_results_serialize() {
    let swap = VanillaSwapBuilder::new()
        .fixed_rate(0.04)
        .start(date(2026, 1, 1))
        .maturity(date(2029, 1, 1))
        .build()
        .unwrap();
    let args = SwaptionArguments::new(
        swap.clone(),
        Exercise::bermudan(swap.fixed_reset_dates.clone()).unwrap(),
    )
    .unwrap();
    let results = hull_white_engine(Arc::new(FlatForward::new(0.04)), UnderlyingKind::CoterminalStrip)
        .calculate(&args, reference(), &Act365Fixed)
        .unwrap();

    let json = serde_json::to_value(&results.additional_results).unwrap();
    let map = json[EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY].as_object().unwrap();
    assert_eq!(map.len(), 3);
    assert!(map.contains_key("2026-01-01"));
    assert!(json[NPV].as_f64().is_some());
}
