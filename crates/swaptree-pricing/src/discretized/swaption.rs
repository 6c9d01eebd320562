//! Swaption as a discretized option on a swap or coterminal strip.
//!
//! With time running backward, the exercise decision at a date is taken
//! after the underlying is pre-adjusted and before it is post-adjusted:
//! going forward, coupons are settled first and only then can the option be
//! exercised.
//!
//! At each exercise date every node keeps `max(continuation, intrinsic)`.
//! The first node (lowest index) where exercising beats continuing is
//! recorded as the exercise boundary. Nodes are ordered by short rate, so
//! for a monotone margin every node above the boundary also exercises.
//! Boundary reporting relies on that ordering; the option value does not.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use swaptree_core::daycounts::DayCount;
use swaptree_core::types::Date;
use swaptree_lattice::{AssetState, DiscretizedAsset, LatticeError};

use super::legs::sorted_times;
use super::strip::CoterminalSwapStrip;
use super::swap::DiscretizedSwap;
use super::underlying::SwaptionUnderlying;
use crate::config::{TreeEngineConfig, UnderlyingKind};
use crate::error::{PricingError, PricingResult};
use crate::instruments::{ExerciseType, SwapArguments, SwaptionArguments};

/// Where exercise starts on an exercise date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseBoundary {
    /// First node at which exercising beats continuing.
    pub node: usize,
    /// Par rate of the exercised swap at that node.
    pub implied_rate: f64,
}

/// Outcome of the exercise test on one exercise date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Lattice time of the exercise date.
    pub time: f64,
    /// Boundary, if any node exercised.
    pub boundary: Option<ExerciseBoundary>,
}

impl ExerciseRecord {
    /// True if some node exercised.
    #[must_use]
    pub fn exercised(&self) -> bool {
        self.boundary.is_some()
    }

    /// Boundary node, if exercised.
    #[must_use]
    pub fn boundary_node(&self) -> Option<usize> {
        self.boundary.map(|b| b.node)
    }

    /// Implied swap rate at the boundary, NaN if never exercised.
    #[must_use]
    pub fn implied_rate(&self) -> f64 {
        self.boundary.map_or(f64::NAN, |b| b.implied_rate)
    }
}

/// A European or Bermudan swaption on a lattice.
#[derive(Debug, Clone)]
pub struct DiscretizedSwaption {
    state: AssetState,
    underlying: SwaptionUnderlying,
    exercise_type: ExerciseType,
    exercise_dates: Vec<Date>,
    exercise_times: Vec<f64>,
    last_payment: f64,
    swap: SwapArguments,
    /// Collected back to front during the sweep.
    records: Vec<ExerciseRecord>,
}

impl DiscretizedSwaption {
    /// Builds the swaption and its underlying.
    ///
    /// Swap dates close to an exercise date are moved onto it first (see
    /// [`collapse_dates`]).
    ///
    /// # Errors
    ///
    /// Fails for American exercise, inconsistent swap arguments, or an
    /// exercise date after the last payment.
    pub fn new(
        args: &SwaptionArguments,
        reference_date: Date,
        day_count: &dyn DayCount,
        config: &TreeEngineConfig,
    ) -> PricingResult<Self> {
        let exercise_type = args.exercise.exercise_type();
        if !matches!(exercise_type, ExerciseType::European | ExerciseType::Bermudan) {
            return Err(PricingError::UnsupportedExercise {
                exercise: exercise_type.to_string(),
            });
        }
        args.swap.validate()?;

        let exercise_dates = args.exercise.dates().to_vec();
        let exercise_times = exercise_dates
            .iter()
            .map(|d| day_count.year_fraction_f64(reference_date, *d))
            .collect();

        let mut swap = args.swap.clone();
        collapse_dates(&mut swap, &exercise_dates, reference_date, config.collapse_window_days);

        let (last_fixed, last_floating) = swap.last_payment_dates()?;
        let last_payment_date = last_fixed.max(last_floating);
        if let Some(late) = exercise_dates.iter().find(|d| **d > last_payment_date) {
            return Err(PricingError::invalid_arguments(format!(
                "exercise date {late} is after the last payment on {last_payment_date}"
            )));
        }
        let last_payment = day_count
            .year_fraction_f64(reference_date, last_fixed)
            .max(day_count.year_fraction_f64(reference_date, last_floating));

        let underlying = match config.underlying {
            UnderlyingKind::CoterminalStrip => SwaptionUnderlying::Strip(CoterminalSwapStrip::new(
                &swap,
                reference_date,
                day_count,
                &exercise_dates,
            )?),
            UnderlyingKind::SingleSwap => {
                SwaptionUnderlying::Swap(DiscretizedSwap::new(&swap, reference_date, day_count, None)?)
            }
        };

        Ok(Self {
            state: AssetState::new(),
            underlying,
            exercise_type,
            exercise_dates,
            exercise_times,
            last_payment,
            swap,
            records: Vec::new(),
        })
    }

    /// The underlying asset.
    #[must_use]
    pub fn underlying(&self) -> &SwaptionUnderlying {
        &self.underlying
    }

    /// Exercise style.
    #[must_use]
    pub fn exercise_type(&self) -> ExerciseType {
        self.exercise_type
    }

    /// All exercise dates, past ones included.
    #[must_use]
    pub fn exercise_dates(&self) -> &[Date] {
        &self.exercise_dates
    }

    /// Lattice times of all exercise dates; past dates are negative.
    #[must_use]
    pub fn exercise_times(&self) -> &[f64] {
        &self.exercise_times
    }

    /// Exercise times on or after the reference date.
    #[must_use]
    pub fn positive_exercise_times(&self) -> Vec<f64> {
        self.exercise_times.iter().copied().filter(|t| *t >= 0.0).collect()
    }

    /// Exercise dates on or after the reference date.
    #[must_use]
    pub fn positive_exercise_dates(&self) -> Vec<Date> {
        self.exercise_dates
            .iter()
            .zip(&self.exercise_times)
            .filter(|(_, t)| **t >= 0.0)
            .map(|(d, _)| *d)
            .collect()
    }

    /// Time of the last fixed or floating payment.
    #[must_use]
    pub fn last_payment(&self) -> f64 {
        self.last_payment
    }

    /// Swap schedule after date collapsing.
    #[must_use]
    pub fn swap_arguments(&self) -> &SwapArguments {
        &self.swap
    }

    /// Exercise records in exercise-date order, earliest first.
    ///
    /// Empty until the swaption has been rolled back past its exercise dates.
    #[must_use]
    pub fn exercise_records(&self) -> Vec<ExerciseRecord> {
        self.records.iter().rev().copied().collect()
    }

    fn apply_exercise_condition(&mut self, index: usize, time: f64) -> PricingResult<ExerciseRecord> {
        let swap = self.underlying.exercise_swap(index)?;
        let intrinsic = swap.values();
        let values = self.state.values_mut();
        if intrinsic.len() != values.len() {
            return Err(LatticeError::SizeMismatch {
                slice: index,
                expected: values.len(),
                actual: intrinsic.len(),
            }
            .into());
        }

        let mut boundary = None;
        for (node, (value, exercise)) in values.iter_mut().zip(intrinsic).enumerate() {
            if boundary.is_none() && exercise - *value > 0.0 {
                boundary = Some(node);
            }
            *value = value.max(*exercise);
        }

        let boundary = boundary.map(|node| ExerciseBoundary {
            node,
            implied_rate: swap.implied_swap_rate(node),
        });
        match boundary {
            Some(b) => debug!(
                "exercise date {index} (t = {time:.4}): boundary at node {} of {}, implied rate {:.6}",
                b.node,
                intrinsic.len(),
                b.implied_rate
            ),
            None => debug!("exercise date {index} (t = {time:.4}): never exercised"),
        }
        Ok(ExerciseRecord { time, boundary })
    }
}

impl DiscretizedAsset for DiscretizedSwaption {
    type Error = PricingError;

    fn state(&self) -> &AssetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AssetState {
        &mut self.state
    }

    fn reset(&mut self, size: usize) -> PricingResult<()> {
        let lattice = std::sync::Arc::clone(self.lattice()?);
        self.underlying.initialize(lattice, self.last_payment)?;
        if !self.state.shares_lattice_with(self.underlying.state()) {
            return Err(PricingError::LatticeMismatch);
        }
        self.state.set_values(vec![0.0; size]);
        self.records.clear();
        self.adjust_values()
    }

    fn mandatory_times(&self) -> Vec<f64> {
        let mut times = self.underlying.mandatory_times();
        times.extend(self.exercise_times.iter().filter(|t| **t >= 0.0));
        sorted_times(times)
    }

    fn post_adjust_values_impl(&mut self) -> PricingResult<()> {
        let time = self.time();
        self.underlying.partial_rollback(time)?;
        self.underlying.pre_adjust_values()?;

        let mut on_slice = Vec::new();
        for i in 0..self.exercise_times.len() {
            let t = self.exercise_times[i];
            if t >= 0.0 && self.is_on_time(t) {
                on_slice.push(self.apply_exercise_condition(i, t)?);
            }
        }
        if !on_slice.is_empty() {
            trace!("{} exercise date(s) at t = {time:.4}", on_slice.len());
        }
        // Stored back to front; reversed again by `exercise_records`.
        self.records.extend(on_slice.into_iter().rev());

        self.underlying.post_adjust_values()
    }
}

/// Moves swap dates lying within `window_days` of an exercise date onto it.
///
/// For every exercise date:
/// - a fixed payment in the following window whose coupon reset before
///   `reference_date` is paid on the exercise date
/// - fixed and floating resets in the preceding window reset on the
///   exercise date
pub fn collapse_dates(
    swap: &mut SwapArguments,
    exercise_dates: &[Date],
    reference_date: Date,
    window_days: i64,
) {
    let within_next = |d1: Date, d2: Date| d2 >= d1 && d2 <= d1 + window_days;
    let within_previous = |d1: Date, d2: Date| d2 >= d1 - window_days && d2 <= d1;

    for &exercise in exercise_dates {
        for (pay, reset) in swap.fixed_pay_dates.iter_mut().zip(&swap.fixed_reset_dates) {
            if within_next(exercise, *pay) && *reset < reference_date {
                *pay = exercise;
            }
        }
        for reset in swap
            .fixed_reset_dates
            .iter_mut()
            .chain(swap.floating_reset_dates.iter_mut())
        {
            if within_previous(exercise, *reset) {
                *reset = exercise;
            }
        }
    }
}
