//! Tree engine for European and Bermudan swaptions.
//!
//! A pricing run is two sequential passes over one lattice:
//!
//! 1. backward: the swaption is rolled back from its last payment to time
//!    zero, taking the exercise decision and writing one exercise record per
//!    exercise date
//! 2. forward: the probability calculator replays the records from the
//!    root to get exercise probabilities
//!
//! Results are published under [`EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY`]
//! and [`NPV`] in [`AdditionalResults`].

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use swaptree_core::curves::DiscountCurve;
use swaptree_core::daycounts::DayCount;
use swaptree_core::types::Date;
use swaptree_lattice::{DiscretizedAsset, Lattice, LatticeError, ShortRateModel, TimeGrid};

use crate::config::{TreeEngineConfig, Validate};
use crate::discretized::DiscretizedSwaption;
use crate::error::{PricingError, PricingResult};
use crate::instruments::SwaptionArguments;
use crate::probability::CumulativeProbabilityCalculator;
use crate::results::{
    deserialize_nan_or_f64, AdditionalResults, ResultValue, EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY, NPV,
};

/// Exercise statistics of one exercise date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseReport {
    /// Exercise date.
    pub date: Date,
    /// Lattice time of the date.
    pub time: f64,
    /// Whether any node exercised.
    pub exercised: bool,
    /// First exercising node, if any.
    pub boundary_node: Option<usize>,
    /// Probability of having exercised by this date; zero if never exercised.
    pub probability: f64,
    /// Probability of sitting on the boundary node; NaN if never exercised.
    #[serde(deserialize_with = "deserialize_nan_or_f64")]
    pub boundary_probability: f64,
    /// Implied swap rate at the boundary; NaN if never exercised.
    #[serde(deserialize_with = "deserialize_nan_or_f64")]
    pub boundary_rate: f64,
}

/// Output of a tree swaption pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaptionResults {
    /// Option value.
    pub npv: f64,
    /// Per exercise date on or after the reference date, earliest first.
    pub exercises: Vec<ExerciseReport>,
    /// Named results.
    pub additional_results: AdditionalResults,
}

impl SwaptionResults {
    /// Priced exercise dates.
    #[must_use]
    pub fn exercise_dates(&self) -> Vec<Date> {
        self.exercises.iter().map(|e| e.date).collect()
    }

    /// Exercise probability per priced exercise date.
    #[must_use]
    pub fn exercise_probabilities(&self) -> Vec<f64> {
        self.exercises.iter().map(|e| e.probability).collect()
    }

    /// Boundary swap rate per priced exercise date.
    #[must_use]
    pub fn swap_boundaries(&self) -> Vec<f64> {
        self.exercises.iter().map(|e| e.boundary_rate).collect()
    }
}

/// Where the engine gets its lattice from.
#[derive(Debug, Clone)]
enum LatticeSource {
    /// Built per pricing on a grid holding the swaption's mandatory times.
    Model {
        model: Arc<dyn ShortRateModel>,
        curve: Arc<dyn DiscountCurve>,
    },
    /// Supplied ready-made; must contain every mandatory time.
    Fixed(Arc<dyn Lattice>),
}

/// Prices swaptions by backward induction on a short-rate lattice.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use swaptree_core::curves::FlatForward;
/// use swaptree_core::daycounts::Act365Fixed;
/// use swaptree_core::types::{Date, Frequency};
/// use swaptree_lattice::HullWhite;
/// use swaptree_pricing::prelude::*;
///
/// let reference = Date::from_ymd(2025, 1, 15).unwrap();
/// let swap = VanillaSwapBuilder::new()
///     .fixed_rate(0.04)
///     .start(Date::from_ymd(2026, 1, 15).unwrap())
///     .maturity(Date::from_ymd(2030, 1, 15).unwrap())
///     .floating_frequency(Frequency::Annual)
///     .build()
///     .unwrap();
/// let exercise = Exercise::bermudan(swap.fixed_reset_dates.clone()).unwrap();
/// let swaption = SwaptionArguments::new(swap, exercise).unwrap();
///
/// let engine = TreeSwaptionEngine::new(
///     Arc::new(HullWhite::new(0.05, 0.01)),
///     Arc::new(FlatForward::new(0.04)),
///     TreeEngineConfig::default().with_time_steps(40),
/// );
/// let results = engine.calculate(&swaption, reference, &Act365Fixed).unwrap();
/// assert!(results.npv > 0.0);
/// assert_eq!(results.exercises.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TreeSwaptionEngine {
    source: LatticeSource,
    config: TreeEngineConfig,
}

impl TreeSwaptionEngine {
    /// Engine building a `model` tree fitted to `curve` for each swaption.
    #[must_use]
    pub fn new(
        model: Arc<dyn ShortRateModel>,
        curve: Arc<dyn DiscountCurve>,
        config: TreeEngineConfig,
    ) -> Self {
        Self {
            source: LatticeSource::Model { model, curve },
            config,
        }
    }

    /// Engine pricing on a supplied lattice.
    #[must_use]
    pub fn with_lattice(lattice: Arc<dyn Lattice>, config: TreeEngineConfig) -> Self {
        Self {
            source: LatticeSource::Fixed(lattice),
            config,
        }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &TreeEngineConfig {
        &self.config
    }

    /// Prices `args` as seen from `reference_date`, with lattice times
    /// measured by `day_count`.
    pub fn calculate(
        &self,
        args: &SwaptionArguments,
        reference_date: Date,
        day_count: &dyn DayCount,
    ) -> PricingResult<SwaptionResults> {
        self.config.validate_or_error()?;

        let mut swaption = DiscretizedSwaption::new(args, reference_date, day_count, &self.config)?;
        let positive_dates = swaption.positive_exercise_dates();
        let positive_times = swaption.positive_exercise_times();
        let Some(&next_exercise) = positive_times.first() else {
            return Err(PricingError::invalid_arguments(format!(
                "every exercise date is before the reference date {reference_date}"
            )));
        };

        let mandatory = swaption.mandatory_times();
        let lattice = self.lattice_for(&mandatory)?;
        debug!(
            "pricing {} swaption on {} slices, {} exercise dates ahead",
            args.exercise.exercise_type(),
            lattice.time_grid().size(),
            positive_times.len()
        );

        let last_payment = swaption.last_payment();
        swaption
            .initialize(Arc::clone(&lattice), last_payment)
            .map_err(|e| match e {
                PricingError::Lattice(LatticeError::TimeNotOnGrid { time, closest }) => {
                    PricingError::missing_final_payment(format!(
                        "last payment time {time} is not on the lattice (closest {closest})"
                    ))
                }
                other => other,
            })?;
        swaption.rollback(next_exercise)?;
        let npv = swaption.present_value()?;

        let records = swaption.exercise_records();
        if records.len() != positive_times.len() {
            return Err(PricingError::ExerciseCountMismatch {
                dates: positive_times.len(),
                records: records.len(),
            });
        }
        let calculator = CumulativeProbabilityCalculator::from_swaption(&swaption)?;

        let mut exercises = Vec::with_capacity(records.len());
        let mut published = BTreeMap::new();
        for (i, (record, date)) in records.iter().zip(positive_dates).enumerate() {
            let (probability, boundary_probability) = calculator.exercise_probability(i)?;
            published.insert(date, (probability, record.implied_rate()));
            exercises.push(ExerciseReport {
                date,
                time: record.time,
                exercised: record.exercised(),
                boundary_node: record.boundary_node(),
                probability,
                boundary_probability,
                boundary_rate: record.implied_rate(),
            });
        }

        let mut additional_results = AdditionalResults::new();
        additional_results.insert(NPV, ResultValue::Real(npv));
        additional_results.insert(
            EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY,
            ResultValue::DatedPairs(published),
        );

        info!(
            "swaption priced: npv {npv:.6}, {} of {} exercise dates exercised",
            exercises.iter().filter(|e| e.exercised).count(),
            exercises.len()
        );

        Ok(SwaptionResults {
            npv,
            exercises,
            additional_results,
        })
    }

    fn lattice_for(&self, mandatory: &[f64]) -> PricingResult<Arc<dyn Lattice>> {
        match &self.source {
            LatticeSource::Model { model, curve } => {
                let grid = TimeGrid::with_mandatory_times(mandatory, self.config.time_steps)?;
                debug!("{} tree on {} grid times", model.name(), grid.size());
                Ok(model.build_tree(curve.as_ref(), &grid)?)
            }
            LatticeSource::Fixed(lattice) => {
                for t in mandatory {
                    lattice.time_grid().index(*t)?;
                }
                Ok(Arc::clone(lattice))
            }
        }
    }
}
