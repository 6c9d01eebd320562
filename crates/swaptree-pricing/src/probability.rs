//! Exercise probabilities by a forward sweep over the lattice.
//!
//! Once a swaption has been priced, its exercise records say where exercise
//! starts on each exercise date. Probability mass is pushed forward from
//! the root through the lattice's transition probabilities. On an exercised
//! date only nodes up to and including the boundary keep their mass; mass
//! flowing above the boundary has exercised and leaves the survivors.

use std::sync::Arc;

use log::debug;
use swaptree_lattice::{DiscretizedAsset, Lattice};

use crate::discretized::{DiscretizedSwaption, ExerciseRecord};
use crate::error::{PricingError, PricingResult};

/// Per slice, `(cumulative, marginal)` probability of each surviving node.
///
/// Marginal is the probability of reaching the node without having
/// exercised; cumulative is the running sum of marginals from node 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CumulativeProbabilityTable {
    slices: Vec<Vec<(f64, f64)>>,
}

impl CumulativeProbabilityTable {
    /// Number of slices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// True if the table has no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Surviving nodes of slice `i`.
    #[must_use]
    pub fn slice(&self, i: usize) -> &[(f64, f64)] {
        &self.slices[i]
    }

    /// Cumulative probability at `node` of slice `i`.
    #[must_use]
    pub fn cumulative(&self, i: usize, node: usize) -> f64 {
        self.slices[i][node].0
    }

    /// Marginal probability at `node` of slice `i`.
    #[must_use]
    pub fn marginal(&self, i: usize, node: usize) -> f64 {
        self.slices[i][node].1
    }

    /// Total surviving probability at slice `i`.
    #[must_use]
    pub fn survival(&self, i: usize) -> f64 {
        self.slices[i].last().map_or(0.0, |(cumulative, _)| *cumulative)
    }
}

/// Forward sweep producing exercise probabilities from exercise records.
#[derive(Debug, Clone)]
pub struct CumulativeProbabilityCalculator {
    lattice: Arc<dyn Lattice>,
    records: Vec<ExerciseRecord>,
    record_slices: Vec<usize>,
    table: CumulativeProbabilityTable,
}

impl CumulativeProbabilityCalculator {
    /// Runs the sweep for `records`, given in exercise-date order.
    ///
    /// `exercise_date_count` counts every exercise date of the option, past
    /// ones included; records only exist for dates on or after the
    /// reference date.
    ///
    /// # Errors
    ///
    /// - `NotPriced` if `records` is empty
    /// - `ExerciseCountMismatch` if there are more records than dates
    /// - a lattice error if a record time is not on the lattice grid
    pub fn new(
        lattice: Arc<dyn Lattice>,
        exercise_date_count: usize,
        records: Vec<ExerciseRecord>,
    ) -> PricingResult<Self> {
        if records.is_empty() {
            return Err(PricingError::NotPriced);
        }
        if exercise_date_count < records.len() {
            return Err(PricingError::ExerciseCountMismatch {
                dates: exercise_date_count,
                records: records.len(),
            });
        }

        let grid = lattice.time_grid();
        let record_slices = records
            .iter()
            .map(|r| grid.index(r.time))
            .collect::<Result<Vec<_>, _>>()?;

        let mut limits: Vec<usize> = (0..grid.size()).map(|i| lattice.size(i)).collect();
        for (record, &slice) in records.iter().zip(&record_slices) {
            if let Some(node) = record.boundary_node() {
                limits[slice] = limits[slice].min(node + 1);
            }
        }

        let table = sweep(lattice.as_ref(), &limits);
        debug!(
            "probability sweep over {} slices, {} of {} exercise dates exercised",
            table.len(),
            records.iter().filter(|r| r.exercised()).count(),
            records.len()
        );

        Ok(Self {
            lattice,
            records,
            record_slices,
            table,
        })
    }

    /// Runs the sweep on the lattice and records of a priced swaption.
    pub fn from_swaption(swaption: &DiscretizedSwaption) -> PricingResult<Self> {
        let lattice = Arc::clone(swaption.lattice()?);
        Self::new(
            lattice,
            swaption.exercise_dates().len(),
            swaption.exercise_records(),
        )
    }

    /// The lattice swept over.
    #[must_use]
    pub fn lattice(&self) -> &Arc<dyn Lattice> {
        &self.lattice
    }

    /// The probability table.
    #[must_use]
    pub fn table(&self) -> &CumulativeProbabilityTable {
        &self.table
    }

    /// Exercise records, earliest first.
    #[must_use]
    pub fn records(&self) -> &[ExerciseRecord] {
        &self.records
    }

    /// Probability pair of the `index`-th priced exercise date.
    ///
    /// For an exercised date this is `(1 - cumulative, marginal)` at the
    /// boundary node of the exercise slice: the probability of having
    /// exercised by then, and of sitting exactly on the boundary. A date
    /// never exercised gives `(0, NaN)`.
    pub fn exercise_probability(&self, index: usize) -> PricingResult<(f64, f64)> {
        let record = self
            .records
            .get(index)
            .ok_or(PricingError::ExerciseIndexOutOfRange {
                index,
                count: self.records.len(),
            })?;
        let Some(node) = record.boundary_node() else {
            return Ok((0.0, f64::NAN));
        };
        let column = self.table.slice(self.record_slices[index]);
        // Another record on the same slice may have cut survivors lower.
        let node = node.min(column.len() - 1);
        let (cumulative, marginal) = column[node];
        Ok((1.0 - cumulative, marginal))
    }

    /// Probability pairs of every priced exercise date, earliest first.
    #[must_use]
    pub fn exercise_probabilities(&self) -> Vec<(f64, f64)> {
        (0..self.records.len())
            .filter_map(|i| self.exercise_probability(i).ok())
            .collect()
    }
}

/// Pushes probability forward, keeping `limits[i]` nodes on slice `i`.
fn sweep(lattice: &dyn Lattice, limits: &[usize]) -> CumulativeProbabilityTable {
    let mut slices = Vec::with_capacity(limits.len());
    slices.push(vec![(1.0, 1.0)]);

    for i in 1..limits.len() {
        let limit = limits[i];
        let mut marginals = vec![0.0; limit];
        for (j, &(_, parent)) in slices[i - 1].iter().enumerate() {
            for branch in 0..lattice.branches() {
                let d = lattice.descendant(i - 1, j, branch);
                if d < limit {
                    marginals[d] += parent * lattice.probability(i - 1, j, branch);
                }
            }
        }

        let mut cumulative = 0.0;
        let column = marginals
            .into_iter()
            .map(|m| {
                cumulative += m;
                (cumulative, m)
            })
            .collect();
        slices.push(column);
    }

    CumulativeProbabilityTable { slices }
}
