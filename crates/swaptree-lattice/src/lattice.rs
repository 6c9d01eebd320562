//! The lattice abstraction.
//!
//! A lattice is a recombining tree on a [`TimeGrid`]. Slice `i` holds
//! `size(i)` nodes ordered by the underlying state variable: node 0 has the
//! lowest short rate. Each node of slice `i` branches into `branches()`
//! descendants of slice `i + 1`, each with a transition probability, and
//! carries a one-period discount factor.

use std::fmt;

use crate::time_grid::TimeGrid;

/// A recombining short-rate lattice.
///
/// Implementations are read-only once built and are shared between assets
/// through `Arc<dyn Lattice>`.
pub trait Lattice: Send + Sync + fmt::Debug {
    /// The time grid of the lattice.
    fn time_grid(&self) -> &TimeGrid;

    /// Number of nodes at slice `i`.
    fn size(&self, i: usize) -> usize;

    /// Number of branches out of every node.
    fn branches(&self) -> usize;

    /// Node of slice `i + 1` reached from node `index` of slice `i` by `branch`.
    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize;

    /// Probability of `branch` out of node `index` of slice `i`.
    fn probability(&self, i: usize, index: usize, branch: usize) -> f64;

    /// One-period discount factor from slice `i` to `i + 1` at node `index`.
    fn discount(&self, i: usize, index: usize) -> f64;

    /// Short rate at node `index` of slice `i`.
    fn short_rate(&self, i: usize, index: usize) -> f64;

    /// Expected discounted values on slice `i` given values on slice `i + 1`.
    fn step_back(&self, i: usize, values: &[f64]) -> Vec<f64> {
        let node_value = |j: usize| {
            let expected: f64 = (0..self.branches())
                .map(|b| self.probability(i, j, b) * values[self.descendant(i, j, b)])
                .sum();
            expected * self.discount(i, j)
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..self.size(i)).into_par_iter().map(node_value).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..self.size(i)).map(node_value).collect()
        }
    }
}
