//! Lattice given node by node.
//!
//! Used when the tree is built elsewhere and handed over as plain data:
//! short rates per node and, for every node of every slice but the last,
//! the fixed list of `(descendant, probability)` transitions.

use crate::error::{LatticeError, LatticeResult};
use crate::lattice::Lattice;
use crate::time_grid::TimeGrid;

const PROBABILITY_TOLERANCE: f64 = 1e-10;

/// Transitions out of one node: `(descendant index, probability)` per branch.
pub type NodeTransitions = Vec<(usize, f64)>;

/// An externally supplied lattice.
///
/// Discount factors are `exp(-r * dt)` with `r` the node short rate.
#[derive(Debug, Clone)]
pub struct TabulatedLattice {
    grid: TimeGrid,
    short_rates: Vec<Vec<f64>>,
    transitions: Vec<Vec<NodeTransitions>>,
    branches: usize,
}

impl TabulatedLattice {
    /// Builds and validates a tabulated lattice.
    ///
    /// # Errors
    ///
    /// Returns `LatticeError::InvalidTree` when slice counts do not match the
    /// grid, the root slice has more than one node, branch counts differ
    /// between nodes, a descendant is out of range, or a node's transition
    /// probabilities do not sum to one.
    pub fn new(
        grid: TimeGrid,
        short_rates: Vec<Vec<f64>>,
        transitions: Vec<Vec<NodeTransitions>>,
    ) -> LatticeResult<Self> {
        let slices = grid.size();
        if short_rates.len() != slices {
            return Err(LatticeError::invalid_tree(format!(
                "{} slices of short rates for a grid of {slices} times",
                short_rates.len()
            )));
        }
        if transitions.len() != slices - 1 {
            return Err(LatticeError::invalid_tree(format!(
                "{} slices of transitions for a grid of {slices} times",
                transitions.len()
            )));
        }
        if short_rates[0].len() != 1 {
            return Err(LatticeError::invalid_tree("the root slice must hold a single node"));
        }

        let branches = transitions
            .first()
            .and_then(|slice| slice.first())
            .map_or(0, Vec::len);
        if branches == 0 {
            return Err(LatticeError::invalid_tree("nodes must have at least one branch"));
        }

        for (i, slice) in transitions.iter().enumerate() {
            if slice.len() != short_rates[i].len() {
                return Err(LatticeError::invalid_tree(format!(
                    "slice {i} has {} nodes but {} transition lists",
                    short_rates[i].len(),
                    slice.len()
                )));
            }
            let next_size = short_rates[i + 1].len();
            for (j, node) in slice.iter().enumerate() {
                if node.len() != branches {
                    return Err(LatticeError::invalid_tree(format!(
                        "node ({i}, {j}) has {} branches, expected {branches}",
                        node.len()
                    )));
                }
                if let Some(&(d, _)) = node.iter().find(|(d, _)| *d >= next_size) {
                    return Err(LatticeError::invalid_tree(format!(
                        "node ({i}, {j}) branches to node {d} of a slice with {next_size} nodes"
                    )));
                }
                let total: f64 = node.iter().map(|(_, p)| p).sum();
                if (total - 1.0).abs() > PROBABILITY_TOLERANCE || node.iter().any(|(_, p)| *p < 0.0) {
                    return Err(LatticeError::invalid_tree(format!(
                        "node ({i}, {j}) probabilities sum to {total}"
                    )));
                }
            }
        }

        Ok(Self {
            grid,
            short_rates,
            transitions,
            branches,
        })
    }
}

impl Lattice for TabulatedLattice {
    fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    fn size(&self, i: usize) -> usize {
        self.short_rates[i].len()
    }

    fn branches(&self) -> usize {
        self.branches
    }

    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        self.transitions[i][index][branch].0
    }

    fn probability(&self, i: usize, index: usize, branch: usize) -> f64 {
        self.transitions[i][index][branch].1
    }

    fn discount(&self, i: usize, index: usize) -> f64 {
        (-self.short_rates[i][index] * self.grid.dt(i)).exp()
    }

    fn short_rate(&self, i: usize, index: usize) -> f64 {
        self.short_rates[i][index]
    }
}
