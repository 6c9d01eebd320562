//! Hull-White one-factor short rate model on a trinomial tree.
//!
//! The model is defined by:
//!
//! ```text
//! dr = (θ(t) - a r) dt + σ dW
//! ```
//!
//! The short rate is split as `r = x + φ(t)`, where `x` is an
//! Ornstein-Uhlenbeck factor discretized by [`TrinomialTree`] and `φ` is
//! fitted slice by slice so that the tree reprices the discount curve
//! exactly. Fitting runs forward with Arrow-Debreu state prices.

use std::sync::Arc;

use log::debug;
use swaptree_core::curves::DiscountCurve;

use crate::error::{LatticeError, LatticeResult};
use crate::lattice::Lattice;
use crate::time_grid::TimeGrid;
use crate::trinomial::{OrnsteinUhlenbeck, TrinomialTree};

/// A one-factor short rate model that can be discretized on a lattice.
pub trait ShortRateModel: Send + Sync + std::fmt::Debug {
    /// Builds a lattice fitted to `curve` on `grid`.
    fn build_tree(
        &self,
        curve: &dyn DiscountCurve,
        grid: &TimeGrid,
    ) -> LatticeResult<Arc<dyn Lattice>>;

    /// Short rate volatility at time `t`.
    fn volatility(&self, t: f64) -> f64;

    /// Mean reversion speed.
    fn mean_reversion(&self) -> f64;

    /// Model name.
    fn name(&self) -> &'static str;
}

/// Hull-White one-factor short rate model.
///
/// # Parameters
///
/// - **Mean Reversion (a)**: speed at which rates revert to the fitted drift.
///   Typical values: 0.01 - 0.10.
/// - **Volatility (σ)**: instantaneous volatility of the short rate.
///   Typical values: 0.005 - 0.02.
///
/// # Example
///
/// ```rust
/// use swaptree_core::curves::FlatForward;
/// use swaptree_lattice::prelude::*;
///
/// let model = HullWhite::new(0.03, 0.01);
/// let grid = TimeGrid::uniform(2.0, 20).unwrap();
/// let tree = model.build_tree(&FlatForward::new(0.05), &grid).unwrap();
/// assert_eq!(tree.size(0), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullWhite {
    mean_reversion: f64,
    volatility: f64,
}

impl HullWhite {
    /// Creates a new Hull-White model.
    #[must_use]
    pub fn new(mean_reversion: f64, volatility: f64) -> Self {
        Self {
            mean_reversion,
            volatility: volatility.abs(),
        }
    }

    /// Mean reversion 3%, volatility 1%.
    #[must_use]
    pub fn default_params() -> Self {
        Self::new(0.03, 0.01)
    }

    /// Builds the fitted tree as a concrete type.
    ///
    /// # Errors
    ///
    /// Fails when the volatility is zero or the curve produces a
    /// non-positive discount factor on the grid.
    pub fn fitted_tree(
        &self,
        curve: &dyn DiscountCurve,
        grid: &TimeGrid,
    ) -> LatticeResult<ShortRateTree> {
        if self.volatility <= 0.0 {
            return Err(LatticeError::invalid_tree("Hull-White volatility must be positive"));
        }
        let process = OrnsteinUhlenbeck::new(self.mean_reversion, self.volatility);
        let tree = TrinomialTree::new(&process, grid)?;
        let steps = grid.size() - 1;

        let mut phi = Vec::with_capacity(steps);
        let mut state_prices = vec![1.0];
        for i in 0..steps {
            let dt = grid.dt(i);
            let target = curve.discount(grid.time(i + 1));
            if target <= 0.0 || !target.is_finite() {
                return Err(LatticeError::invalid_tree(format!(
                    "discount factor {target} at t = {}",
                    grid.time(i + 1)
                )));
            }

            let unfitted: f64 = state_prices
                .iter()
                .enumerate()
                .map(|(j, q)| q * (-tree.underlying(i, j) * dt).exp())
                .sum();
            let phi_i = (unfitted / target).ln() / dt;
            phi.push(phi_i);

            let mut next = vec![0.0; tree.size(i + 1)];
            for (j, q) in state_prices.iter().enumerate() {
                let df = (-(tree.underlying(i, j) + phi_i) * dt).exp();
                for b in 0..3 {
                    next[tree.descendant(i, j, b)] += q * tree.probability(i, j, b) * df;
                }
            }
            state_prices = next;
        }

        debug!(
            "{} tree fitted: {} slices, {} nodes at maturity",
            self.name(),
            grid.size(),
            tree.size(steps)
        );

        Ok(ShortRateTree { tree, phi })
    }
}

impl Default for HullWhite {
    fn default() -> Self {
        Self::default_params()
    }
}

impl ShortRateModel for HullWhite {
    fn build_tree(
        &self,
        curve: &dyn DiscountCurve,
        grid: &TimeGrid,
    ) -> LatticeResult<Arc<dyn Lattice>> {
        Ok(Arc::new(self.fitted_tree(curve, grid)?))
    }

    fn volatility(&self, _t: f64) -> f64 {
        self.volatility
    }

    fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    fn name(&self) -> &'static str {
        "Hull-White"
    }
}

/// Trinomial short rate tree with a fitted drift.
#[derive(Debug, Clone)]
pub struct ShortRateTree {
    tree: TrinomialTree,
    phi: Vec<f64>,
}

impl ShortRateTree {
    /// Fitted drift term at slice `i`.
    #[must_use]
    pub fn phi(&self, i: usize) -> f64 {
        // The last slice has no step of its own; reuse the previous fit.
        self.phi[i.min(self.phi.len() - 1)]
    }
}

impl Lattice for ShortRateTree {
    fn time_grid(&self) -> &TimeGrid {
        self.tree.time_grid()
    }

    fn size(&self, i: usize) -> usize {
        self.tree.size(i)
    }

    fn branches(&self) -> usize {
        3
    }

    fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        self.tree.descendant(i, index, branch)
    }

    fn probability(&self, i: usize, index: usize, branch: usize) -> f64 {
        self.tree.probability(i, index, branch)
    }

    fn discount(&self, i: usize, index: usize) -> f64 {
        (-self.short_rate(i, index) * self.time_grid().dt(i)).exp()
    }

    fn short_rate(&self, i: usize, index: usize) -> f64 {
        self.tree.underlying(i, index) + self.phi(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use swaptree_core::curves::{FlatForward, ZeroCurve};

    fn zero_bond_price(lattice: &dyn Lattice, maturity_index: usize) -> f64 {
        let mut values = vec![1.0; lattice.size(maturity_index)];
        for i in (0..maturity_index).rev() {
            values = lattice.step_back(i, &values);
        }
        values[0]
    }

    #[test]
    fn test_model_accessors() {
        let model = HullWhite::new(0.05, -0.01);
        assert_relative_eq!(model.mean_reversion(), 0.05);
        assert_relative_eq!(model.volatility(3.0), 0.01);
        assert_eq!(model.name(), "Hull-White");
        assert_eq!(HullWhite::default(), HullWhite::default_params());
    }

    #[test]
    fn test_reprices_flat_curve() {
        let curve = FlatForward::new(0.05);
        let grid = TimeGrid::uniform(5.0, 40).unwrap();
        let tree = HullWhite::new(0.03, 0.01).build_tree(&curve, &grid).unwrap();
        for i in [1, 8, 25, 40] {
            assert_relative_eq!(
                zero_bond_price(tree.as_ref(), i),
                curve.discount(grid.time(i)),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn test_reprices_sloped_curve_on_irregular_grid() {
        let curve = ZeroCurve::new(vec![0.5, 2.0, 10.0], vec![0.02, 0.035, 0.045]).unwrap();
        let grid = TimeGrid::with_mandatory_times(&[0.37, 1.0, 2.5, 4.1], 30).unwrap();
        let tree = HullWhite::new(0.1, 0.012).fitted_tree(&curve, &grid).unwrap();
        let last = grid.size() - 1;
        assert_relative_eq!(
            zero_bond_price(&tree, last),
            curve.discount(grid.end()),
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_short_rates_ordered_by_node() {
        let grid = TimeGrid::uniform(2.0, 10).unwrap();
        let tree = HullWhite::default().fitted_tree(&FlatForward::new(0.04), &grid).unwrap();
        for i in 1..=10 {
            for j in 1..tree.size(i) {
                assert!(tree.short_rate(i, j) > tree.short_rate(i, j - 1));
            }
        }
        assert_relative_eq!(tree.short_rate(0, 0), tree.phi(0));
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let grid = TimeGrid::uniform(1.0, 4).unwrap();
        let result = HullWhite::new(0.03, 0.0).build_tree(&FlatForward::new(0.05), &grid);
        assert!(matches!(result, Err(LatticeError::InvalidTree { .. })));
    }
}
