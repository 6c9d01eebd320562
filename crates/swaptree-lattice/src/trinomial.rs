//! Recombining trinomial tree for a mean-reverting Gaussian factor.
//!
//! The factor follows an Ornstein-Uhlenbeck process started at zero:
//!
//! ```text
//! dx = -a x dt + σ dW
//! ```
//!
//! Layer spacing is `dx = v √3` with `v²` the one-step conditional variance.
//! Each node branches to the node nearest its conditional mean (offset `k`)
//! and the two neighbours, with probabilities matching the first two moments.

use crate::error::{LatticeError, LatticeResult};
use crate::time_grid::TimeGrid;

/// Ornstein-Uhlenbeck dynamics of the tree factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnsteinUhlenbeck {
    speed: f64,
    volatility: f64,
}

impl OrnsteinUhlenbeck {
    /// Creates the process with mean-reversion `speed` and `volatility`.
    #[must_use]
    pub fn new(speed: f64, volatility: f64) -> Self {
        Self { speed, volatility }
    }

    /// Conditional mean of `x(t + dt)` given `x(t) = x`.
    #[must_use]
    pub fn expectation(&self, x: f64, dt: f64) -> f64 {
        x * (-self.speed * dt).exp()
    }

    /// Conditional variance of `x(t + dt)`.
    #[must_use]
    pub fn variance(&self, dt: f64) -> f64 {
        let v = self.volatility * self.volatility;
        if self.speed.abs() < f64::EPSILON.sqrt() {
            v * dt
        } else {
            0.5 * v / self.speed * (1.0 - (-2.0 * self.speed * dt).exp())
        }
    }
}

/// Branching from one layer to the next.
#[derive(Debug, Clone)]
struct Branching {
    k: Vec<i64>,
    probs: [Vec<f64>; 3],
    j_min: i64,
    j_max: i64,
}

impl Branching {
    fn new() -> Self {
        Self {
            k: Vec::new(),
            probs: [Vec::new(), Vec::new(), Vec::new()],
            j_min: i64::MAX,
            j_max: i64::MIN,
        }
    }

    fn add(&mut self, k: i64, p_down: f64, p_mid: f64, p_up: f64) {
        self.k.push(k);
        self.probs[0].push(p_down);
        self.probs[1].push(p_mid);
        self.probs[2].push(p_up);
        self.j_min = self.j_min.min(k - 1);
        self.j_max = self.j_max.max(k + 1);
    }

    /// Node count of the layer this branching leads to.
    fn size(&self) -> usize {
        (self.j_max - self.j_min + 1) as usize
    }

    fn descendant(&self, index: usize, branch: usize) -> usize {
        (self.k[index] - self.j_min - 1 + branch as i64) as usize
    }
}

/// Trinomial tree of the factor `x` on a time grid.
#[derive(Debug, Clone)]
pub struct TrinomialTree {
    /// Spacing per layer; `dx[0]` is zero for the root.
    dx: Vec<f64>,
    branchings: Vec<Branching>,
    grid: TimeGrid,
}

impl TrinomialTree {
    /// Builds the tree for `process` on `grid`.
    ///
    /// # Errors
    ///
    /// Fails if a step has zero conditional variance.
    pub fn new(process: &OrnsteinUhlenbeck, grid: &TimeGrid) -> LatticeResult<Self> {
        let steps = grid.size() - 1;
        let mut dx = vec![0.0];
        let mut branchings = Vec::with_capacity(steps);
        let (mut j_min, mut j_max) = (0_i64, 0_i64);

        for i in 0..steps {
            let dt = grid.dt(i);
            let v2 = process.variance(dt);
            if v2 <= 0.0 || !v2.is_finite() {
                return Err(LatticeError::invalid_tree(format!(
                    "non-positive variance {v2} at step {i}"
                )));
            }
            let v = v2.sqrt();
            dx.push(v * 3.0_f64.sqrt());

            let mut branching = Branching::new();
            for j in j_min..=j_max {
                let x = j as f64 * dx[i];
                let m = process.expectation(x, dt);
                let k = (m / dx[i + 1] + 0.5).floor() as i64;
                let e = m - k as f64 * dx[i + 1];
                let e2 = e * e;
                let e3 = e * 3.0_f64.sqrt();
                branching.add(
                    k,
                    (1.0 + e2 / v2 - e3 / v) / 6.0,
                    (2.0 - e2 / v2) / 3.0,
                    (1.0 + e2 / v2 + e3 / v) / 6.0,
                );
            }
            j_min = branching.j_min;
            j_max = branching.j_max;
            branchings.push(branching);
        }

        Ok(Self {
            dx,
            branchings,
            grid: grid.clone(),
        })
    }

    /// The time grid.
    #[must_use]
    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Number of nodes at layer `i`.
    #[must_use]
    pub fn size(&self, i: usize) -> usize {
        if i == 0 {
            1
        } else {
            self.branchings[i - 1].size()
        }
    }

    /// Node spacing at layer `i`.
    #[must_use]
    pub fn dx(&self, i: usize) -> f64 {
        self.dx[i]
    }

    /// Factor value at node `index` of layer `i`.
    #[must_use]
    pub fn underlying(&self, i: usize, index: usize) -> f64 {
        if i == 0 {
            0.0
        } else {
            (self.branchings[i - 1].j_min + index as i64) as f64 * self.dx[i]
        }
    }

    /// Descendant of node `index` of layer `i` along `branch` (0 down, 1 middle, 2 up).
    #[must_use]
    pub fn descendant(&self, i: usize, index: usize, branch: usize) -> usize {
        self.branchings[i].descendant(index, branch)
    }

    /// Transition probability of `branch` out of node `index` of layer `i`.
    #[must_use]
    pub fn probability(&self, i: usize, index: usize, branch: usize) -> f64 {
        self.branchings[i].probs[branch][index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tree() -> TrinomialTree {
        let grid = TimeGrid::uniform(5.0, 50).unwrap();
        TrinomialTree::new(&OrnsteinUhlenbeck::new(0.1, 0.01), &grid).unwrap()
    }

    #[test]
    fn test_root_and_growth() {
        let tree = tree();
        assert_eq!(tree.size(0), 1);
        assert_eq!(tree.size(1), 3);
        assert_eq!(tree.size(2), 5);
        assert_eq!(tree.underlying(0, 0), 0.0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let tree = tree();
        for i in 0..50 {
            for j in 0..tree.size(i) {
                let total: f64 = (0..3).map(|b| tree.probability(i, j, b)).sum();
                assert_relative_eq!(total, 1.0, epsilon = 1e-12);
                for b in 0..3 {
                    assert!(tree.probability(i, j, b) >= 0.0);
                    assert!(tree.descendant(i, j, b) < tree.size(i + 1));
                }
            }
        }
    }

    #[test]
    fn test_nodes_increase_with_index() {
        let tree = tree();
        for i in 1..=50 {
            for j in 1..tree.size(i) {
                assert!(tree.underlying(i, j) > tree.underlying(i, j - 1));
            }
        }
    }

    #[test]
    fn test_width_is_bounded_by_mean_reversion() {
        // Branching shifts inwards once the mean pulls nodes back.
        let grid = TimeGrid::uniform(5.0, 50).unwrap();
        let tree = TrinomialTree::new(&OrnsteinUhlenbeck::new(1.0, 0.01), &grid).unwrap();
        assert!(tree.size(50) < 2 * 50 + 1);
        assert_eq!(tree.size(50), tree.size(49));
    }

    #[test]
    fn test_matches_conditional_moments() {
        let process = OrnsteinUhlenbeck::new(0.1, 0.01);
        let tree = tree();
        let dt = tree.time_grid().dt(10);
        for j in 0..tree.size(10) {
            let x = tree.underlying(10, j);
            let mean: f64 = (0..3)
                .map(|b| tree.probability(10, j, b) * tree.underlying(11, tree.descendant(10, j, b)))
                .sum();
            assert_relative_eq!(mean, process.expectation(x, dt), epsilon = 1e-12);
        }
    }
}
