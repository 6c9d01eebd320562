//! Backward induction of assets on a lattice.
//!
//! A discretized asset holds one value per node of the slice it currently
//! sits on. Rolling back steps the values towards earlier slices through
//! [`Lattice::step_back`]; at each slice reached the asset gets two hooks:
//!
//! - **pre-adjustment**: runs before any composite asset mixes in other
//!   values (coupon discounting, for instance)
//! - **post-adjustment**: runs after it (known coupons, exercise decisions)
//!
//! Each hook runs at most once per slice.

use std::sync::Arc;

use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::math::close_enough;

/// Time, node values and lattice of a discretized asset.
#[derive(Debug, Clone)]
pub struct AssetState {
    time: f64,
    values: Vec<f64>,
    latest_pre_adjustment: f64,
    latest_post_adjustment: f64,
    lattice: Option<Arc<dyn Lattice>>,
}

impl AssetState {
    /// Creates an uninitialized state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            time: 0.0,
            values: Vec::new(),
            latest_pre_adjustment: f64::MAX,
            latest_post_adjustment: f64::MAX,
            lattice: None,
        }
    }

    /// Current asset time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Node values at the current time.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable node values.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Replaces the node values.
    pub fn set_values(&mut self, values: Vec<f64>) {
        self.values = values;
    }

    /// The lattice the asset was initialized on.
    #[must_use]
    pub fn lattice(&self) -> Option<&Arc<dyn Lattice>> {
        self.lattice.as_ref()
    }

    /// True when both states sit on the same lattice instance.
    #[must_use]
    pub fn shares_lattice_with(&self, other: &AssetState) -> bool {
        match (&self.lattice, &other.lattice) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for AssetState {
    fn default() -> Self {
        Self::new()
    }
}

/// An asset priced by backward induction.
///
/// Implementors provide storage ([`state`](Self::state)), the terminal
/// values ([`reset`](Self::reset)) and optionally the adjustment hooks; the
/// rollback machinery is provided.
pub trait DiscretizedAsset {
    /// Error raised by the asset's own adjustments.
    type Error: From<LatticeError>;

    /// Shared state.
    fn state(&self) -> &AssetState;

    /// Mutable shared state.
    fn state_mut(&mut self) -> &mut AssetState;

    /// Sets the values for a slice of `size` nodes at the current time.
    fn reset(&mut self, size: usize) -> Result<(), Self::Error>;

    /// Times the lattice must contain for this asset to be valued exactly.
    fn mandatory_times(&self) -> Vec<f64>;

    /// Adjustment applied before composite assets combine values.
    fn pre_adjust_values_impl(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Adjustment applied after composite assets combine values.
    fn post_adjust_values_impl(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Current asset time.
    fn time(&self) -> f64 {
        self.state().time
    }

    /// Node values at the current time.
    fn values(&self) -> &[f64] {
        self.state().values()
    }

    /// The lattice the asset was initialized on.
    fn lattice(&self) -> Result<&Arc<dyn Lattice>, LatticeError> {
        self.state().lattice().ok_or(LatticeError::NotInitialized)
    }

    /// Places the asset on `lattice` at time `t` and resets its values.
    fn initialize(&mut self, lattice: Arc<dyn Lattice>, t: f64) -> Result<(), Self::Error> {
        let i = lattice.time_grid().index(t)?;
        let size = lattice.size(i);
        let state = self.state_mut();
        state.time = t;
        state.latest_pre_adjustment = f64::MAX;
        state.latest_post_adjustment = f64::MAX;
        state.lattice = Some(lattice);
        self.reset(size)
    }

    /// Rolls back to `to` and adjusts the values there.
    fn rollback(&mut self, to: f64) -> Result<(), Self::Error> {
        self.partial_rollback(to)?;
        self.adjust_values()
    }

    /// Rolls back to `to`, adjusting at every slice passed but not at `to`.
    fn partial_rollback(&mut self, to: f64) -> Result<(), Self::Error> {
        let from = self.time();
        if close_enough(from, to) {
            return Ok(());
        }
        if to > from {
            return Err(LatticeError::InvalidRollback { from, to }.into());
        }

        let lattice = Arc::clone(self.lattice()?);
        let grid = lattice.time_grid();
        let i_from = grid.index(from)?;
        let i_to = grid.index(to)?;

        let expected = lattice.size(i_from);
        if self.values().len() != expected {
            return Err(LatticeError::SizeMismatch {
                slice: i_from,
                expected,
                actual: self.values().len(),
            }
            .into());
        }

        for i in (i_to..i_from).rev() {
            let values = lattice.step_back(i, self.values());
            let state = self.state_mut();
            state.values = values;
            state.time = grid.time(i);
            if i != i_to {
                self.adjust_values()?;
            }
        }
        Ok(())
    }

    /// Runs the pre-adjustment once per time.
    fn pre_adjust_values(&mut self) -> Result<(), Self::Error> {
        if !close_enough(self.time(), self.state().latest_pre_adjustment) {
            self.pre_adjust_values_impl()?;
            let state = self.state_mut();
            state.latest_pre_adjustment = state.time;
        }
        Ok(())
    }

    /// Runs the post-adjustment once per time.
    fn post_adjust_values(&mut self) -> Result<(), Self::Error> {
        if !close_enough(self.time(), self.state().latest_post_adjustment) {
            self.post_adjust_values_impl()?;
            let state = self.state_mut();
            state.latest_post_adjustment = state.time;
        }
        Ok(())
    }

    /// Pre- then post-adjustment.
    fn adjust_values(&mut self) -> Result<(), Self::Error> {
        self.pre_adjust_values()?;
        self.post_adjust_values()
    }

    /// True if `t` is a grid time and the asset currently sits on it.
    ///
    /// Times off the grid are never on time.
    fn is_on_time(&self, t: f64) -> bool {
        self.state().lattice().is_some_and(|lattice| {
            let grid = lattice.time_grid();
            grid.index(t).is_ok_and(|i| close_enough(grid.time(i), self.time()))
        })
    }

    /// Rolls back to time zero and returns the root value.
    fn present_value(&mut self) -> Result<f64, Self::Error> {
        self.rollback(0.0)?;
        Ok(self.values()[0])
    }
}

/// Zero-coupon bond paying 1 at the time it is initialized at.
#[derive(Debug, Clone, Default)]
pub struct DiscountBond {
    state: AssetState,
}

impl DiscountBond {
    /// Creates an uninitialized bond.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiscretizedAsset for DiscountBond {
    type Error = LatticeError;

    fn state(&self) -> &AssetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AssetState {
        &mut self.state
    }

    fn reset(&mut self, size: usize) -> Result<(), LatticeError> {
        self.state.set_values(vec![1.0; size]);
        Ok(())
    }

    fn mandatory_times(&self) -> Vec<f64> {
        Vec::new()
    }
}
