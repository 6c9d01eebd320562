//! A vanilla swap as a discretized asset.

use std::sync::Arc;

use swaptree_core::daycounts::DayCount;
use swaptree_core::types::Date;
use swaptree_lattice::{AssetState, DiscretizedAsset};

use super::legs::{sorted_times, CashflowLeg};
use crate::error::{PricingError, PricingResult};
use crate::instruments::{SwapArguments, SwapType};

/// Fixed and floating legs rolled back together.
///
/// Node values are `sign * (floating - fixed)`, with `sign` from
/// [`SwapType::sign`]. Both legs are kept at the swap's time so their
/// values can be read for the implied swap rate.
#[derive(Debug, Clone)]
pub struct DiscretizedSwap {
    state: AssetState,
    swap_type: SwapType,
    fixed_rate: f64,
    entry_date: Option<Date>,
    fixed: CashflowLeg,
    floating: CashflowLeg,
}

impl DiscretizedSwap {
    /// Swap of `args` entered on `entry_date` (`None` keeps every coupon).
    pub fn new(
        args: &SwapArguments,
        reference_date: Date,
        day_count: &dyn DayCount,
        entry_date: Option<Date>,
    ) -> PricingResult<Self> {
        Ok(Self {
            state: AssetState::new(),
            swap_type: args.swap_type,
            fixed_rate: args.fixed_rate,
            entry_date,
            fixed: CashflowLeg::fixed(args, reference_date, day_count, entry_date)?,
            floating: CashflowLeg::floating(args, reference_date, day_count, entry_date)?,
        })
    }

    /// Payer or receiver.
    #[must_use]
    pub fn swap_type(&self) -> SwapType {
        self.swap_type
    }

    /// Entry date, if coupons before it are excluded.
    #[must_use]
    pub fn entry_date(&self) -> Option<Date> {
        self.entry_date
    }

    /// The fixed leg.
    #[must_use]
    pub fn fixed_leg(&self) -> &CashflowLeg {
        &self.fixed
    }

    /// The floating leg.
    #[must_use]
    pub fn floating_leg(&self) -> &CashflowLeg {
        &self.floating
    }

    /// Par rate implied at `node` of the current slice:
    /// `floating * fixed_rate / fixed`.
    #[must_use]
    pub fn implied_swap_rate(&self, node: usize) -> f64 {
        self.floating.values()[node] * self.fixed_rate / self.fixed.values()[node]
    }

    fn update_net_values(&mut self) {
        let sign = self.swap_type.sign();
        let net = self
            .floating
            .values()
            .iter()
            .zip(self.fixed.values())
            .map(|(float, fixed)| sign * (float - fixed))
            .collect();
        self.state.set_values(net);
    }
}

impl DiscretizedAsset for DiscretizedSwap {
    type Error = PricingError;

    fn state(&self) -> &AssetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AssetState {
        &mut self.state
    }

    fn reset(&mut self, size: usize) -> PricingResult<()> {
        self.state.set_values(vec![0.0; size]);
        let lattice = Arc::clone(self.lattice()?);
        let time = self.time();
        self.fixed.initialize(Arc::clone(&lattice), time)?;
        self.floating.initialize(lattice, time)?;
        self.adjust_values()
    }

    fn mandatory_times(&self) -> Vec<f64> {
        let mut times = self.fixed.mandatory_times();
        times.extend(self.floating.mandatory_times());
        sorted_times(times)
    }

    fn pre_adjust_values_impl(&mut self) -> PricingResult<()> {
        let time = self.time();
        self.floating.partial_rollback(time)?;
        self.floating.pre_adjust_values()?;
        self.fixed.partial_rollback(time)?;
        self.fixed.pre_adjust_values()?;
        self.update_net_values();
        Ok(())
    }

    fn post_adjust_values_impl(&mut self) -> PricingResult<()> {
        self.floating.post_adjust_values()?;
        self.fixed.post_adjust_values()?;
        self.update_net_values();
        Ok(())
    }
}
