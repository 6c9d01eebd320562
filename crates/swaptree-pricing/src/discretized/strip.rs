//! Coterminal swap strip: one swap per entry date, all ending together.

use std::sync::Arc;

use log::warn;
use swaptree_core::daycounts::DayCount;
use swaptree_core::types::Date;
use swaptree_lattice::{close_enough, AssetState, DiscretizedAsset};

use super::legs::sorted_times;
use super::swap::DiscretizedSwap;
use crate::error::{PricingError, PricingResult};
use crate::instruments::SwapArguments;

/// Swaps sharing a schedule and maturity, entered on successive dates.
///
/// Member `i` holds the coupons resetting on or after entry date `i`. The
/// strip's own values carry nothing; members are read through
/// [`swap`](Self::swap).
#[derive(Debug, Clone)]
pub struct CoterminalSwapStrip {
    state: AssetState,
    swaps: Vec<DiscretizedSwap>,
}

impl CoterminalSwapStrip {
    /// Builds one member swap per entry date.
    pub fn new(
        args: &SwapArguments,
        reference_date: Date,
        day_count: &dyn DayCount,
        entry_dates: &[Date],
    ) -> PricingResult<Self> {
        if entry_dates.is_empty() {
            return Err(PricingError::invalid_arguments(
                "a coterminal swap strip needs at least one entry date",
            ));
        }
        let swaps = entry_dates
            .iter()
            .map(|entry| DiscretizedSwap::new(args, reference_date, day_count, Some(*entry)))
            .collect::<PricingResult<Vec<_>>>()?;
        Ok(Self {
            state: AssetState::new(),
            swaps,
        })
    }

    /// The swap entered on the `i`-th entry date.
    #[must_use]
    pub fn swap(&self, i: usize) -> Option<&DiscretizedSwap> {
        self.swaps.get(i)
    }

    /// Number of member swaps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.swaps.len()
    }

    /// True if the strip has no member swaps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }
}

impl DiscretizedAsset for CoterminalSwapStrip {
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
        for swap in &mut self.swaps {
            swap.initialize(Arc::clone(&lattice), time)?;
        }
        self.adjust_values()
    }

    /// Times of the first member, which enters earliest.
    ///
    /// Later members only drop coupons, so their times are a subset. Any
    /// time that is not is added and logged.
    fn mandatory_times(&self) -> Vec<f64> {
        let Some(first) = self.swaps.first() else {
            return Vec::new();
        };
        let mut times = first.mandatory_times();
        let mut missing = Vec::new();
        for (i, swap) in self.swaps.iter().enumerate().skip(1) {
            for t in swap.mandatory_times() {
                if !times.iter().any(|s| close_enough(*s, t)) {
                    warn!("coterminal swap {i} needs time {t} absent from the first swap");
                    missing.push(t);
                }
            }
        }
        if !missing.is_empty() {
            times.extend(missing);
            times = sorted_times(times);
        }
        times
    }

    fn pre_adjust_values_impl(&mut self) -> PricingResult<()> {
        let time = self.time();
        for swap in &mut self.swaps {
            swap.partial_rollback(time)?;
            swap.pre_adjust_values()?;
        }
        Ok(())
    }

    fn post_adjust_values_impl(&mut self) -> PricingResult<()> {
        for swap in &mut self.swaps {
            swap.post_adjust_values()?;
        }
        Ok(())
    }
}
