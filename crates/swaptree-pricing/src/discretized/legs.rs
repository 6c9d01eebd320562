//! Fixed and floating swap legs as discretized assets.
//!
//! A leg keeps the lattice time of every coupon's reset and payment.
//! Coupons resetting before the leg's entry date are inactive (`None`) and
//! never touch the value array. Active times may still be negative: such a
//! coupon fixed before the reference date, so its amount is known and is
//! added when its payment slice is reached.

use std::sync::Arc;

use swaptree_core::daycounts::DayCount;
use swaptree_core::types::Date;
use swaptree_lattice::{close_enough, AssetState, DiscountBond, DiscretizedAsset};

use crate::error::{PricingError, PricingResult};
use crate::instruments::SwapArguments;

/// Coupon amounts of a leg.
#[derive(Debug, Clone, PartialEq)]
enum Coupons {
    Fixed {
        amounts: Vec<f64>,
    },
    Floating {
        nominal: f64,
        accrual_times: Vec<f64>,
        spreads: Vec<f64>,
        fixings: Vec<Option<f64>>,
    },
}

/// One leg of a swap, valued by backward induction.
#[derive(Debug, Clone)]
pub struct CashflowLeg {
    state: AssetState,
    coupons: Coupons,
    reset_times: Vec<Option<f64>>,
    pay_times: Vec<Option<f64>>,
}

impl CashflowLeg {
    /// Fixed leg of `args` entered on `entry_date` (`None` keeps every coupon).
    pub fn fixed(
        args: &SwapArguments,
        reference_date: Date,
        day_count: &dyn DayCount,
        entry_date: Option<Date>,
    ) -> PricingResult<Self> {
        args.validate()?;
        let (reset_times, pay_times) = coupon_times(
            &args.fixed_reset_dates,
            &args.fixed_pay_dates,
            reference_date,
            day_count,
            entry_date,
        );
        Ok(Self {
            state: AssetState::new(),
            coupons: Coupons::Fixed {
                amounts: args.fixed_coupons.clone(),
            },
            reset_times,
            pay_times,
        })
    }

    /// Floating leg of `args` entered on `entry_date` (`None` keeps every coupon).
    pub fn floating(
        args: &SwapArguments,
        reference_date: Date,
        day_count: &dyn DayCount,
        entry_date: Option<Date>,
    ) -> PricingResult<Self> {
        args.validate()?;
        let (reset_times, pay_times) = coupon_times(
            &args.floating_reset_dates,
            &args.floating_pay_dates,
            reference_date,
            day_count,
            entry_date,
        );
        Ok(Self {
            state: AssetState::new(),
            coupons: Coupons::Floating {
                nominal: args.nominal,
                accrual_times: args.floating_accrual_times.clone(),
                spreads: args.floating_spreads.clone(),
                fixings: args.floating_coupons.clone(),
            },
            reset_times,
            pay_times,
        })
    }

    /// True for the fixed leg.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.coupons, Coupons::Fixed { .. })
    }

    /// Reset time per coupon; `None` if the coupon precedes the entry date.
    #[must_use]
    pub fn reset_times(&self) -> &[Option<f64>] {
        &self.reset_times
    }

    /// Payment time per coupon; `None` if the coupon precedes the entry date.
    #[must_use]
    pub fn pay_times(&self) -> &[Option<f64>] {
        &self.pay_times
    }

    /// Value at every node of a coupon resetting now, given the price of a
    /// discount bond maturing on its payment time.
    fn projected_coupon(&self, i: usize, bond: f64) -> f64 {
        match &self.coupons {
            Coupons::Fixed { amounts } => amounts[i] * bond,
            Coupons::Floating {
                nominal,
                accrual_times,
                spreads,
                ..
            } => {
                let accrued_spread = nominal * accrual_times[i] * spreads[i];
                nominal * (1.0 - bond) + accrued_spread * bond
            }
        }
    }

    /// Amount of a coupon fixed before the reference date.
    fn known_coupon(&self, i: usize) -> PricingResult<f64> {
        match &self.coupons {
            Coupons::Fixed { amounts } => Ok(amounts[i]),
            Coupons::Floating { fixings, .. } => {
                fixings[i].ok_or(PricingError::MissingFloatingCoupon { index: i })
            }
        }
    }
}

/// Converts a leg schedule to lattice times, deactivating coupons that reset
/// before `entry_date`.
fn coupon_times(
    resets: &[Date],
    pays: &[Date],
    reference_date: Date,
    day_count: &dyn DayCount,
    entry_date: Option<Date>,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    resets
        .iter()
        .zip(pays)
        .map(|(reset, pay)| {
            if entry_date.is_some_and(|entry| *reset < entry) {
                (None, None)
            } else {
                (
                    Some(day_count.year_fraction_f64(reference_date, *reset)),
                    Some(day_count.year_fraction_f64(reference_date, *pay)),
                )
            }
        })
        .unzip()
}

/// Sorted, de-duplicated non-negative times.
pub(crate) fn sorted_times(mut times: Vec<f64>) -> Vec<f64> {
    times.sort_by(f64::total_cmp);
    times.dedup_by(|a, b| close_enough(*a, *b));
    times
}

impl DiscretizedAsset for CashflowLeg {
    type Error = PricingError;

    fn state(&self) -> &AssetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AssetState {
        &mut self.state
    }

    fn reset(&mut self, size: usize) -> PricingResult<()> {
        self.state.set_values(vec![0.0; size]);
        self.adjust_values()
    }

    fn mandatory_times(&self) -> Vec<f64> {
        sorted_times(
            self.reset_times
                .iter()
                .chain(&self.pay_times)
                .filter_map(|t| t.filter(|t| *t >= 0.0))
                .collect(),
        )
    }

    /// Adds coupons resetting on this slice, projected with a discount bond.
    fn pre_adjust_values_impl(&mut self) -> PricingResult<()> {
        for i in 0..self.reset_times.len() {
            let (Some(reset), Some(pay)) = (self.reset_times[i], self.pay_times[i]) else {
                continue;
            };
            if reset < 0.0 || !self.is_on_time(reset) {
                continue;
            }

            let lattice = Arc::clone(self.lattice()?);
            let mut bond = DiscountBond::new();
            bond.initialize(lattice, pay)?;
            bond.rollback(self.time())?;

            let coupons: Vec<f64> = bond
                .values()
                .iter()
                .map(|b| self.projected_coupon(i, *b))
                .collect();
            for (value, coupon) in self.state.values_mut().iter_mut().zip(coupons) {
                *value += coupon;
            }
        }
        Ok(())
    }

    /// Adds known coupons paid on this slice whose reset is already past.
    fn post_adjust_values_impl(&mut self) -> PricingResult<()> {
        for i in 0..self.pay_times.len() {
            let (Some(reset), Some(pay)) = (self.reset_times[i], self.pay_times[i]) else {
                continue;
            };
            if pay < 0.0 || reset >= 0.0 || !self.is_on_time(pay) {
                continue;
            }
            let amount = self.known_coupon(i)?;
            for value in self.state.values_mut() {
                *value += amount;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::SwapType;
    use approx::assert_relative_eq;
    use swaptree_core::daycounts::Act365Fixed;
    use swaptree_lattice::{Lattice, TabulatedLattice, TimeGrid};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn reference() -> Date {
        date(2025, 1, 1)
    }

    /// Coupons resetting at 1y and 2y, paying a year later; one fixed
    /// before the reference date and paying at 1y.
    fn args() -> SwapArguments {
        SwapArguments {
            swap_type: SwapType::Receiver,
            nominal: 100.0,
            fixed_rate: 0.05,
            fixed_reset_dates: vec![date(2024, 1, 2), date(2026, 1, 1), date(2027, 1, 1)],
            fixed_pay_dates: vec![date(2026, 1, 1), date(2027, 1, 1), date(2028, 1, 1)],
            fixed_coupons: vec![5.0, 5.0, 5.0],
            floating_reset_dates: vec![date(2024, 1, 2), date(2026, 1, 1), date(2027, 1, 1)],
            floating_pay_dates: vec![date(2026, 1, 1), date(2027, 1, 1), date(2028, 1, 1)],
            floating_accrual_times: vec![1.0, 1.0, 1.0],
            floating_spreads: vec![0.0, 0.0, 0.0],
            floating_coupons: vec![Some(4.0), None, None],
        }
    }

    /// Flat 5% rate on every node of a three-year binomial lattice.
    fn flat_lattice() -> Arc<dyn Lattice> {
        let grid = TimeGrid::from_times(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let up_down = vec![(0, 0.5), (1, 0.5)];
        Arc::new(
            TabulatedLattice::new(
                grid,
                vec![vec![0.05], vec![0.05; 2], vec![0.05; 3], vec![0.05; 4]],
                vec![
                    vec![up_down.clone()],
                    vec![up_down.clone(), vec![(1, 0.5), (2, 0.5)]],
                    vec![up_down, vec![(1, 0.5), (2, 0.5)], vec![(2, 0.5), (3, 0.5)]],
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_inactive_before_entry() {
        let leg = CashflowLeg::fixed(&args(), reference(), &Act365Fixed, Some(date(2027, 1, 1))).unwrap();
        assert_eq!(leg.reset_times()[0], None);
        assert_eq!(leg.pay_times()[1], None);
        assert!(leg.reset_times()[2].is_some());
        let times = leg.mandatory_times();
        assert_eq!(times.len(), 2);
        assert!(times.iter().all(|t| *t >= 2.0 - 1e-12));
    }

    #[test]
    fn test_mandatory_times_skip_past() {
        let leg = CashflowLeg::floating(&args(), reference(), &Act365Fixed, None).unwrap();
        assert!(leg.reset_times()[0].unwrap() < 0.0);
        let times = leg.mandatory_times();
        // Past reset dropped; 2026-01-01 shared by a pay and a reset.
        assert_eq!(times.len(), 3);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_fixed_leg_value_on_flat_lattice() {
        // Dates chosen on whole ACT/365 years: 2025 and 2026 are not leap years.
        let mut args = args();
        args.fixed_reset_dates = vec![date(2024, 1, 2), date(2026, 1, 1)];
        args.fixed_pay_dates = vec![date(2026, 1, 1), date(2027, 1, 1)];
        args.fixed_coupons = vec![5.0, 5.0];
        let mut leg = CashflowLeg::fixed(&args, reference(), &Act365Fixed, None).unwrap();
        leg.initialize(flat_lattice(), 2.0).unwrap();
        let pv = leg.present_value().unwrap();
        let df = (-0.05_f64).exp();
        assert_relative_eq!(pv, 5.0 * df + 5.0 * df * df, epsilon = 1e-12);
    }

    #[test]
    fn test_floating_leg_value_on_flat_lattice() {
        let mut leg = CashflowLeg::floating(&args(), reference(), &Act365Fixed, None).unwrap();
        leg.initialize(flat_lattice(), 3.0).unwrap();
        let pv = leg.present_value().unwrap();
        let df = (-0.05_f64).exp();
        // Known 4.0 paid at 1y, then two projected coupons worth 100 (1 - df) each.
        let expected = 4.0 * df + 100.0 * (1.0 - df) * df + 100.0 * (1.0 - df) * df * df;
        assert_relative_eq!(pv, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_missing_fixing_fails() {
        let mut args = args();
        args.floating_coupons[0] = None;
        let mut leg = CashflowLeg::floating(&args, reference(), &Act365Fixed, None).unwrap();
        leg.initialize(flat_lattice(), 3.0).unwrap();
        assert_eq!(
            leg.present_value(),
            Err(PricingError::MissingFloatingCoupon { index: 0 })
        );
    }
}
