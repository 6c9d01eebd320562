//! Builder for vanilla swap schedules.

use swaptree_core::daycounts::DayCountConvention;
use swaptree_core::schedule::Schedule;
use swaptree_core::types::{Date, Frequency};

use crate::error::{PricingError, PricingResult};
use crate::instruments::{SwapArguments, SwapType};

/// Builder for [`SwapArguments`] from start, maturity and leg conventions.
///
/// Schedules are unadjusted. Each coupon resets on its accrual start date
/// and pays on its accrual end date.
///
/// # Example
///
/// ```rust
/// use swaptree_core::types::{Date, Frequency};
/// use swaptree_pricing::prelude::*;
///
/// let swap = VanillaSwapBuilder::new()
///     .swap_type(SwapType::Payer)
///     .nominal(1_000_000.0)
///     .fixed_rate(0.04)
///     .start(Date::from_ymd(2026, 1, 15).unwrap())
///     .maturity(Date::from_ymd(2031, 1, 15).unwrap())
///     .fixed_frequency(Frequency::Annual)
///     .floating_frequency(Frequency::SemiAnnual)
///     .build()
///     .unwrap();
/// assert_eq!(swap.fixed_coupons.len(), 5);
/// assert_eq!(swap.floating_reset_dates.len(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VanillaSwapBuilder {
    swap_type: Option<SwapType>,
    nominal: Option<f64>,
    fixed_rate: Option<f64>,
    start: Option<Date>,
    maturity: Option<Date>,
    fixed_frequency: Option<Frequency>,
    floating_frequency: Option<Frequency>,
    fixed_day_count: Option<DayCountConvention>,
    floating_day_count: Option<DayCountConvention>,
    spread: Option<f64>,
    fixings: Vec<(Date, f64)>,
}

impl VanillaSwapBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets payer or receiver (default payer).
    #[must_use]
    pub fn swap_type(mut self, swap_type: SwapType) -> Self {
        self.swap_type = Some(swap_type);
        self
    }

    /// Sets the notional (default 1).
    #[must_use]
    pub fn nominal(mut self, nominal: f64) -> Self {
        self.nominal = Some(nominal);
        self
    }

    /// Sets the fixed rate.
    #[must_use]
    pub fn fixed_rate(mut self, rate: f64) -> Self {
        self.fixed_rate = Some(rate);
        self
    }

    /// Sets the start of the first accrual period.
    #[must_use]
    pub fn start(mut self, date: Date) -> Self {
        self.start = Some(date);
        self
    }

    /// Sets the end of the last accrual period.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the fixed leg frequency (default annual).
    #[must_use]
    pub fn fixed_frequency(mut self, frequency: Frequency) -> Self {
        self.fixed_frequency = Some(frequency);
        self
    }

    /// Sets the floating leg frequency (default semi-annual).
    #[must_use]
    pub fn floating_frequency(mut self, frequency: Frequency) -> Self {
        self.floating_frequency = Some(frequency);
        self
    }

    /// Sets the fixed leg day count (default 30/360 US).
    #[must_use]
    pub fn fixed_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.fixed_day_count = Some(day_count);
        self
    }

    /// Sets the floating leg day count (default ACT/360).
    #[must_use]
    pub fn floating_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.floating_day_count = Some(day_count);
        self
    }

    /// Sets the spread over the floating index (default 0).
    #[must_use]
    pub fn spread(mut self, spread: f64) -> Self {
        self.spread = Some(spread);
        self
    }

    /// Records the index fixing for the floating coupon resetting on `reset_date`.
    #[must_use]
    pub fn fixing(mut self, reset_date: Date, rate: f64) -> Self {
        self.fixings.push((reset_date, rate));
        self
    }

    /// Builds the swap schedule.
    pub fn build(self) -> PricingResult<SwapArguments> {
        let fixed_rate = self
            .fixed_rate
            .ok_or_else(|| PricingError::invalid_arguments("missing fixed_rate"))?;
        let start = self
            .start
            .ok_or_else(|| PricingError::invalid_arguments("missing start date"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| PricingError::invalid_arguments("missing maturity date"))?;
        let nominal = self.nominal.unwrap_or(1.0);
        if nominal <= 0.0 {
            return Err(PricingError::invalid_arguments("nominal must be positive"));
        }
        let spread = self.spread.unwrap_or(0.0);

        let fixed_dc = self
            .fixed_day_count
            .unwrap_or(DayCountConvention::Thirty360US)
            .to_day_count();
        let floating_dc = self
            .floating_day_count
            .unwrap_or(DayCountConvention::Act360)
            .to_day_count();

        let fixed = Schedule::generate(
            start,
            maturity,
            self.fixed_frequency.unwrap_or(Frequency::Annual),
        )?;
        let floating = Schedule::generate(
            start,
            maturity,
            self.floating_frequency.unwrap_or(Frequency::SemiAnnual),
        )?;

        let fixed_coupons = fixed
            .start_dates()
            .iter()
            .zip(fixed.end_dates())
            .map(|(s, e)| nominal * fixed_rate * fixed_dc.year_fraction_f64(*s, *e))
            .collect();

        let floating_accrual_times: Vec<f64> = floating
            .start_dates()
            .iter()
            .zip(floating.end_dates())
            .map(|(s, e)| floating_dc.year_fraction_f64(*s, *e))
            .collect();

        let floating_coupons = floating
            .start_dates()
            .iter()
            .zip(&floating_accrual_times)
            .map(|(reset, accrual)| {
                self.fixings
                    .iter()
                    .find(|(d, _)| d == reset)
                    .map(|(_, rate)| nominal * (rate + spread) * accrual)
            })
            .collect();

        let n_floating = floating.periods();
        let swap = SwapArguments {
            swap_type: self.swap_type.unwrap_or_default(),
            nominal,
            fixed_rate,
            fixed_reset_dates: fixed.start_dates().to_vec(),
            fixed_pay_dates: fixed.end_dates().to_vec(),
            fixed_coupons,
            floating_reset_dates: floating.start_dates().to_vec(),
            floating_pay_dates: floating.end_dates().to_vec(),
            floating_accrual_times,
            floating_spreads: vec![spread; n_floating],
            floating_coupons,
        };
        swap.validate()?;
        Ok(swap)
    }
}
