//! Swap and swaption argument bundles.
//!
//! These are plain data: schedules as dates, coupons as amounts. Lattice
//! times are only computed once a reference date and day count are known.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use swaptree_core::types::Date;

use crate::error::{PricingError, PricingResult};

/// Direction of a swap with respect to the fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwapType {
    /// Pays fixed, receives floating.
    #[default]
    Payer,
    /// Receives fixed, pays floating.
    Receiver,
}

impl SwapType {
    /// Sign applied to `floating - fixed` to get the swap value.
    ///
    /// Payer swaps are negated; receivers keep `floating - fixed`.
    #[must_use]
    pub fn sign(&self) -> f64 {
        match self {
            SwapType::Payer => -1.0,
            SwapType::Receiver => 1.0,
        }
    }
}

impl fmt::Display for SwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapType::Payer => write!(f, "Payer"),
            SwapType::Receiver => write!(f, "Receiver"),
        }
    }
}

/// Cash-flow schedule of a vanilla fixed-for-floating swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapArguments {
    /// Payer or receiver.
    pub swap_type: SwapType,
    /// Notional amount.
    pub nominal: f64,
    /// Fixed rate of the fixed leg.
    pub fixed_rate: f64,
    /// Fixing (accrual start) dates of the fixed coupons.
    pub fixed_reset_dates: Vec<Date>,
    /// Payment dates of the fixed coupons.
    pub fixed_pay_dates: Vec<Date>,
    /// Fixed coupon amounts.
    pub fixed_coupons: Vec<f64>,
    /// Fixing dates of the floating coupons.
    pub floating_reset_dates: Vec<Date>,
    /// Payment dates of the floating coupons.
    pub floating_pay_dates: Vec<Date>,
    /// Accrual year fractions of the floating coupons.
    pub floating_accrual_times: Vec<f64>,
    /// Spreads over the floating index.
    pub floating_spreads: Vec<f64>,
    /// Amounts of floating coupons already fixed; `None` where unknown.
    pub floating_coupons: Vec<Option<f64>>,
}

impl SwapArguments {
    /// Checks that both legs are non-empty and their vectors line up.
    pub fn validate(&self) -> PricingResult<()> {
        let fixed = self.fixed_reset_dates.len();
        if fixed == 0 {
            return Err(PricingError::invalid_arguments("fixed leg has no coupons"));
        }
        if self.fixed_pay_dates.len() != fixed || self.fixed_coupons.len() != fixed {
            return Err(PricingError::invalid_arguments(format!(
                "fixed leg sizes differ: {fixed} resets, {} payments, {} coupons",
                self.fixed_pay_dates.len(),
                self.fixed_coupons.len()
            )));
        }

        let floating = self.floating_reset_dates.len();
        if floating == 0 {
            return Err(PricingError::invalid_arguments("floating leg has no coupons"));
        }
        if self.floating_pay_dates.len() != floating
            || self.floating_accrual_times.len() != floating
            || self.floating_spreads.len() != floating
            || self.floating_coupons.len() != floating
        {
            return Err(PricingError::invalid_arguments(format!(
                "floating leg sizes differ: {floating} resets, {} payments, {} accruals, {} spreads, {} coupons",
                self.floating_pay_dates.len(),
                self.floating_accrual_times.len(),
                self.floating_spreads.len(),
                self.floating_coupons.len()
            )));
        }

        let misordered = self
            .fixed_reset_dates
            .iter()
            .zip(&self.fixed_pay_dates)
            .chain(self.floating_reset_dates.iter().zip(&self.floating_pay_dates))
            .find(|(reset, pay)| pay < reset);
        if let Some((reset, pay)) = misordered {
            return Err(PricingError::invalid_arguments(format!(
                "coupon paid on {pay} before its reset on {reset}"
            )));
        }
        Ok(())
    }

    /// Last fixed and floating payment dates.
    pub fn last_payment_dates(&self) -> PricingResult<(Date, Date)> {
        match (self.fixed_pay_dates.last(), self.floating_pay_dates.last()) {
            (Some(fixed), Some(floating)) => Ok((*fixed, *floating)),
            _ => Err(PricingError::missing_final_payment("a swap leg has no payment dates")),
        }
    }
}

/// Exercise style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// A single exercise date.
    European,
    /// A discrete set of exercise dates.
    #[default]
    Bermudan,
    /// Continuous exercise between two dates.
    American,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseType::European => "European",
            ExerciseType::Bermudan => "Bermudan",
            ExerciseType::American => "American",
        };
        write!(f, "{name}")
    }
}

/// Exercise schedule of an option.
///
/// Deserialized schedules go through the same checks as the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    exercise_type: ExerciseType,
    dates: Vec<Date>,
}

/// Exercise schedule as written, before normalization.
#[derive(Deserialize)]
struct ExerciseSchedule {
    exercise_type: ExerciseType,
    dates: Vec<Date>,
}

impl<'de> Deserialize<'de> for Exercise {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ExerciseSchedule { exercise_type, dates } = ExerciseSchedule::deserialize(deserializer)?;
        let exercise = match (exercise_type, dates.len()) {
            (ExerciseType::European, 1) => Ok(Exercise::european(dates[0])),
            (ExerciseType::Bermudan, _) => Exercise::bermudan(dates),
            (ExerciseType::American, 2) => Exercise::american(dates[0], dates[1]),
            (exercise_type, count) => Err(PricingError::invalid_arguments(format!(
                "{exercise_type} exercise cannot have {count} dates"
            ))),
        };
        exercise.map_err(serde::de::Error::custom)
    }
}

impl Exercise {
    /// Exercise on a single date.
    #[must_use]
    pub fn european(date: Date) -> Self {
        Self {
            exercise_type: ExerciseType::European,
            dates: vec![date],
        }
    }

    /// Exercise on any of `dates`, which are sorted and de-duplicated.
    pub fn bermudan(mut dates: Vec<Date>) -> PricingResult<Self> {
        if dates.is_empty() {
            return Err(PricingError::invalid_arguments("no exercise dates given"));
        }
        dates.sort();
        dates.dedup();
        Ok(Self {
            exercise_type: ExerciseType::Bermudan,
            dates,
        })
    }

    /// Exercise at any time between `earliest` and `latest`.
    pub fn american(earliest: Date, latest: Date) -> PricingResult<Self> {
        if latest < earliest {
            return Err(PricingError::invalid_arguments(format!(
                "American exercise ends on {latest} before it starts on {earliest}"
            )));
        }
        Ok(Self {
            exercise_type: ExerciseType::American,
            dates: vec![earliest, latest],
        })
    }

    /// Exercise style.
    #[must_use]
    pub fn exercise_type(&self) -> ExerciseType {
        self.exercise_type
    }

    /// Exercise dates in increasing order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Last exercise date.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }
}

/// A swaption: the right to enter the underlying swap on an exercise date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaptionArguments {
    /// The underlying swap.
    pub swap: SwapArguments,
    /// The exercise schedule.
    pub exercise: Exercise,
}

impl SwaptionArguments {
    /// Creates a swaption after validating the swap.
    pub fn new(swap: SwapArguments, exercise: Exercise) -> PricingResult<Self> {
        swap.validate()?;
        Ok(Self { swap, exercise })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn one_period_swap() -> SwapArguments {
        SwapArguments {
            swap_type: SwapType::Payer,
            nominal: 100.0,
            fixed_rate: 0.05,
            fixed_reset_dates: vec![date(2025, 1, 1)],
            fixed_pay_dates: vec![date(2026, 1, 1)],
            fixed_coupons: vec![5.0],
            floating_reset_dates: vec![date(2025, 1, 1)],
            floating_pay_dates: vec![date(2026, 1, 1)],
            floating_accrual_times: vec![1.0],
            floating_spreads: vec![0.0],
            floating_coupons: vec![None],
        }
    }

    #[test]
    fn test_swap_sign() {
        assert_eq!(SwapType::Payer.sign(), -1.0);
        assert_eq!(SwapType::Receiver.sign(), 1.0);
    }

    #[test]
    fn test_validate() {
        assert!(one_period_swap().validate().is_ok());

        let mut swap = one_period_swap();
        swap.fixed_coupons.push(1.0);
        assert!(matches!(swap.validate(), Err(PricingError::InvalidArguments { .. })));

        let mut swap = one_period_swap();
        swap.floating_pay_dates[0] = date(2024, 6, 1);
        assert!(swap.validate().is_err());

        let mut swap = one_period_swap();
        swap.floating_reset_dates.clear();
        assert!(swap.validate().is_err());
    }

    #[test]
    fn test_bermudan_sorted() {
        let exercise = Exercise::bermudan(vec![date(2027, 1, 1), date(2026, 1, 1), date(2027, 1, 1)]).unwrap();
        assert_eq!(exercise.dates(), &[date(2026, 1, 1), date(2027, 1, 1)]);
        assert_eq!(exercise.exercise_type(), ExerciseType::Bermudan);
        assert!(Exercise::bermudan(vec![]).is_err());
    }

    #[test]
    fn test_deserialized_exercise_is_normalized() {
        let json = r#"{"exercise_type":"bermudan","dates":["2027-01-01","2026-01-01","2027-01-01"]}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.dates(), &[date(2026, 1, 1), date(2027, 1, 1)]);
        assert_eq!(exercise, Exercise::bermudan(vec![date(2027, 1, 1), date(2026, 1, 1)]).unwrap());

        let round_trip: Exercise = serde_json::from_str(&serde_json::to_string(&exercise).unwrap()).unwrap();
        assert_eq!(round_trip, exercise);

        let european: Exercise =
            serde_json::from_str(r#"{"exercise_type":"european","dates":["2026-01-01"]}"#).unwrap();
        assert_eq!(european, Exercise::european(date(2026, 1, 1)));
    }

    #[test]
    fn test_deserialized_exercise_rejects_bad_schedules() {
        for json in [
            r#"{"exercise_type":"bermudan","dates":[]}"#,
            r#"{"exercise_type":"european","dates":["2026-01-01","2027-01-01"]}"#,
            r#"{"exercise_type":"american","dates":["2027-01-01","2026-01-01"]}"#,
            r#"{"exercise_type":"american","dates":["2026-01-01"]}"#,
        ] {
            assert!(serde_json::from_str::<Exercise>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_american_bounds() {
        assert!(Exercise::american(date(2027, 1, 1), date(2026, 1, 1)).is_err());
        let exercise = Exercise::american(date(2026, 1, 1), date(2027, 1, 1)).unwrap();
        assert_eq!(exercise.last_date(), Some(date(2027, 1, 1)));
    }
}
