//! Unadjusted regular schedules.
//!
//! Dates are rolled forward from the start date by whole periods. If the
//! maturity does not fall on a period boundary the final period is a short
//! stub ending at maturity. No business-day adjustment is applied.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Frequency};

/// An ordered list of schedule dates, start and maturity included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Generates a schedule from `start` to `end` with the given frequency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` if `end <= start`.
    pub fn generate(start: Date, end: Date, frequency: Frequency) -> CoreResult<Self> {
        if end <= start {
            return Err(CoreError::invalid_schedule(format!(
                "end date {end} must be after start date {start}"
            )));
        }

        let step = frequency.months_per_period() as i32;
        let mut dates = vec![start];
        let mut period = 1;
        loop {
            let next = start.add_months(step * period)?;
            if next >= end {
                break;
            }
            dates.push(next);
            period += 1;
        }
        dates.push(end);

        log::trace!("generated schedule {start}..{end} with {} dates", dates.len());
        Ok(Self { dates })
    }

    /// Builds a schedule from explicit dates, which must be strictly increasing.
    pub fn from_dates(dates: Vec<Date>) -> CoreResult<Self> {
        if dates.len() < 2 {
            return Err(CoreError::invalid_schedule("a schedule needs at least two dates"));
        }
        if dates.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CoreError::invalid_schedule("schedule dates must be strictly increasing"));
        }
        Ok(Self { dates })
    }

    /// All schedule dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of accrual periods.
    #[must_use]
    pub fn periods(&self) -> usize {
        self.dates.len() - 1
    }

    /// Accrual period start dates.
    #[must_use]
    pub fn start_dates(&self) -> &[Date] {
        &self.dates[..self.dates.len() - 1]
    }

    /// Accrual period end dates.
    #[must_use]
    pub fn end_dates(&self) -> &[Date] {
        &self.dates[1..]
    }
}
