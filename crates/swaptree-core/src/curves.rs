//! Discount curves.
//!
//! A short-rate tree is fitted so that its zero-coupon prices reproduce a
//! discount curve. Times are year fractions from the curve reference date.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Anything that can quote a discount factor at a lattice time.
pub trait DiscountCurve: Send + Sync + std::fmt::Debug {
    /// Discount factor for time `t` (years from the reference date).
    fn discount(&self, t: f64) -> f64;

    /// Continuously compounded zero rate for time `t`.
    fn zero_rate(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return self.zero_rate(1e-4);
        }
        -self.discount(t).ln() / t
    }
}

/// Flat continuously compounded forward rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatForward {
    rate: f64,
}

impl FlatForward {
    /// Creates a flat curve at the given continuously compounded rate.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// The flat rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl DiscountCurve for FlatForward {
    fn discount(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }

    fn zero_rate(&self, _t: f64) -> f64 {
        self.rate
    }
}

/// Zero curve with linear interpolation on continuously compounded rates.
///
/// Flat extrapolation on both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroCurve {
    times: Vec<f64>,
    rates: Vec<f64>,
}

impl ZeroCurve {
    /// Creates a zero curve from pillar times and rates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCurve` if the pillars are empty, of unequal
    /// length, non-positive or not strictly increasing.
    pub fn new(times: Vec<f64>, rates: Vec<f64>) -> CoreResult<Self> {
        if times.is_empty() || times.len() != rates.len() {
            return Err(CoreError::invalid_curve(format!(
                "expected matching non-empty pillars, got {} times and {} rates",
                times.len(),
                rates.len()
            )));
        }
        if times[0] <= 0.0 || times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CoreError::invalid_curve(
                "pillar times must be positive and strictly increasing",
            ));
        }
        Ok(Self { times, rates })
    }

    /// Pillar times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }
}

impl DiscountCurve for ZeroCurve {
    fn discount(&self, t: f64) -> f64 {
        (-self.zero_rate(t) * t).exp()
    }

    fn zero_rate(&self, t: f64) -> f64 {
        let last = self.times.len() - 1;
        if t <= self.times[0] {
            return self.rates[0];
        }
        if t >= self.times[last] {
            return self.rates[last];
        }
        let i = self.times.partition_point(|&x| x <= t);
        let (t0, t1) = (self.times[i - 1], self.times[i]);
        let (r0, r1) = (self.rates[i - 1], self.rates[i]);
        r0 + (r1 - r0) * (t - t0) / (t1 - t0)
    }
}
