//! # Swaptree Core
//!
//! Foundation types for the Swaptree lattice pricer.
//!
//! - **Types**: `Date` and coupon `Frequency`
//! - **Day Count Conventions**: year fractions used to place cash flows on a lattice
//! - **Schedules**: unadjusted regular schedules for swap legs
//! - **Curves**: the discount curve a short-rate tree is fitted to
//!
//! ## Example
//!
//! ```rust
//! use swaptree_core::prelude::*;
//!
//! let reference = Date::from_ymd(2025, 2, 19).unwrap();
//! let expiry = Date::from_ymd(2026, 2, 19).unwrap();
//! let t = Act365Fixed.year_fraction_f64(reference, expiry);
//! assert!((t - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

pub mod curves;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Date, Frequency};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curves::{DiscountCurve, FlatForward, ZeroCurve};
    pub use crate::daycounts::{Act360, Act365Fixed, DayCount, DayCountConvention, Thirty360US};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::Schedule;
    pub use crate::types::{Date, Frequency};
}
