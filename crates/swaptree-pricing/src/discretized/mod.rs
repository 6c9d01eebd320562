//! Discretized swaps and swaptions.
//!
//! - [`CashflowLeg`]: fixed or floating leg, coupons projected at reset
//! - [`DiscretizedSwap`]: net value of both legs
//! - [`CoterminalSwapStrip`]: one swap per exercise date, common maturity
//! - [`DiscretizedSwaption`]: exercise decisions and their records

mod legs;
mod strip;
mod swap;
mod swaption;
mod underlying;

pub use legs::CashflowLeg;
pub use strip::CoterminalSwapStrip;
pub use swap::DiscretizedSwap;
pub use swaption::{collapse_dates, DiscretizedSwaption, ExerciseBoundary, ExerciseRecord};
pub use underlying::SwaptionUnderlying;
