//! # Swaptree Pricing
//!
//! Bermudan swaption pricing on short-rate lattices, with exercise
//! probabilities and the exercise boundary of every exercise date.
//!
//! - **Instruments**: swap schedules, exercise styles, a vanilla swap builder
//! - **Discretized assets**: cash flow legs, swaps, coterminal swap strips
//!   and the swaption itself
//! - **Probabilities**: a forward sweep turning exercise records into
//!   exercise probabilities
//! - **Engine**: [`TreeSwaptionEngine`] running both passes and publishing
//!   `"ExerciseProbabilityAndSwapBoundary"`
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use swaptree_core::curves::FlatForward;
//! use swaptree_core::daycounts::Act365Fixed;
//! use swaptree_core::types::Date;
//! use swaptree_lattice::HullWhite;
//! use swaptree_pricing::prelude::*;
//!
//! let swap = VanillaSwapBuilder::new()
//!     .fixed_rate(0.04)
//!     .start(Date::from_ymd(2026, 1, 15).unwrap())
//!     .maturity(Date::from_ymd(2029, 1, 15).unwrap())
//!     .build()
//!     .unwrap();
//! let exercise = Exercise::bermudan(swap.fixed_reset_dates.clone()).unwrap();
//! let swaption = SwaptionArguments::new(swap, exercise).unwrap();
//!
//! let engine = TreeSwaptionEngine::new(
//!     Arc::new(HullWhite::default_params()),
//!     Arc::new(FlatForward::new(0.04)),
//!     TreeEngineConfig::default(),
//! );
//! let results = engine
//!     .calculate(&swaption, Date::from_ymd(2025, 1, 15).unwrap(), &Act365Fixed)
//!     .unwrap();
//!
//! let boundary = results
//!     .additional_results
//!     .exercise_probability_and_swap_boundary()
//!     .unwrap();
//! assert_eq!(boundary.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_lines)]

pub mod builder;
pub mod config;
pub mod discretized;
pub mod engine;
pub mod error;
pub mod instruments;
pub mod probability;
pub mod results;

pub use builder::VanillaSwapBuilder;
pub use config::{TreeEngineConfig, UnderlyingKind, Validate, ValidationError};
pub use discretized::{
    CashflowLeg, CoterminalSwapStrip, DiscretizedSwap, DiscretizedSwaption, ExerciseBoundary,
    ExerciseRecord, SwaptionUnderlying,
};
pub use engine::{ExerciseReport, SwaptionResults, TreeSwaptionEngine};
pub use error::{PricingError, PricingResult};
pub use instruments::{Exercise, ExerciseType, SwapArguments, SwapType, SwaptionArguments};
pub use probability::{CumulativeProbabilityCalculator, CumulativeProbabilityTable};
pub use results::{AdditionalResults, ResultValue, EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY, NPV};

/// Prelude module for convenient imports.
pub mod prelude {
    // Instruments
    pub use crate::builder::VanillaSwapBuilder;
    pub use crate::instruments::{Exercise, ExerciseType, SwapArguments, SwapType, SwaptionArguments};

    // Discretized assets
    pub use crate::discretized::{
        CashflowLeg, CoterminalSwapStrip, DiscretizedSwap, DiscretizedSwaption, ExerciseBoundary,
        ExerciseRecord, SwaptionUnderlying,
    };

    // Pricing
    pub use crate::config::{TreeEngineConfig, UnderlyingKind, Validate, ValidationError};
    pub use crate::engine::{ExerciseReport, SwaptionResults, TreeSwaptionEngine};
    pub use crate::probability::{CumulativeProbabilityCalculator, CumulativeProbabilityTable};
    pub use crate::results::{
        AdditionalResults, ResultValue, EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY, NPV,
    };

    // Errors
    pub use crate::error::{PricingError, PricingResult};

    // Lattice framework
    pub use swaptree_lattice::DiscretizedAsset;
}
