//! # Swaptree Lattice
//!
//! Short-rate lattices and the backward induction framework assets are
//! priced with.
//!
//! - **Time grids**: slice times containing every cash flow and exercise time
//! - **Lattices**: the [`Lattice`] trait, a node-by-node [`TabulatedLattice`]
//!   and the fitted Hull-White trinomial tree
//! - **Discretized assets**: rollback with pre- and post-adjustment hooks
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use swaptree_core::curves::FlatForward;
//! use swaptree_lattice::prelude::*;
//!
//! let grid = TimeGrid::with_mandatory_times(&[1.0, 2.0], 20).unwrap();
//! let curve = FlatForward::new(0.04);
//! let tree = HullWhite::new(0.05, 0.01).build_tree(&curve, &grid).unwrap();
//!
//! let mut bond = DiscountBond::new();
//! bond.initialize(Arc::clone(&tree), 2.0).unwrap();
//! let price = bond.present_value().unwrap();
//! assert!((price - (-0.08_f64).exp()).abs() < 1e-10);
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
#![allow(clippy::float_cmp)]

pub mod discretized;
pub mod error;
pub mod hull_white;
pub mod lattice;
pub mod math;
pub mod tabulated;
pub mod time_grid;
pub mod trinomial;

pub use discretized::{AssetState, DiscountBond, DiscretizedAsset};
pub use error::{LatticeError, LatticeResult};
pub use hull_white::{HullWhite, ShortRateModel, ShortRateTree};
pub use lattice::Lattice;
pub use math::close_enough;
pub use tabulated::{NodeTransitions, TabulatedLattice};
pub use time_grid::TimeGrid;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::discretized::{AssetState, DiscountBond, DiscretizedAsset};
    pub use crate::error::{LatticeError, LatticeResult};
    pub use crate::hull_white::{HullWhite, ShortRateModel, ShortRateTree};
    pub use crate::lattice::Lattice;
    pub use crate::math::close_enough;
    pub use crate::tabulated::{NodeTransitions, TabulatedLattice};
    pub use crate::time_grid::TimeGrid;
    pub use crate::trinomial::{OrnsteinUhlenbeck, TrinomialTree};
}
