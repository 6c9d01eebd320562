//! Domain types shared across the workspace.

mod date;
mod frequency;

pub use date::Date;
pub use frequency::Frequency;
