//! The asset a swaption exercises into.

use swaptree_lattice::{AssetState, DiscretizedAsset};

use super::strip::CoterminalSwapStrip;
use super::swap::DiscretizedSwap;
use crate::error::{PricingError, PricingResult};

const SWAP: &str = "discretized swap";
const STRIP: &str = "coterminal swap strip";

/// Underlying of a discretized swaption.
#[derive(Debug, Clone)]
pub enum SwaptionUnderlying {
    /// A single swap exercised into on every date.
    Swap(DiscretizedSwap),
    /// One coterminal swap per exercise date.
    Strip(CoterminalSwapStrip),
}

impl SwaptionUnderlying {
    /// Name of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SwaptionUnderlying::Swap(_) => SWAP,
            SwaptionUnderlying::Strip(_) => STRIP,
        }
    }

    /// The single swap.
    pub fn as_swap(&self) -> PricingResult<&DiscretizedSwap> {
        match self {
            SwaptionUnderlying::Swap(swap) => Ok(swap),
            SwaptionUnderlying::Strip(_) => Err(PricingError::UnderlyingMismatch {
                expected: SWAP,
                found: STRIP,
            }),
        }
    }

    /// The coterminal swap strip.
    pub fn as_swap_strip(&self) -> PricingResult<&CoterminalSwapStrip> {
        match self {
            SwaptionUnderlying::Strip(strip) => Ok(strip),
            SwaptionUnderlying::Swap(_) => Err(PricingError::UnderlyingMismatch {
                expected: STRIP,
                found: SWAP,
            }),
        }
    }

    /// Swap entered when exercising on the `index`-th exercise date.
    pub fn exercise_swap(&self, index: usize) -> PricingResult<&DiscretizedSwap> {
        match self {
            SwaptionUnderlying::Swap(swap) => Ok(swap),
            SwaptionUnderlying::Strip(strip) => {
                strip
                    .swap(index)
                    .ok_or(PricingError::ExerciseIndexOutOfRange {
                        index,
                        count: strip.len(),
                    })
            }
        }
    }
}

impl DiscretizedAsset for SwaptionUnderlying {
    type Error = PricingError;

    fn state(&self) -> &AssetState {
        match self {
            SwaptionUnderlying::Swap(swap) => swap.state(),
            SwaptionUnderlying::Strip(strip) => strip.state(),
        }
    }

    fn state_mut(&mut self) -> &mut AssetState {
        match self {
            SwaptionUnderlying::Swap(swap) => swap.state_mut(),
            SwaptionUnderlying::Strip(strip) => strip.state_mut(),
        }
    }

    fn reset(&mut self, size: usize) -> PricingResult<()> {
        match self {
            SwaptionUnderlying::Swap(swap) => swap.reset(size),
            SwaptionUnderlying::Strip(strip) => strip.reset(size),
        }
    }

    fn mandatory_times(&self) -> Vec<f64> {
        match self {
            SwaptionUnderlying::Swap(swap) => swap.mandatory_times(),
            SwaptionUnderlying::Strip(strip) => strip.mandatory_times(),
        }
    }

    fn pre_adjust_values_impl(&mut self) -> PricingResult<()> {
        match self {
            SwaptionUnderlying::Swap(swap) => swap.pre_adjust_values_impl(),
            SwaptionUnderlying::Strip(strip) => strip.pre_adjust_values_impl(),
        }
    }

    fn post_adjust_values_impl(&mut self) -> PricingResult<()> {
        match self {
            SwaptionUnderlying::Swap(swap) => swap.post_adjust_values_impl(),
            SwaptionUnderlying::Strip(strip) => strip.post_adjust_values_impl(),
        }
    }
}
