//! # Curve Types
//!
//! A bonding curve is a fixed-size array of price points. Point `k` closes
//! the segment that starts at the previous point (or at the pool's start
//! price for `k == 0`) and carries the liquidity of that segment.

use crate::constants::MAX_SQRT_PRICE;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Upper sqrt price of a segment and the liquidity below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    /// Segment upper bound in Q64
    pub sqrt_price: u128,
    /// Liquidity inside the segment
    pub liquidity: u128,
}

impl CurvePoint {
    /// Filler for unused trailing slots
    pub const PADDING: CurvePoint = CurvePoint {
        sqrt_price: MAX_SQRT_PRICE,
        liquidity: 0,
    };

    pub const fn new(sqrt_price: u128, liquidity: u128) -> Self {
        Self {
            sqrt_price,
            liquidity,
        }
    }

    /// Unused slot: never set, or padded
    pub fn is_unset(&self) -> bool {
        self.sqrt_price == 0 || self.liquidity == 0
    }
}

/// Constant-liquidity interval `[lower_sqrt_price, upper_sqrt_price)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSegment {
    /// Index of the curve point that closes this segment
    pub index: usize,
    pub lower_sqrt_price: u128,
    pub upper_sqrt_price: u128,
    pub liquidity: u128,
}
