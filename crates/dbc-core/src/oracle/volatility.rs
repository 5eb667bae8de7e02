//! # Volatility Accumulator
//!
//! Projection of the dynamic-fee volatility state across one swap.
//!
//! The settlement program refreshes the references before a swap and grows
//! the accumulator after it, measuring the move in bins of `bin_step` basis
//! points from the reference price. These functions reproduce that update on
//! a copy so a caller can see which dynamic fee the next trade will pay.

use crate::constants::{BASIS_POINT_MAX, ONE_Q64, SCALE_OFFSET};
use crate::errors::CoreResult;
use crate::math::big_int::{shl_div_u128, Rounding};
use crate::math::safe_math::{
    safe_add_u128, safe_div_u128, safe_mul_u128, safe_shl_u128, safe_sub_u128, safe_sub_u64,
};
use crate::types::fees::DynamicFeeParameters;

/// Bin step as a Q64.64 fraction
pub fn bin_step_u128(bin_step: u16) -> CoreResult<u128> {
    safe_div_u128(
        safe_shl_u128(u128::from(bin_step), SCALE_OFFSET)?,
        u128::from(BASIS_POINT_MAX),
    )
}

/// Number of bins between two sqrt prices, doubled to count in price bins
pub fn get_delta_bin_id(bin_step_u128: u128, sqrt_price_a: u128, sqrt_price_b: u128) -> CoreResult<u128> {
    let (upper_sqrt_price, lower_sqrt_price) = if sqrt_price_a > sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };

    let price_ratio = shl_div_u128(upper_sqrt_price, lower_sqrt_price, SCALE_OFFSET, Rounding::Down)?;
    let delta_bin_id = safe_div_u128(safe_sub_u128(price_ratio, ONE_Q64)?, bin_step_u128)?;

    safe_mul_u128(delta_bin_id, 2)
}

impl DynamicFeeParameters {
    /// Refresh the price and volatility references at the start of a swap
    pub fn update_references(&mut self, sqrt_price_current: u128, current_timestamp: u64) -> CoreResult<()> {
        let elapsed = safe_sub_u64(current_timestamp, self.last_update_timestamp)?;

        // Inside the filter window high-frequency trades keep the old references
        if elapsed < u64::from(self.filter_period) {
            return Ok(());
        }

        self.sqrt_price_reference = sqrt_price_current;
        self.volatility_reference = if elapsed < u64::from(self.decay_period) {
            safe_div_u128(
                safe_mul_u128(self.volatility_accumulator, u128::from(self.reduction_factor))?,
                u128::from(BASIS_POINT_MAX),
            )?
        } else {
            0
        };

        Ok(())
    }

    /// Grow the accumulator by the bins crossed since the reference price
    pub fn update_volatility_accumulator(&mut self, sqrt_price: u128) -> CoreResult<()> {
        let delta_bin_id = get_delta_bin_id(
            bin_step_u128(self.bin_step)?,
            sqrt_price,
            self.sqrt_price_reference,
        )?;

        let accumulator = safe_add_u128(
            self.volatility_reference,
            safe_mul_u128(delta_bin_id, u128::from(BASIS_POINT_MAX))?,
        )?;
        self.volatility_accumulator = accumulator.min(u128::from(self.max_volatility_accumulator));

        Ok(())
    }

    /// State the settlement program would store after a swap from
    /// `sqrt_price_before` to `sqrt_price_after` at `current_timestamp`.
    ///
    /// Uninitialized parameters are returned unchanged.
    pub fn project_after_swap(
        &self,
        sqrt_price_before: u128,
        sqrt_price_after: u128,
        current_timestamp: u64,
    ) -> CoreResult<Self> {
        let mut projected = *self;
        if !projected.initialized {
            return Ok(projected);
        }

        projected.update_references(sqrt_price_before, current_timestamp)?;
        projected.update_volatility_accumulator(sqrt_price_after)?;

        let crossed = get_delta_bin_id(
            bin_step_u128(projected.bin_step)?,
            sqrt_price_before,
            sqrt_price_after,
        )?;
        if crossed > 0 {
            projected.last_update_timestamp = current_timestamp;
        }

        log::trace!(
            "volatility projected: accumulator {} -> {}, reference {}",
            self.volatility_accumulator,
            projected.volatility_accumulator,
            projected.volatility_reference
        );

        Ok(projected)
    }
}
