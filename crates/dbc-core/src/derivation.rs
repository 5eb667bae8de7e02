//! # Config Derivation
//!
//! Values derived from a pool config: token supply, migration completion,
//! curve normalization and validation.

use crate::constants::{
    MAX_CURVE_POINT, MAX_FEE_NUMERATOR, MAX_SQRT_PRICE, MAX_TOKEN_SUPPLY, MIN_SQRT_PRICE,
    SUPPLY_BUFFER_DENOMINATOR, SUPPLY_BUFFER_NUMERATOR,
};
use crate::errors::{CoreResult, DbcCoreError};
use crate::math::curve_math::get_delta_amount_base;
use crate::math::safe_math::{
    safe_add_u128, safe_add_u64, safe_cast_u128_to_u64, safe_div_u128, safe_mul_u128,
    safe_mul_u64,
};
use crate::types::curve::CurvePoint;
use crate::types::fees::{CollectFeeMode, FeeSchedulerMode};
use crate::types::pool::PoolConfig;

/// Largest supply a token with `token_decimal` decimals may mint
pub fn max_supply(token_decimal: u8) -> CoreResult<u64> {
    let unit = 10u64
        .checked_pow(u32::from(token_decimal))
        .ok_or(DbcCoreError::MathOverflow)?;
    safe_mul_u64(unit, MAX_TOKEN_SUPPLY)
}

/// Base supply to mint: swap and migration amounts plus a 25% buffer
pub fn total_amount_with_buffer(swap_base_amount: u64, migration_base_threshold: u64) -> CoreResult<u64> {
    let total = safe_add_u128(u128::from(swap_base_amount), u128::from(migration_base_threshold))?;
    let buffered = safe_div_u128(
        safe_mul_u128(total, SUPPLY_BUFFER_NUMERATOR)?,
        SUPPLY_BUFFER_DENOMINATOR,
    )?;
    safe_cast_u128_to_u64(buffered)
}

/// Whether the pool has reached its migration threshold
pub fn is_curve_complete(config: &PoolConfig, quote_reserve: u64) -> bool {
    quote_reserve >= config.migration_quote_threshold
}

/// Copy `points` into a full curve array, padding unset trailing slots
pub fn normalize_curve(points: &[CurvePoint]) -> CoreResult<[CurvePoint; MAX_CURVE_POINT]> {
    if points.len() > MAX_CURVE_POINT {
        return Err(DbcCoreError::too_many_curve_points(points.len(), MAX_CURVE_POINT));
    }

    let mut curve = [CurvePoint::PADDING; MAX_CURVE_POINT];
    curve[..points.len()].copy_from_slice(points);

    for point in curve.iter_mut().rev() {
        if !point.is_unset() {
            break;
        }
        *point = CurvePoint::PADDING;
    }

    Ok(curve)
}

/// Check that `points` describe a usable curve starting at `sqrt_start_price`
pub fn validate_curve(sqrt_start_price: u128, points: &[CurvePoint]) -> CoreResult<()> {
    if points.is_empty() {
        return Err(DbcCoreError::invalid_curve("no curve points"));
    }
    if points.len() > MAX_CURVE_POINT {
        return Err(DbcCoreError::too_many_curve_points(points.len(), MAX_CURVE_POINT));
    }
    if !(MIN_SQRT_PRICE..MAX_SQRT_PRICE).contains(&sqrt_start_price) {
        return Err(DbcCoreError::invalid_curve("start price out of range"));
    }

    let mut lower_sqrt_price = sqrt_start_price;
    for point in points {
        if point.liquidity == 0 {
            return Err(DbcCoreError::invalid_curve("curve point without liquidity"));
        }
        if point.sqrt_price <= lower_sqrt_price {
            return Err(DbcCoreError::InvalidPrice);
        }
        if point.sqrt_price > MAX_SQRT_PRICE {
            return Err(DbcCoreError::invalid_curve("curve point above max price"));
        }
        lower_sqrt_price = point.sqrt_price;
    }

    // A full curve has no padding, so its last point closes at the max price
    if points.len() == MAX_CURVE_POINT && lower_sqrt_price != MAX_SQRT_PRICE {
        return Err(DbcCoreError::invalid_curve("full curve must end at max price"));
    }

    Ok(())
}

/// Base token the curve sells between its start price and `sqrt_migration_price`.
///
/// Rounded up per segment, so the minted supply always covers the curve.
pub fn swap_base_amount(config: &PoolConfig, sqrt_migration_price: u128) -> CoreResult<u64> {
    let mut total = 0u64;

    for segment in config.segments() {
        if segment.liquidity == 0 || segment.lower_sqrt_price >= sqrt_migration_price {
            break;
        }

        let upper_sqrt_price = segment.upper_sqrt_price.min(sqrt_migration_price);
        let amount = get_delta_amount_base(
            segment.lower_sqrt_price,
            upper_sqrt_price,
            segment.liquidity,
            true,
        )?;
        total = safe_add_u64(total, amount)?;
    }

    Ok(total)
}

impl PoolConfig {
    /// Check the set curve points and that only padding follows them
    pub fn validate_curve(&self) -> CoreResult<()> {
        let count = self.curve_point_count();
        validate_curve(self.sqrt_start_price, &self.curve[..count])?;
        if self.curve[count..].iter().any(|point| !point.is_unset()) {
            return Err(DbcCoreError::invalid_curve("curve point after padding"));
        }
        Ok(())
    }

    /// Reject configs the quote engine cannot price
    pub fn validate(&self) -> CoreResult<()> {
        self.validate_curve()?;

        if self.migration_quote_threshold == 0 {
            return Err(DbcCoreError::InvalidParameter("migration_quote_threshold is zero"));
        }

        CollectFeeMode::try_from(self.collect_fee_mode)?;

        let fees = &self.pool_fees;
        if fees.protocol_fee_percent > 100 || fees.referral_fee_percent > 100 {
            return Err(DbcCoreError::InvalidParameter("fee percent above 100"));
        }
        if fees.base_fee.cliff_fee_numerator > MAX_FEE_NUMERATOR {
            return Err(DbcCoreError::InvalidParameter("cliff fee above max"));
        }
        if fees.base_fee.period_frequency != 0 {
            FeeSchedulerMode::try_from(fees.base_fee.fee_scheduler_mode)?;
            fees.base_fee.min_base_fee_numerator()?;
        }

        Ok(())
    }

    pub fn is_curve_complete(&self, quote_reserve: u64) -> bool {
        is_curve_complete(self, quote_reserve)
    }
}
