//! # Curve Math
//!
//! Closed-form amounts and prices inside one constant-liquidity segment.
//!
//! Prices are Q64.64 square roots and liquidity is Q64.64 as well, so the
//! quote delta `L * (upper - lower)` carries 128 fractional bits and the base
//! delta `L * (upper - lower) / (upper * lower)` carries none.
//!
//! Callers choose the rounding direction. Amounts the trader pays round up,
//! amounts the trader receives round down.

use ethnum::U256;

use crate::constants::RESOLUTION;
use crate::errors::{CoreResult, DbcCoreError};
use crate::math::big_int::{mul_div_u256, u256_to_u128, u256_to_u64, Rounding};
use crate::math::safe_math::safe_add_u128;

/// Fractional bits of a price times liquidity product
const PRODUCT_OFFSET: u32 = RESOLUTION * 2;

fn validate_range(lower_sqrt_price: u128, upper_sqrt_price: u128, liquidity: u128) -> CoreResult<()> {
    if liquidity == 0 {
        return Err(DbcCoreError::MathOverflow);
    }
    if lower_sqrt_price >= upper_sqrt_price {
        return Err(DbcCoreError::InvalidPrice);
    }
    Ok(())
}

/// Base token between two prices:
/// `liquidity * (upper - lower) / (upper * lower)`
pub fn get_delta_amount_base(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round_up: bool,
) -> CoreResult<u64> {
    validate_range(lower_sqrt_price, upper_sqrt_price, liquidity)?;
    if lower_sqrt_price == 0 {
        return Err(DbcCoreError::DivisionByZero);
    }

    let denominator = U256::from(lower_sqrt_price)
        .checked_mul(U256::from(upper_sqrt_price))
        .ok_or(DbcCoreError::MathOverflow)?;

    let result = mul_div_u256(
        U256::from(liquidity),
        U256::from(upper_sqrt_price - lower_sqrt_price),
        denominator,
        Rounding::from_round_up(round_up),
    )?;

    u256_to_u64(result)
}

/// Quote token between two prices:
/// `liquidity * (upper - lower) >> 128`
pub fn get_delta_amount_quote(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    round_up: bool,
) -> CoreResult<u64> {
    validate_range(lower_sqrt_price, upper_sqrt_price, liquidity)?;

    let product = U256::from(liquidity)
        .checked_mul(U256::from(upper_sqrt_price - lower_sqrt_price))
        .ok_or(DbcCoreError::MathOverflow)?;

    let mut result = product >> PRODUCT_OFFSET;
    if round_up {
        let remainder_mask = (U256::ONE << PRODUCT_OFFSET) - U256::ONE;
        if product & remainder_mask != U256::ZERO {
            result += U256::ONE;
        }
    }

    u256_to_u64(result)
}

/// Price after selling `amount_in` base into a segment. Moves the price down:
/// `liquidity * sqrt_price / (liquidity + amount_in * sqrt_price)`
pub fn get_next_sqrt_price_from_amount_base(
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u64,
    round_up: bool,
) -> CoreResult<u128> {
    if amount_in == 0 {
        return Ok(sqrt_price);
    }
    if sqrt_price == 0 || liquidity == 0 {
        return Err(DbcCoreError::DivisionByZero);
    }

    let product = U256::from(amount_in)
        .checked_mul(U256::from(sqrt_price))
        .ok_or(DbcCoreError::MathOverflow)?;
    let denominator = U256::from(liquidity)
        .checked_add(product)
        .ok_or(DbcCoreError::MathOverflow)?;

    let result = mul_div_u256(
        U256::from(liquidity),
        U256::from(sqrt_price),
        denominator,
        Rounding::from_round_up(round_up),
    )?;

    u256_to_u128(result)
}

/// Price after buying with `amount_in` quote. Moves the price up:
/// `sqrt_price + (amount_in << 128) / liquidity`, rounded down
pub fn get_next_sqrt_price_from_amount_quote(
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u64,
) -> CoreResult<u128> {
    if liquidity == 0 {
        return Err(DbcCoreError::DivisionByZero);
    }

    let quotient = (U256::from(amount_in) << PRODUCT_OFFSET) / U256::from(liquidity);
    safe_add_u128(sqrt_price, u256_to_u128(quotient)?)
}
