//! Big integer operations for high-precision math
//!
//! Full-precision mul-div on 256-bit intermediates. Every product of two
//! 128-bit values fits in a `U256`, so the only failure modes are a zero
//! denominator or a quotient that does not fit the caller's target width.

use ethnum::U256;

use crate::errors::{CoreResult, DbcCoreError};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

impl Rounding {
    /// `Up` when `round_up` is set, `Down` otherwise
    pub fn from_round_up(round_up: bool) -> Self {
        if round_up {
            Rounding::Up
        } else {
            Rounding::Down
        }
    }
}

/// Multiply two values and divide by a third with specified rounding
/// result = (x * y) / denominator
pub fn mul_div_u256(x: U256, y: U256, denominator: U256, rounding: Rounding) -> CoreResult<U256> {
    if denominator == U256::ZERO {
        return Err(DbcCoreError::DivisionByZero);
    }

    let product = x.checked_mul(y).ok_or(DbcCoreError::MathOverflow)?;
    let quotient = product / denominator;

    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up => {
            if product % denominator != U256::ZERO {
                quotient
                    .checked_add(U256::ONE)
                    .ok_or(DbcCoreError::MathOverflow)
            } else {
                Ok(quotient)
            }
        }
    }
}

/// Multiply two u128 values and divide by a third with specified rounding
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    let result = mul_div_u256(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
        rounding,
    )?;
    u256_to_u128(result)
}

/// Multiply two u64 values and divide by a third with specified rounding
pub fn mul_div_u64(a: u64, b: u64, denominator: u64, rounding: Rounding) -> CoreResult<u64> {
    if denominator == 0 {
        return Err(DbcCoreError::DivisionByZero);
    }

    let product = (a as u128) * (b as u128);
    let quotient = product / (denominator as u128);
    let remainder = product % (denominator as u128);

    let mut result = quotient;
    if rounding == Rounding::Up && remainder > 0 {
        result = result.checked_add(1).ok_or(DbcCoreError::MathOverflow)?;
    }

    u64::try_from(result).map_err(|_| DbcCoreError::MathOverflow)
}

/// Shift `x` left by `offset` bits and divide by `y` with specified rounding
/// result = (x << offset) / y
pub fn shl_div_u128(x: u128, y: u128, offset: u32, rounding: Rounding) -> CoreResult<u128> {
    if y == 0 {
        return Err(DbcCoreError::DivisionByZero);
    }
    let scaled = U256::from(x)
        .checked_shl(offset)
        .ok_or(DbcCoreError::MathOverflow)?;
    let result = mul_div_u256(scaled, U256::ONE, U256::from(y), rounding)?;
    u256_to_u128(result)
}

/// Narrow a U256 to u128
pub fn u256_to_u128(value: U256) -> CoreResult<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(DbcCoreError::MathOverflow);
    }
    Ok(lo)
}

/// Narrow a U256 to u64
pub fn u256_to_u64(value: U256) -> CoreResult<u64> {
    let value = u256_to_u128(value)?;
    u64::try_from(value).map_err(|_| DbcCoreError::MathOverflow)
}
