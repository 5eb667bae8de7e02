//! # Fixed-Point Arithmetic
//!
//! Q64.64 exponentiation and the conversions used to present prices.
//!
//! `pow` reproduces the settlement program's binary exponentiation step for
//! step: every multiply is truncated back to Q64.64 with a 64-bit right
//! shift, and bases at or above 1.0 are inverted first so that the squared
//! intermediates stay below 1.0 and never need more than 128 bits.

use crate::constants::{EXPONENT_BITS, MAX_EXPONENTIAL, ONE_Q64, Q64, SCALE_OFFSET};
use crate::errors::{CoreResult, DbcCoreError};
use crate::math::safe_math::{safe_div_u128, safe_mul_u128};

// ============================================================================
// Exponentiation
// ============================================================================

/// Calculate `base^exponent` where `base` is Q64.64 and `exponent` is a plain integer.
///
/// Fails with `MathOverflow` when `|exponent| >= MAX_EXPONENTIAL` or when the
/// running result truncates to zero.
pub fn pow(base: u128, exponent: i128) -> CoreResult<u128> {
    if exponent == 0 {
        return Ok(ONE_Q64);
    }

    let mut invert = exponent.is_negative();
    let exponent = exponent.unsigned_abs();

    if exponent >= MAX_EXPONENTIAL {
        return Err(DbcCoreError::MathOverflow);
    }

    let mut squared_base = base;
    let mut result = ONE_Q64;

    // 1/base keeps every squared term below 1.0
    if squared_base >= result {
        squared_base = safe_div_u128(u128::MAX, squared_base)?;
        invert = !invert;
    }

    for bit in 0..EXPONENT_BITS {
        if exponent & (1u128 << bit) != 0 {
            result = safe_mul_u128(result, squared_base)? >> SCALE_OFFSET;
        }
        squared_base = safe_mul_u128(squared_base, squared_base)? >> SCALE_OFFSET;
    }

    if result == 0 {
        return Err(DbcCoreError::MathOverflow);
    }

    if invert {
        result = safe_div_u128(u128::MAX, result)?;
    }

    Ok(result)
}

// ============================================================================
// Fixed-Point Conversion Functions
// ============================================================================

/// Convert Q64.64 fixed-point to f64
pub fn q64_to_f64(value: u128) -> f64 {
    (value as f64) / (Q64 as f64)
}

/// Display price of the base token in quote token units.
///
/// `(sqrt_price / 2^64)^2` adjusted by `10^(base_decimal - quote_decimal)`.
/// Only for presentation: nothing feeds this value back into the curve math.
pub fn sqrt_price_to_price(sqrt_price: u128, base_decimal: u8, quote_decimal: u8) -> f64 {
    let sqrt = q64_to_f64(sqrt_price);
    let decimal_shift = base_decimal as i32 - quote_decimal as i32;
    sqrt * sqrt * 10f64.powi(decimal_shift)
}
