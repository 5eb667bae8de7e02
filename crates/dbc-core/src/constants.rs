//! # Protocol Constants
//!
//! Fixed numeric constants shared with the settlement program:
//! - Fixed-point scales (Q64.64 and the doubled 128-bit resolution)
//! - Exponentiation bounds
//! - Fee denominators and caps
//! - Curve shape limits (point count, sqrt price range)
//! - Token supply bounds

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Number of fractional bits in a Q64.64 value
pub const SCALE_OFFSET: u32 = 64;

/// Q64 fixed-point scale factor: 2^64
pub const Q64: u128 = 1u128 << SCALE_OFFSET;

/// 1.0 in Q64.64
pub const ONE_Q64: u128 = Q64;

/// Resolution of sqrt prices. Products of two sqrt-price-scaled values carry
/// `RESOLUTION * 2` fractional bits.
pub const RESOLUTION: u32 = 64;

/// Exclusive bound on |exponent| accepted by `pow`
pub const MAX_EXPONENTIAL: u128 = 0x100000;

/// Number of exponent bits walked by binary exponentiation
pub const EXPONENT_BITS: u32 = 20;

// ============================================================================
// Fee Constants
// ============================================================================

/// Basis points denominator (10,000 = 100%)
pub const BASIS_POINT_MAX: u64 = 10_000;

/// Denominator for every fee numerator
pub const FEE_DENOMINATOR: u64 = BASIS_POINT_MAX;

/// Upper bound on the total trading fee numerator (100%)
pub const MAX_FEE_NUMERATOR: u64 = BASIS_POINT_MAX;

/// Denominator for protocol and referral fee percentages
pub const FEE_PERCENT_DENOMINATOR: u64 = 100;

/// Scale-down divisor for the squared variable fee term
pub const DYNAMIC_FEE_SCALING_FACTOR: u128 = 100_000_000_000;

/// Added before dividing by `DYNAMIC_FEE_SCALING_FACTOR` to round up
pub const DYNAMIC_FEE_ROUNDING_OFFSET: u128 = 99_999_999_999;

// ============================================================================
// Curve Constants
// ============================================================================

/// Fixed number of points stored in a pool's curve
pub const MAX_CURVE_POINT: usize = 20;

/// Minimum sqrt price in Q64 format
pub const MIN_SQRT_PRICE: u128 = 4_295_048_016;

/// Maximum sqrt price in Q64 format. Also the sentinel price for unused curve slots.
pub const MAX_SQRT_PRICE: u128 = 79_226_673_521_066_979_257_578_248_091;

// ============================================================================
// Supply Constants
// ============================================================================

/// Maximum token supply in whole tokens (before applying decimals)
pub const MAX_TOKEN_SUPPLY: u64 = 10_000_000_000;

/// Buffer applied on top of the base token a pool needs: 5/4 = 125%
pub const SUPPLY_BUFFER_NUMERATOR: u128 = 5;
pub const SUPPLY_BUFFER_DENOMINATOR: u128 = 4;

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a whole number to Q64.64
pub const fn q64(value: u64) -> u128 {
    (value as u128) << SCALE_OFFSET
}
