//! # Safe Math Operations
//!
//! Overflow-checked arithmetic. Silent wraparound would break parity with
//! the settlement program, so every step that can leave its range goes
//! through one of these helpers.

use crate::errors::{CoreResult, DbcCoreError};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Checked arithmetic, failing when the result leaves the type's range
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };

    // Division operations with zero check
    (div, $fn_name:ident, $type:ty) => {
        /// Safe division with zero check
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            if b == 0 {
                return Err(DbcCoreError::DivisionByZero);
            }
            Ok(a / b)
        }
    };

    // Shift operations
    (shift, $fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Checked shift, failing when the shift exceeds the bit width
        pub fn $fn_name(value: $type, shift: u32) -> CoreResult<$type> {
            value.$checked_method(shift).ok_or($error)
        }
    };
}

// Generate basic arithmetic functions
safe_arith!(safe_add_u64, u64, checked_add, DbcCoreError::MathOverflow);
safe_arith!(safe_sub_u64, u64, checked_sub, DbcCoreError::MathOverflow);
safe_arith!(safe_mul_u64, u64, checked_mul, DbcCoreError::MathOverflow);
safe_arith!(div, safe_div_u64, u64);

safe_arith!(safe_add_u128, u128, checked_add, DbcCoreError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, DbcCoreError::MathOverflow);
safe_arith!(safe_mul_u128, u128, checked_mul, DbcCoreError::MathOverflow);
safe_arith!(div, safe_div_u128, u128);

// Generate shift operations
safe_arith!(shift, safe_shl_u128, u128, checked_shl, DbcCoreError::MathOverflow);

/// Narrow a u128 to u64
pub fn safe_cast_u128_to_u64(value: u128) -> CoreResult<u64> {
    u64::try_from(value).map_err(|_| DbcCoreError::MathOverflow)
}

/// Narrow a u64 to u16
pub fn safe_cast_u64_to_u16(value: u64) -> CoreResult<u16> {
    u16::try_from(value).map_err(|_| DbcCoreError::MathOverflow)
}
