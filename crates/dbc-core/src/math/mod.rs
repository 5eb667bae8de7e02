//! # Mathematical Functions
//!
//! Checked integer arithmetic, Q64.64 exponentiation, the fee schedule and
//! the per-segment curve formulas.

pub mod big_int;
pub mod curve_math;
pub mod fee_math;
pub mod fixed_point;
pub mod safe_math;

// Re-export commonly used functions
pub use big_int::*;
pub use curve_math::*;
pub use fee_math::*;
pub use fixed_point::*;
pub use safe_math::*;
