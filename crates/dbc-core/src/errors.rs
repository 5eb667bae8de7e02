//! # Core Error Types
//!
//! Typed failures for every quote and fee computation. All of them are
//! returned to the immediate caller; none are retried.

use thiserror::Error;

/// Errors raised by the quote engine and its numerics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub enum DbcCoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math overflow")]
    MathOverflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid price")]
    InvalidPrice,

    // ========================================================================
    // Configuration Errors
    // ========================================================================

    #[error("Invalid collect fee mode")]
    InvalidCollectFeeMode,

    #[error("Invalid fee scheduler mode")]
    InvalidFeeSchedulerMode,

    #[error("Invalid activation type")]
    InvalidActivationType,

    #[error("Invalid curve: {0}")]
    InvalidCurve(&'static str),

    #[error("Too many curve points: {0} (max {1})")]
    TooManyCurvePoints(usize, usize),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ========================================================================
    // Trading Errors
    // ========================================================================

    #[error("Not enough liquidity")]
    NotEnoughLiquidity,

    #[error("Pool is completed")]
    PoolCompleted,

    #[error("Amount is zero")]
    AmountIsZero,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, DbcCoreError>;

// Helper functions for creating specific errors
impl DbcCoreError {
    /// Create a too many curve points error
    pub fn too_many_curve_points(actual: usize, max: usize) -> Self {
        Self::TooManyCurvePoints(actual, max)
    }

    /// Create an invalid curve error with reason
    pub fn invalid_curve(reason: &'static str) -> Self {
        Self::InvalidCurve(reason)
    }

    /// Create a configuration error naming the offending field
    pub fn invalid_configuration(field: &str, value: &str, expected: &str) -> Self {
        Self::InvalidConfiguration(format!(
            "{} = {} (expected {})",
            field, value, expected
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DbcCoreError::too_many_curve_points(21, 20);
        assert_eq!(format!("{}", err), "Too many curve points: 21 (max 20)");

        let err = DbcCoreError::invalid_curve("sqrt prices must increase");
        assert_eq!(format!("{}", err), "Invalid curve: sqrt prices must increase");
    }

    #[test]
    fn test_configuration_error_message() {
        let err = DbcCoreError::invalid_configuration("default_slippage_bps", "20000", "at most 10000");
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: default_slippage_bps = 20000 (expected at most 10000)"
        );
    }
}
