//! # Oracle Module
//!
//! Volatility state that drives the dynamic fee.

pub mod volatility;

pub use volatility::*;
