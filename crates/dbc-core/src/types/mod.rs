//! # Core Types
//!
//! Pool snapshots, fee settings and trade values shared by the math and
//! quote modules.

pub mod curve;
pub mod fees;
pub mod pool;
pub mod swap;

pub use curve::*;
pub use fees::*;
pub use pool::*;
pub use swap::*;
