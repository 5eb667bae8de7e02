//! # DBC Core - Bonding Curve Quotes and Fees
//!
//! Off-chain quoting for a segmented-liquidity bonding curve. Given a pool
//! config and virtual pool snapshot, it computes what an exact-in trade would
//! return, where the price would land, and how the fee splits, with the same
//! integer arithmetic the settlement program uses.
//!
//! - Q64.64 fixed-point helpers and checked wide-integer math
//! - Base fee schedules (flat, linear, exponential) and the volatility fee
//! - Per-segment curve formulas and the multi-segment quote walk
//! - Config derivations: supply, migration completion, curve normalization
//!
//! ## Feature Flags
//!
//! - `client` (default): serde derives on all snapshot types and TOML loading
//!   of `QuoterConfig`

pub mod config;
pub mod constants;
pub mod derivation;
pub mod errors;
pub mod math;
pub mod oracle;
pub mod quote;
pub mod types;

// Re-export commonly used items
pub use config::QuoterConfig;
pub use constants::*;
pub use errors::{CoreResult, DbcCoreError};
pub use quote::{quote_exact_in, SwapQuoter};
pub use types::*;
