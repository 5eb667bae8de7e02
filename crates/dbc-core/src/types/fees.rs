//! # Fee Types
//!
//! Fee configuration snapshots read from a pool config, and the enumerations
//! that select how the schedule decays and which side of a trade pays.

use crate::errors::DbcCoreError;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// How the base fee decays once the pool activates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FeeSchedulerMode {
    /// `cliff - period * reduction_factor`
    Linear = 0,
    /// `cliff * (1 - reduction_factor / 10_000)^period`
    Exponential = 1,
}

impl TryFrom<u8> for FeeSchedulerMode {
    type Error = DbcCoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FeeSchedulerMode::Linear),
            1 => Ok(FeeSchedulerMode::Exponential),
            _ => Err(DbcCoreError::InvalidFeeSchedulerMode),
        }
    }
}

/// Which token fees are collected in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum CollectFeeMode {
    /// Fees are always taken in the quote token
    QuoteToken = 0,
    /// Fees are taken from whichever token the trader receives
    OutputToken = 1,
}

impl TryFrom<u8> for CollectFeeMode {
    type Error = DbcCoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CollectFeeMode::QuoteToken),
            1 => Ok(CollectFeeMode::OutputToken),
            _ => Err(DbcCoreError::InvalidCollectFeeMode),
        }
    }
}

/// What to do when a linear schedule reduces the fee below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "client", serde(rename_all = "snake_case"))]
pub enum LinearFeeUnderflow {
    /// Fail with `MathOverflow`, as a checked subtraction would
    #[default]
    Error,
    /// Clamp the fee numerator at zero
    Saturate,
}

/// Base fee schedule parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct BaseFeeParameters {
    /// Fee numerator at activation (over `FEE_DENOMINATOR`)
    pub cliff_fee_numerator: u64,
    /// Number of decay periods before the fee stops falling
    pub number_of_period: u16,
    /// Length of one period in slots or seconds. Zero means a flat fee.
    pub period_frequency: u64,
    /// Per-period reduction: absolute numerator (linear) or basis points (exponential)
    pub reduction_factor: u64,
    /// Raw `FeeSchedulerMode`
    pub fee_scheduler_mode: u8,
}

/// Volatility-driven fee parameters plus the live accumulator state the
/// settlement program maintains. Only ever read as a snapshot here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct DynamicFeeParameters {
    pub initialized: bool,
    pub max_volatility_accumulator: u32,
    pub variable_fee_control: u32,
    /// Bin step in basis points
    pub bin_step: u16,
    /// Window (seconds) inside which trades do not move the references
    pub filter_period: u16,
    /// Window (seconds) after which the volatility reference resets
    pub decay_period: u16,
    /// Basis points of the accumulator carried into the reference
    pub reduction_factor: u16,
    pub last_update_timestamp: u64,
    pub sqrt_price_reference: u128,
    pub volatility_accumulator: u128,
    pub volatility_reference: u128,
}

/// All fee settings of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolFees {
    pub base_fee: BaseFeeParameters,
    pub dynamic_fee: DynamicFeeParameters,
    /// Percent (0-100) of the trading fee routed to the protocol
    pub protocol_fee_percent: u8,
    /// Percent (0-100) of the protocol fee routed to a referrer
    pub referral_fee_percent: u8,
}

/// An amount with its fee split applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct FeeOnAmountResult {
    /// Amount left after every fee
    pub amount: u64,
    /// Trading fee share kept by the pool
    pub trading_fee: u64,
    /// Protocol share, after the referral cut
    pub protocol_fee: u64,
    /// Referral share
    pub referral_fee: u64,
}

impl FeeOnAmountResult {
    /// Sum of every fee component
    pub fn total_fee(&self) -> u64 {
        self.trading_fee
            .saturating_add(self.protocol_fee)
            .saturating_add(self.referral_fee)
    }
}
