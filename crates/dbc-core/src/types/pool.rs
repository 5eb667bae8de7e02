//! # Pool Types
//!
//! Read-only snapshots of the two accounts the settlement program owns: the
//! immutable pool config and the mutable virtual pool. The quote engine
//! takes both by shared reference and never writes to them.

use crate::constants::MAX_CURVE_POINT;
use crate::errors::DbcCoreError;
use crate::types::curve::{CurvePoint, CurveSegment};
use crate::types::fees::PoolFees;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Unit of `activation_point` and `current_point`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ActivationType {
    #[default]
    Slot = 0,
    Timestamp = 1,
}

impl TryFrom<u8> for ActivationType {
    type Error = DbcCoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ActivationType::Slot),
            1 => Ok(ActivationType::Timestamp),
            _ => Err(DbcCoreError::InvalidActivationType),
        }
    }
}

/// Pool configuration snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolConfig {
    pub pool_fees: PoolFees,
    /// Raw `CollectFeeMode`
    pub collect_fee_mode: u8,
    pub activation_type: ActivationType,
    /// Base token decimals
    pub token_decimal: u8,
    /// Quote token decimals
    pub quote_token_decimal: u8,
    /// Quote reserve at which the pool completes and stops trading
    pub migration_quote_threshold: u64,
    /// Base token reserved for migration liquidity
    pub migration_base_threshold: u64,
    /// Lower bound of the first curve segment
    pub sqrt_start_price: u128,
    /// Ascending curve points, padded with `CurvePoint::PADDING`
    pub curve: [CurvePoint; MAX_CURVE_POINT],
}

impl PoolConfig {
    /// Segment closed by curve point `index`
    pub fn segment(&self, index: usize) -> Option<CurveSegment> {
        let point = self.curve.get(index)?;
        let lower_sqrt_price = if index == 0 {
            self.sqrt_start_price
        } else {
            self.curve[index - 1].sqrt_price
        };
        Some(CurveSegment {
            index,
            lower_sqrt_price,
            upper_sqrt_price: point.sqrt_price,
            liquidity: point.liquidity,
        })
    }

    /// Every segment in ascending price order
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = CurveSegment> + '_ {
        (0..MAX_CURVE_POINT).filter_map(move |index| self.segment(index))
    }

    /// Number of leading curve points that are set
    pub fn curve_point_count(&self) -> usize {
        self.curve
            .iter()
            .take_while(|point| !point.is_unset())
            .count()
    }
}

/// Cumulative fee counters kept by the settlement program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolMetrics {
    pub total_protocol_base_fee: u64,
    pub total_protocol_quote_fee: u64,
    pub total_trading_base_fee: u64,
    pub total_trading_quote_fee: u64,
}

/// Live pool state snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct VirtualPool {
    pub sqrt_price: u128,
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub activation_point: u64,
    pub metrics: PoolMetrics,
    pub is_migrated: bool,
    pub is_surplus_withdrawn: bool,
}
