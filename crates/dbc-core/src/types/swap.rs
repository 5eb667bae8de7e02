//! # Swap Types
//!
//! Trade requests and the quote handed back to the caller.

use crate::errors::{CoreResult, DbcCoreError};
use crate::types::fees::CollectFeeMode;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Direction of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum TradeDirection {
    /// Sell base, receive quote. Price moves down.
    BaseToQuote,
    /// Sell quote, receive base. Price moves up.
    QuoteToBase,
}

impl TradeDirection {
    pub fn from_swap_base_for_quote(swap_base_for_quote: bool) -> Self {
        if swap_base_for_quote {
            TradeDirection::BaseToQuote
        } else {
            TradeDirection::QuoteToBase
        }
    }
}

/// Where fees are deducted for one trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct FeeMode {
    /// Deduct from `amount_in` before walking the curve
    pub fees_on_input: bool,
    /// Fees end up denominated in the base token
    pub fees_on_base_token: bool,
    pub has_referral: bool,
}

impl FeeMode {
    /// Look up the fee mode for a raw collect-fee mode and a direction
    pub fn get_fee_mode(
        collect_fee_mode: u8,
        trade_direction: TradeDirection,
        has_referral: bool,
    ) -> CoreResult<FeeMode> {
        let collect_fee_mode = CollectFeeMode::try_from(collect_fee_mode)?;

        let (fees_on_input, fees_on_base_token) = match (collect_fee_mode, trade_direction) {
            (CollectFeeMode::QuoteToken, TradeDirection::BaseToQuote) => (false, false),
            (CollectFeeMode::QuoteToken, TradeDirection::QuoteToBase) => (true, false),
            (CollectFeeMode::OutputToken, TradeDirection::BaseToQuote) => (false, false),
            (CollectFeeMode::OutputToken, TradeDirection::QuoteToBase) => (false, true),
        };

        Ok(FeeMode {
            fees_on_input,
            fees_on_base_token,
            has_referral,
        })
    }
}

/// Trade request with slippage tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct SwapQuoteParams {
    pub swap_base_for_quote: bool,
    pub amount_in: u64,
    /// Tolerated shortfall of the output in basis points
    pub slippage_bps: u16,
    pub has_referral: bool,
    /// Current slot or timestamp, per the pool's activation type
    pub current_point: u64,
}

impl SwapQuoteParams {
    pub fn trade_direction(&self) -> TradeDirection {
        TradeDirection::from_swap_base_for_quote(self.swap_base_for_quote)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.amount_in == 0 {
            return Err(DbcCoreError::AmountIsZero);
        }
        if u64::from(self.slippage_bps) > crate::constants::BASIS_POINT_MAX {
            return Err(DbcCoreError::InvalidParameter("slippage_bps above 10000"));
        }
        Ok(())
    }
}

/// Fee components of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct FeeBreakdown {
    pub trading: u64,
    pub protocol: u64,
    pub referral: u64,
}

/// Display prices around a quote
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PriceBreakdown {
    pub before_swap: f64,
    pub after_swap: f64,
}

/// Result of quoting an exact-in trade
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct QuoteResult {
    pub amount_out: u64,
    pub minimum_amount_out: u64,
    pub next_sqrt_price: u128,
    pub fee: FeeBreakdown,
    pub price: PriceBreakdown,
}
