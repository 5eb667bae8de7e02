//! # Swap Quotes
//!
//! Exact-in quotes against a pool snapshot.
//!
//! A quote deducts fees on the side the pool's collect-fee mode selects and
//! walks the curve segment by segment: upward from the current price when
//! buying base, downward when selling it. Each segment either absorbs the
//! rest of the input, ending the walk at a price inside it, or is consumed to
//! its boundary. Nothing is written back to the snapshots.

use crate::config::QuoterConfig;
use crate::constants::BASIS_POINT_MAX;
use crate::errors::{CoreResult, DbcCoreError};
use crate::math::big_int::{mul_div_u64, Rounding};
use crate::math::curve_math::{
    get_delta_amount_base, get_delta_amount_quote, get_next_sqrt_price_from_amount_base,
    get_next_sqrt_price_from_amount_quote,
};
use crate::math::fixed_point::sqrt_price_to_price;
use crate::math::safe_math::{safe_add_u64, safe_sub_u64};
use crate::types::pool::{PoolConfig, VirtualPool};
use crate::types::swap::{
    FeeBreakdown, FeeMode, PriceBreakdown, QuoteResult, SwapQuoteParams, TradeDirection,
};

/// Outcome of walking the curve with the post-fee input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapAmount {
    pub output_amount: u64,
    pub next_sqrt_price: u128,
}

/// Quote engine holding caller-side settings
#[derive(Debug, Clone, Default)]
pub struct SwapQuoter {
    config: QuoterConfig,
}

impl SwapQuoter {
    pub fn new(config: QuoterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QuoterConfig {
        &self.config
    }

    /// Quote with the configured default slippage
    pub fn quote_exact_in(
        &self,
        pool: &VirtualPool,
        config: &PoolConfig,
        swap_base_for_quote: bool,
        amount_in: u64,
        has_referral: bool,
        current_point: u64,
    ) -> CoreResult<QuoteResult> {
        let params = SwapQuoteParams {
            swap_base_for_quote,
            amount_in,
            slippage_bps: self.config.default_slippage_bps,
            has_referral,
            current_point,
        };
        self.quote(pool, config, &params)
    }

    /// Quote an exact-in trade
    pub fn quote(
        &self,
        pool: &VirtualPool,
        config: &PoolConfig,
        params: &SwapQuoteParams,
    ) -> CoreResult<QuoteResult> {
        if config.is_curve_complete(pool.quote_reserve) {
            return Err(DbcCoreError::PoolCompleted);
        }
        config.validate_curve()?;
        params.validate()?;

        let trade_direction = params.trade_direction();
        let fee_mode = FeeMode::get_fee_mode(
            config.collect_fee_mode,
            trade_direction,
            params.has_referral,
        )?;

        log::debug!(
            "Quoting {:?} amount_in={} at sqrt_price={} ({:?})",
            trade_direction,
            params.amount_in,
            pool.sqrt_price,
            fee_mode
        );

        let trade_fee_numerator = config.pool_fees.get_total_trading_fee(
            params.current_point,
            pool.activation_point,
            self.config.linear_fee_underflow,
        )?;

        let input_fee = if fee_mode.fees_on_input {
            Some(config.pool_fees.get_fee_on_amount(
                params.amount_in,
                trade_fee_numerator,
                fee_mode.has_referral,
            )?)
        } else {
            None
        };
        let actual_amount_in = input_fee.map_or(params.amount_in, |fee| fee.amount);

        let swap = match trade_direction {
            TradeDirection::BaseToQuote => {
                get_swap_amount_from_base_to_quote(config, pool.sqrt_price, actual_amount_in)?
            }
            TradeDirection::QuoteToBase => {
                get_swap_amount_from_quote_to_base(config, pool.sqrt_price, actual_amount_in)?
            }
        };

        let (amount_out, fee) = match input_fee {
            Some(fee) => (swap.output_amount, fee),
            None => {
                let fee = config.pool_fees.get_fee_on_amount(
                    swap.output_amount,
                    trade_fee_numerator,
                    fee_mode.has_referral,
                )?;
                (fee.amount, fee)
            }
        };

        let minimum_amount_out = mul_div_u64(
            amount_out,
            BASIS_POINT_MAX - u64::from(params.slippage_bps),
            BASIS_POINT_MAX,
            Rounding::Down,
        )?;

        let result = QuoteResult {
            amount_out,
            minimum_amount_out,
            next_sqrt_price: swap.next_sqrt_price,
            fee: FeeBreakdown {
                trading: fee.trading_fee,
                protocol: fee.protocol_fee,
                referral: fee.referral_fee,
            },
            price: PriceBreakdown {
                before_swap: sqrt_price_to_price(
                    pool.sqrt_price,
                    config.token_decimal,
                    config.quote_token_decimal,
                ),
                after_swap: sqrt_price_to_price(
                    swap.next_sqrt_price,
                    config.token_decimal,
                    config.quote_token_decimal,
                ),
            },
        };

        log::debug!(
            "Quote: amount_out={} next_sqrt_price={} fee={:?}",
            result.amount_out,
            result.next_sqrt_price,
            result.fee
        );

        Ok(result)
    }
}

/// Quote with default settings
pub fn quote_exact_in(
    pool: &VirtualPool,
    config: &PoolConfig,
    swap_base_for_quote: bool,
    amount_in: u64,
    has_referral: bool,
    current_point: u64,
) -> CoreResult<QuoteResult> {
    SwapQuoter::default().quote_exact_in(
        pool,
        config,
        swap_base_for_quote,
        amount_in,
        has_referral,
        current_point,
    )
}

/// Walk the curve downward selling `amount_in` base
pub fn get_swap_amount_from_base_to_quote(
    config: &PoolConfig,
    sqrt_price: u128,
    amount_in: u64,
) -> CoreResult<SwapAmount> {
    let mut amount_left = amount_in;
    let mut total_output_amount = 0u64;
    let mut current_sqrt_price = sqrt_price;

    for segment in config.segments().rev() {
        if amount_left == 0 {
            break;
        }
        if segment.lower_sqrt_price >= current_sqrt_price {
            continue;
        }
        // No liquidity to sell into below this price
        if segment.liquidity == 0 {
            break;
        }
        if segment.lower_sqrt_price >= segment.upper_sqrt_price {
            return Err(DbcCoreError::InvalidPrice);
        }

        let max_amount_in = get_delta_amount_base(
            segment.lower_sqrt_price,
            current_sqrt_price,
            segment.liquidity,
            true,
        )?;

        if amount_left < max_amount_in {
            let next_sqrt_price = get_next_sqrt_price_from_amount_base(
                current_sqrt_price,
                segment.liquidity,
                amount_left,
                true,
            )?;
            let output_amount = if next_sqrt_price < current_sqrt_price {
                get_delta_amount_quote(next_sqrt_price, current_sqrt_price, segment.liquidity, false)?
            } else {
                0
            };

            log::trace!(
                "segment {}: partial fill in={} out={}",
                segment.index,
                amount_left,
                output_amount
            );

            total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
            current_sqrt_price = next_sqrt_price;
            amount_left = 0;
        } else {
            let output_amount = get_delta_amount_quote(
                segment.lower_sqrt_price,
                current_sqrt_price,
                segment.liquidity,
                false,
            )?;

            log::trace!(
                "segment {}: crossed in={} out={}",
                segment.index,
                max_amount_in,
                output_amount
            );

            total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
            current_sqrt_price = segment.lower_sqrt_price;
            amount_left = safe_sub_u64(amount_left, max_amount_in)?;
        }
    }

    // The start price is a floor: below it the pool holds no quote, so a sell
    // that would cross it is rejected rather than partially filled
    if amount_left != 0 {
        return Err(DbcCoreError::NotEnoughLiquidity);
    }

    Ok(SwapAmount {
        output_amount: total_output_amount,
        next_sqrt_price: current_sqrt_price,
    })
}

/// Walk the curve upward spending `amount_in` quote
pub fn get_swap_amount_from_quote_to_base(
    config: &PoolConfig,
    sqrt_price: u128,
    amount_in: u64,
) -> CoreResult<SwapAmount> {
    let mut amount_left = amount_in;
    let mut total_output_amount = 0u64;
    let mut current_sqrt_price = sqrt_price;

    for segment in config.segments() {
        if amount_left == 0 {
            break;
        }
        // Padding marks the end of the curve
        if segment.liquidity == 0 {
            break;
        }
        if segment.lower_sqrt_price >= segment.upper_sqrt_price {
            return Err(DbcCoreError::InvalidPrice);
        }
        if segment.upper_sqrt_price <= current_sqrt_price {
            continue;
        }

        let max_amount_in = get_delta_amount_quote(
            current_sqrt_price,
            segment.upper_sqrt_price,
            segment.liquidity,
            true,
        )?;

        if amount_left < max_amount_in {
            let next_sqrt_price = get_next_sqrt_price_from_amount_quote(
                current_sqrt_price,
                segment.liquidity,
                amount_left,
            )?;
            let output_amount = if next_sqrt_price > current_sqrt_price {
                get_delta_amount_base(current_sqrt_price, next_sqrt_price, segment.liquidity, false)?
            } else {
                0
            };

            log::trace!(
                "segment {}: partial fill in={} out={}",
                segment.index,
                amount_left,
                output_amount
            );

            total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
            current_sqrt_price = next_sqrt_price;
            amount_left = 0;
        } else {
            let output_amount = get_delta_amount_base(
                current_sqrt_price,
                segment.upper_sqrt_price,
                segment.liquidity,
                false,
            )?;

            log::trace!(
                "segment {}: crossed in={} out={}",
                segment.index,
                max_amount_in,
                output_amount
            );

            total_output_amount = safe_add_u64(total_output_amount, output_amount)?;
            current_sqrt_price = segment.upper_sqrt_price;
            amount_left = safe_sub_u64(amount_left, max_amount_in)?;
        }
    }

    if amount_left != 0 {
        return Err(DbcCoreError::NotEnoughLiquidity);
    }

    Ok(SwapAmount {
        output_amount: total_output_amount,
        next_sqrt_price: current_sqrt_price,
    })
}
