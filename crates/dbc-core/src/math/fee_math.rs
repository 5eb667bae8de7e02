//! # Fee Math
//!
//! Base fee schedule, volatility fee and the split of a fee between the pool,
//! the protocol and a referrer.
//!
//! Fee numerators are expressed over `FEE_DENOMINATOR` and never exceed
//! `MAX_FEE_NUMERATOR`.

use crate::constants::{
    BASIS_POINT_MAX, DYNAMIC_FEE_ROUNDING_OFFSET, DYNAMIC_FEE_SCALING_FACTOR, FEE_DENOMINATOR,
    FEE_PERCENT_DENOMINATOR, MAX_FEE_NUMERATOR, ONE_Q64, SCALE_OFFSET,
};
use crate::errors::{CoreResult, DbcCoreError};
use crate::math::big_int::{mul_div_u64, Rounding};
use crate::math::fixed_point::pow;
use crate::math::safe_math::{
    safe_add_u128, safe_cast_u128_to_u64, safe_cast_u64_to_u16, safe_div_u128, safe_mul_u128,
    safe_shl_u128, safe_sub_u128, safe_sub_u64,
};
use crate::types::fees::{
    BaseFeeParameters, DynamicFeeParameters, FeeOnAmountResult, FeeSchedulerMode,
    LinearFeeUnderflow, PoolFees,
};

// ============================================================================
// Base Fee Schedule
// ============================================================================

/// Number of elapsed decay periods, capped at `number_of_period`.
///
/// Before activation the schedule is treated as fully decayed.
pub fn get_elapsed_period(
    base_fee: &BaseFeeParameters,
    current_point: u64,
    activation_point: u64,
) -> CoreResult<u64> {
    let number_of_period = u64::from(base_fee.number_of_period);
    if current_point < activation_point {
        return Ok(number_of_period);
    }
    if base_fee.period_frequency == 0 {
        return Err(DbcCoreError::DivisionByZero);
    }
    let period = (current_point - activation_point) / base_fee.period_frequency;
    Ok(period.min(number_of_period))
}

/// Fee numerator after `period` exponential decay steps:
/// `cliff_fee_numerator * (1 - reduction_factor / 10_000)^period`
pub fn get_fee_in_period(cliff_fee_numerator: u64, reduction_factor: u64, period: u16) -> CoreResult<u64> {
    if reduction_factor == 0 {
        return Ok(cliff_fee_numerator);
    }

    let reduction_bps = safe_div_u128(
        safe_shl_u128(u128::from(reduction_factor), SCALE_OFFSET)?,
        u128::from(BASIS_POINT_MAX),
    )?;
    let base = safe_sub_u128(ONE_Q64, reduction_bps)?;
    let decay = pow(base, i128::from(period))?;

    let fee = safe_mul_u128(decay, u128::from(cliff_fee_numerator))? >> SCALE_OFFSET;
    safe_cast_u128_to_u64(fee)
}

/// Current base fee numerator, failing on a linear schedule that would go negative
pub fn get_current_base_fee_numerator(
    base_fee: &BaseFeeParameters,
    current_point: u64,
    activation_point: u64,
) -> CoreResult<u64> {
    get_current_base_fee_numerator_with_policy(
        base_fee,
        current_point,
        activation_point,
        LinearFeeUnderflow::Error,
    )
}

/// Current base fee numerator with an explicit linear underflow policy
pub fn get_current_base_fee_numerator_with_policy(
    base_fee: &BaseFeeParameters,
    current_point: u64,
    activation_point: u64,
    underflow: LinearFeeUnderflow,
) -> CoreResult<u64> {
    if base_fee.period_frequency == 0 {
        return Ok(base_fee.cliff_fee_numerator);
    }

    let period = get_elapsed_period(base_fee, current_point, activation_point)?;
    let mode = FeeSchedulerMode::try_from(base_fee.fee_scheduler_mode)?;

    let fee_numerator = match mode {
        FeeSchedulerMode::Linear => {
            let reduction = period.checked_mul(base_fee.reduction_factor);
            match underflow {
                LinearFeeUnderflow::Error => safe_sub_u64(
                    base_fee.cliff_fee_numerator,
                    reduction.ok_or(DbcCoreError::MathOverflow)?,
                )?,
                LinearFeeUnderflow::Saturate => reduction
                    .map(|reduction| base_fee.cliff_fee_numerator.saturating_sub(reduction))
                    .unwrap_or(0),
            }
        }
        FeeSchedulerMode::Exponential => {
            // period is capped by number_of_period, a u16
            let period = safe_cast_u64_to_u16(period)?;
            get_fee_in_period(base_fee.cliff_fee_numerator, base_fee.reduction_factor, period)?
        }
    };

    log::trace!(
        "base fee: mode={:?} period={} numerator={}",
        mode,
        period,
        fee_numerator
    );

    Ok(fee_numerator)
}

impl BaseFeeParameters {
    pub fn get_current_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
    ) -> CoreResult<u64> {
        get_current_base_fee_numerator(self, current_point, activation_point)
    }

    /// Fee charged at activation
    pub fn max_base_fee_numerator(&self) -> u64 {
        self.cliff_fee_numerator
    }

    /// Fee charged once every period has elapsed
    pub fn min_base_fee_numerator(&self) -> CoreResult<u64> {
        // a current point before activation selects the last period
        get_current_base_fee_numerator(self, 0, 1)
    }
}

// ============================================================================
// Dynamic Fee
// ============================================================================

/// Volatility fee numerator:
/// `ceil((volatility_accumulator * bin_step)^2 * variable_fee_control / 1e11)`
pub fn get_variable_fee(dynamic_fee: &DynamicFeeParameters) -> CoreResult<u128> {
    if !dynamic_fee.initialized {
        return Ok(0);
    }

    let volatility_bin = safe_mul_u128(
        dynamic_fee.volatility_accumulator,
        u128::from(dynamic_fee.bin_step),
    )?;
    let squared = safe_mul_u128(volatility_bin, volatility_bin)?;
    let variable_fee = safe_mul_u128(squared, u128::from(dynamic_fee.variable_fee_control))?;

    safe_div_u128(
        safe_add_u128(variable_fee, DYNAMIC_FEE_ROUNDING_OFFSET)?,
        DYNAMIC_FEE_SCALING_FACTOR,
    )
}

impl DynamicFeeParameters {
    pub fn get_variable_fee(&self) -> CoreResult<u128> {
        get_variable_fee(self)
    }
}

// ============================================================================
// Total Fee and Split
// ============================================================================

/// Base plus dynamic fee, capped at `MAX_FEE_NUMERATOR`
pub fn get_total_trading_fee(
    pool_fees: &PoolFees,
    current_point: u64,
    activation_point: u64,
    underflow: LinearFeeUnderflow,
) -> CoreResult<u64> {
    let base_fee = get_current_base_fee_numerator_with_policy(
        &pool_fees.base_fee,
        current_point,
        activation_point,
        underflow,
    )?;
    let variable_fee = get_variable_fee(&pool_fees.dynamic_fee)?;

    let total = safe_add_u128(u128::from(base_fee), variable_fee)?;
    let capped = total.min(u128::from(MAX_FEE_NUMERATOR));

    log::trace!(
        "trading fee: base={} variable={} total={}",
        base_fee,
        variable_fee,
        capped
    );

    safe_cast_u128_to_u64(capped)
}

/// Deduct the trading fee from `amount` and split it.
///
/// The gross fee rounds up. The protocol share is a percentage of the gross
/// fee and the referral share a percentage of the protocol share, both
/// rounding down.
pub fn get_fee_on_amount(
    pool_fees: &PoolFees,
    amount: u64,
    trade_fee_numerator: u64,
    has_referral: bool,
) -> CoreResult<FeeOnAmountResult> {
    let gross_fee = mul_div_u64(amount, trade_fee_numerator, FEE_DENOMINATOR, Rounding::Up)?;
    let amount = safe_sub_u64(amount, gross_fee)?;

    let protocol_fee = mul_div_u64(
        gross_fee,
        u64::from(pool_fees.protocol_fee_percent),
        FEE_PERCENT_DENOMINATOR,
        Rounding::Down,
    )?;
    let trading_fee = safe_sub_u64(gross_fee, protocol_fee)?;

    let referral_fee = if has_referral {
        mul_div_u64(
            protocol_fee,
            u64::from(pool_fees.referral_fee_percent),
            FEE_PERCENT_DENOMINATOR,
            Rounding::Down,
        )?
    } else {
        0
    };
    let protocol_fee = safe_sub_u64(protocol_fee, referral_fee)?;

    Ok(FeeOnAmountResult {
        amount,
        trading_fee,
        protocol_fee,
        referral_fee,
    })
}

impl PoolFees {
    pub fn get_total_trading_fee(
        &self,
        current_point: u64,
        activation_point: u64,
        underflow: LinearFeeUnderflow,
    ) -> CoreResult<u64> {
        get_total_trading_fee(self, current_point, activation_point, underflow)
    }

    pub fn get_fee_on_amount(
        &self,
        amount: u64,
        trade_fee_numerator: u64,
        has_referral: bool,
    ) -> CoreResult<FeeOnAmountResult> {
        get_fee_on_amount(self, amount, trade_fee_numerator, has_referral)
    }
}
