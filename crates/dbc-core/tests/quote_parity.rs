//! # Quote Parity Tests
//!
//! End-to-end quotes checked against the single-segment formulas they must
//! reduce to, so the engine and the settlement program agree bit for bit.

use dbc_core::derivation::normalize_curve;
use dbc_core::math::*;
use dbc_core::*;

const LIQUIDITY: u128 = 1_000_000_000u128 << 64;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn single_segment_config(pool_fees: PoolFees, collect_fee_mode: u8) -> PoolConfig {
    PoolConfig {
        pool_fees,
        collect_fee_mode,
        activation_type: ActivationType::Timestamp,
        token_decimal: 6,
        quote_token_decimal: 6,
        migration_quote_threshold: 10_000_000_000,
        migration_base_threshold: 1_000_000,
        sqrt_start_price: q64(1),
        curve: normalize_curve(&[CurvePoint::new(q64(2), LIQUIDITY)]).unwrap(),
    }
}

fn pool_at(sqrt_price: u128) -> VirtualPool {
    VirtualPool {
        sqrt_price,
        base_reserve: 1_000_000_000,
        quote_reserve: 0,
        activation_point: 0,
        ..Default::default()
    }
}

fn flat_fees(cliff_fee_numerator: u64, protocol_fee_percent: u8, referral_fee_percent: u8) -> PoolFees {
    PoolFees {
        base_fee: BaseFeeParameters {
            cliff_fee_numerator,
            ..Default::default()
        },
        protocol_fee_percent,
        referral_fee_percent,
        ..Default::default()
    }
}

#[test]
fn test_zero_fee_quote_matches_segment_formulas() {
    init_logger();
    let config = single_segment_config(PoolFees::default(), 0);
    let pool = pool_at(q64(1));
    let amount_in = 1_000_000;

    let result = quote_exact_in(&pool, &config, false, amount_in, false, 0).unwrap();

    let expected_price = get_next_sqrt_price_from_amount_quote(q64(1), LIQUIDITY, amount_in).unwrap();
    assert_eq!(result.next_sqrt_price, expected_price);
    assert_eq!(
        result.amount_out,
        get_delta_amount_base(q64(1), expected_price, LIQUIDITY, false).unwrap()
    );
    assert_eq!(result.fee, FeeBreakdown::default());
    assert_eq!(result.minimum_amount_out, result.amount_out);

    assert_eq!(result.price.before_swap, 1.0);
    assert!(result.price.after_swap > result.price.before_swap);
}

#[test]
fn test_input_fee_split() {
    init_logger();
    let config = single_segment_config(flat_fees(100, 20, 0), 0);
    let pool = pool_at(q64(1));
    let amount_in = 1_000_000;

    let result = quote_exact_in(&pool, &config, false, amount_in, false, 0).unwrap();
    let fee = result.fee;

    assert!(fee.trading + fee.protocol + fee.referral <= amount_in);
    assert_eq!(fee.referral, 0);
    // 1% of 1e6, 20% of that to the protocol
    assert_eq!(fee.trading + fee.protocol, 10_000);
    assert_eq!(fee.protocol, (fee.trading + fee.protocol) * 20 / 100);

    // The curve sees only what is left after fees
    let expected_price =
        get_next_sqrt_price_from_amount_quote(q64(1), LIQUIDITY, amount_in - 10_000).unwrap();
    assert_eq!(result.next_sqrt_price, expected_price);
    assert_eq!(
        result.amount_out,
        get_delta_amount_base(q64(1), expected_price, LIQUIDITY, false).unwrap()
    );
}

#[test]
fn test_referral_takes_share_of_protocol_fee() {
    init_logger();
    let config = single_segment_config(flat_fees(100, 20, 25), 0);
    let pool = pool_at(q64(1));

    let without = quote_exact_in(&pool, &config, false, 1_000_000, false, 0).unwrap();
    let with = quote_exact_in(&pool, &config, false, 1_000_000, true, 0).unwrap();

    assert_eq!(with.fee.trading, without.fee.trading);
    assert_eq!(with.fee.referral, without.fee.protocol * 25 / 100);
    assert_eq!(with.fee.protocol + with.fee.referral, without.fee.protocol);
    assert_eq!(with.amount_out, without.amount_out);
}

#[test]
fn test_output_token_mode_charges_base_output() {
    init_logger();
    let config = single_segment_config(flat_fees(100, 20, 0), 1);
    let pool = pool_at(q64(1));
    let amount_in = 1_000_000;

    let result = quote_exact_in(&pool, &config, false, amount_in, false, 0).unwrap();

    // Full input reaches the curve, fee comes off the base received
    let expected_price = get_next_sqrt_price_from_amount_quote(q64(1), LIQUIDITY, amount_in).unwrap();
    assert_eq!(result.next_sqrt_price, expected_price);
    let gross_out = get_delta_amount_base(q64(1), expected_price, LIQUIDITY, false).unwrap();
    assert_eq!(
        result.amount_out + result.fee.trading + result.fee.protocol,
        gross_out
    );
}

#[test]
fn test_sell_base_charges_quote_output() {
    init_logger();
    let config = single_segment_config(flat_fees(100, 20, 0), 0);
    let pool = pool_at(q64(2));
    let amount_in = 1_000_000;

    let result = quote_exact_in(&pool, &config, true, amount_in, false, 0).unwrap();

    let expected_price =
        get_next_sqrt_price_from_amount_base(q64(2), LIQUIDITY, amount_in, true).unwrap();
    assert_eq!(result.next_sqrt_price, expected_price);
    let gross_out = get_delta_amount_quote(expected_price, q64(2), LIQUIDITY, false).unwrap();
    assert_eq!(
        result.amount_out + result.fee.trading + result.fee.protocol,
        gross_out
    );
    assert!(result.price.after_swap < result.price.before_swap);
}

#[test]
fn test_not_enough_liquidity() {
    init_logger();
    let config = single_segment_config(PoolFees::default(), 0);
    let pool = pool_at(q64(1));

    // The only segment absorbs L * (2 - 1) = 1e9 quote
    assert_eq!(
        quote_exact_in(&pool, &config, false, 2_000_000_000, false, 0),
        Err(DbcCoreError::NotEnoughLiquidity)
    );
    assert!(quote_exact_in(&pool, &config, false, 1_000_000_000, false, 0).is_ok());
}

#[test]
fn test_multi_segment_crossing() {
    init_logger();
    let mut config = single_segment_config(PoolFees::default(), 0);
    config.curve = normalize_curve(&[
        CurvePoint::new(q64(2), LIQUIDITY),
        CurvePoint::new(q64(3), LIQUIDITY * 2),
        CurvePoint::new(q64(5), LIQUIDITY / 2),
    ])
    .unwrap();
    assert!(config.validate().is_ok());
    let pool = pool_at(q64(1));

    // [1, 2) absorbs 1e9, [2, 3) absorbs 2e9, the rest lands at 4 inside [3, 5)
    let result = quote_exact_in(&pool, &config, false, 3_500_000_000, false, 0).unwrap();

    let first = get_delta_amount_base(q64(1), q64(2), LIQUIDITY, false).unwrap();
    let second = get_delta_amount_base(q64(2), q64(3), LIQUIDITY * 2, false).unwrap();
    let next = get_next_sqrt_price_from_amount_quote(q64(3), LIQUIDITY / 2, 500_000_000).unwrap();
    let third = get_delta_amount_base(q64(3), next, LIQUIDITY / 2, false).unwrap();

    assert_eq!(result.next_sqrt_price, next);
    assert_eq!(next, q64(4));
    assert_eq!(result.amount_out, first + second + third);
}

#[test]
fn test_rejections() {
    init_logger();
    let config = single_segment_config(PoolFees::default(), 0);
    let pool = pool_at(q64(1));

    assert_eq!(
        quote_exact_in(&pool, &config, false, 0, false, 0),
        Err(DbcCoreError::AmountIsZero)
    );

    let completed = VirtualPool {
        quote_reserve: config.migration_quote_threshold + 1,
        ..pool
    };
    assert_eq!(
        quote_exact_in(&completed, &config, true, 1_000, false, 0),
        Err(DbcCoreError::PoolCompleted)
    );

    let bad_mode = single_segment_config(PoolFees::default(), 2);
    for swap_base_for_quote in [true, false] {
        assert_eq!(
            quote_exact_in(&pool_at(q64(1) + 1), &bad_mode, swap_base_for_quote, 1_000, false, 0),
            Err(DbcCoreError::InvalidCollectFeeMode)
        );
    }
}

#[test]
fn test_quotes_are_idempotent() {
    init_logger();
    let config = single_segment_config(flat_fees(250, 30, 10), 1);
    let pool = pool_at(q64(1) + q64(1) / 7);
    let config_before = config.clone();

    let quoter = SwapQuoter::new(QuoterConfig {
        default_slippage_bps: 50,
        ..Default::default()
    });
    for swap_base_for_quote in [true, false] {
        let first = quoter
            .quote_exact_in(&pool, &config, swap_base_for_quote, 123_456, true, 42)
            .unwrap();
        let second = quoter
            .quote_exact_in(&pool, &config, swap_base_for_quote, 123_456, true, 42)
            .unwrap();
        assert_eq!(first, second);
        assert!(first.minimum_amount_out <= first.amount_out);
    }

    assert_eq!(config, config_before);
    assert_eq!(pool, pool_at(q64(1) + q64(1) / 7));
}

#[test]
fn test_dynamic_fee_raises_trading_fee() {
    init_logger();
    let mut fees = flat_fees(100, 0, 0);
    let pool = pool_at(q64(1));
    let base_only = quote_exact_in(&pool, &single_segment_config(fees, 0), false, 1_000_000, false, 0)
        .unwrap();

    fees.dynamic_fee = DynamicFeeParameters {
        initialized: true,
        max_volatility_accumulator: 100_000,
        variable_fee_control: 1_000,
        bin_step: 10,
        volatility_accumulator: 50_000,
        ..Default::default()
    };
    let with_dynamic =
        quote_exact_in(&pool, &single_segment_config(fees, 0), false, 1_000_000, false, 0).unwrap();

    // (5e4 * 10)^2 * 1e3 / 1e11 = 2500 on top of 100
    assert_eq!(base_only.fee.trading, 10_000);
    assert_eq!(with_dynamic.fee.trading, 260_000);
    assert!(with_dynamic.amount_out < base_only.amount_out);
}

#[test]
fn test_params_slippage() {
    init_logger();
    let config = single_segment_config(PoolFees::default(), 0);
    let pool = pool_at(q64(1));

    let params = SwapQuoteParams {
        swap_base_for_quote: false,
        amount_in: 10_000_000,
        slippage_bps: 250,
        has_referral: false,
        current_point: 0,
    };
    let result = SwapQuoter::default().quote(&pool, &config, &params).unwrap();
    assert_eq!(result.minimum_amount_out, result.amount_out * 9_750 / 10_000);
}

#[test]
fn test_exponential_schedule_through_quote() {
    init_logger();
    let fees = PoolFees {
        base_fee: BaseFeeParameters {
            cliff_fee_numerator: 1_000,
            number_of_period: 2,
            period_frequency: 1,
            reduction_factor: 5_000,
            fee_scheduler_mode: FeeSchedulerMode::Exponential as u8,
        },
        ..Default::default()
    };
    let config = single_segment_config(fees, 0);
    let pool = pool_at(q64(1));

    // 10% at activation, halved each period, floored after two periods
    for (current_point, expected_fee) in [(0, 100_000), (1, 50_000), (2, 25_000), (50, 25_000)] {
        let result = quote_exact_in(&pool, &config, false, 1_000_000, false, current_point).unwrap();
        assert_eq!(result.fee.trading, expected_fee, "point {}", current_point);
        let expected_price =
            get_next_sqrt_price_from_amount_quote(q64(1), LIQUIDITY, 1_000_000 - expected_fee)
                .unwrap();
        assert_eq!(result.next_sqrt_price, expected_price);
    }
}

#[test]
fn test_exponential_schedule_failure_fails_quote() {
    init_logger();
    // A 100% reduction drives the decay factor to zero after one period
    let fees = PoolFees {
        base_fee: BaseFeeParameters {
            cliff_fee_numerator: 1_000,
            number_of_period: 5,
            period_frequency: 1,
            reduction_factor: 10_000,
            fee_scheduler_mode: FeeSchedulerMode::Exponential as u8,
        },
        ..Default::default()
    };
    let config = single_segment_config(fees, 0);
    let pool = pool_at(q64(1));

    assert!(quote_exact_in(&pool, &config, false, 1_000_000, false, 0).is_ok());
    for swap_base_for_quote in [true, false] {
        assert_eq!(
            quote_exact_in(&pool_at(q64(1) + q64(1) / 2), &config, swap_base_for_quote, 1_000, false, 3),
            Err(DbcCoreError::MathOverflow)
        );
    }
}

#[test]
fn test_descending_curve_is_rejected() {
    init_logger();
    let mut config = single_segment_config(PoolFees::default(), 0);
    config.curve = normalize_curve(&[
        CurvePoint::new(q64(3), LIQUIDITY),
        CurvePoint::new(q64(2), LIQUIDITY),
        CurvePoint::new(q64(5), LIQUIDITY),
    ])
    .unwrap();
    let pool = pool_at(q64(1));

    assert_eq!(config.validate(), Err(DbcCoreError::InvalidPrice));
    assert_eq!(
        quote_exact_in(&pool, &config, false, 2_500_000_000, false, 0),
        Err(DbcCoreError::InvalidPrice)
    );
}

#[test]
fn test_output_token_mode_sell_base_fee_amounts() {
    init_logger();
    let config = single_segment_config(flat_fees(100, 20, 50), 1);
    let pool = pool_at(q64(2));

    // L / 2 base walks the whole segment from 2 down to 1 for 1e9 quote
    let result = quote_exact_in(&pool, &config, true, 500_000_000, true, 0).unwrap();

    assert_eq!(result.next_sqrt_price, q64(1));
    // 1% of 1e9 rounds to 1e7: 20% to the protocol side, half of that to the referrer
    assert_eq!(
        result.fee,
        FeeBreakdown {
            trading: 8_000_000,
            protocol: 1_000_000,
            referral: 1_000_000,
        }
    );
    assert_eq!(result.amount_out, 990_000_000);
    assert_eq!(result.minimum_amount_out, 990_000_000);
}
