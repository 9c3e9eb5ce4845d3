use bonding_curve_math::constants::{max_sqrt_ratio, min_sqrt_ratio, q96, DEFAULT_TICK_SPACING};
use bonding_curve_math::math::liquidity_range::*;
use bonding_curve_math::math::tick_math::*;
use bonding_curve_math::TickMathError;
use num_bigint::BigInt;
use std::str::FromStr;

fn big(s: &str) -> BigInt {
    BigInt::from_str(s).unwrap()
}

fn e18(units: u64) -> BigInt {
    BigInt::from(units) * BigInt::from(10u8).pow(18)
}

// Final price of the reference launch curve, 1e31 with the 10^36 scale
fn launch_price_x96() -> BigInt {
    offset_price_to_sqrt_price_x96(&BigInt::from(10u8).pow(31)).unwrap()
}

#[test]
fn test_tick_math_against_known_values() {
    println!("=== TICK MATH VALIDATION AGAINST KNOWN VALUES ===");

    assert_eq!(get_sqrt_price_at_tick(0).unwrap(), q96());
    assert_eq!(get_sqrt_price_at_tick(-887_272).unwrap(), min_sqrt_ratio());
    assert_eq!(get_sqrt_price_at_tick(887_272).unwrap(), max_sqrt_ratio());
    assert_eq!(get_sqrt_price_at_tick(200).unwrap(), big("80024378775772204256025656563"));

    assert_eq!(get_tick_at_sqrt_price(&min_sqrt_ratio()).unwrap(), -887_272);
    assert_eq!(get_tick_at_sqrt_price(&(max_sqrt_ratio() - 1)).unwrap(), 887_271);

    let px = launch_price_x96();
    println!("  launch sqrt price: {}", px);
    assert_eq!(px, big("250541448375047931186413801"));
    assert_eq!(get_tick_at_sqrt_price(&px).unwrap(), -115_136);
}

#[test]
fn test_tick_round_trip_brackets_price() {
    for tick in (-887_000..887_000).step_by(7_919) {
        let price = get_sqrt_price_at_tick(tick).unwrap();
        assert_eq!(get_tick_at_sqrt_price(&price).unwrap(), tick);

        let next = get_sqrt_price_at_tick(tick + 1).unwrap();
        let mid = (&price + &next) / 2;
        let found = get_tick_at_sqrt_price(&mid).unwrap();
        assert_eq!(found, tick, "mid-point of [{}, {}) must map to {}", tick, tick + 1, tick);
        assert!(get_sqrt_price_at_tick(found).unwrap() <= mid);
        assert!(get_sqrt_price_at_tick(found + 1).unwrap() > mid);
    }
}

#[test]
fn test_launch_range_derivation() {
    println!("=== LAUNCH RANGE DERIVATION ===");
    let px = launch_price_x96();
    let raised = big("4399999999999999999955");

    let wide = derive_tick_range(&px, &e18(500_000_000), &raised, DEFAULT_TICK_SPACING).unwrap();
    println!("  500M pool supply -> {:?}", wide);
    assert_eq!(wide, TickTriple { start_tick: -158_600, target_tick: -115_200, end_tick: 887_200 });

    let narrow = derive_tick_range(&px, &e18(443_000_000), &raised, DEFAULT_TICK_SPACING).unwrap();
    assert_eq!(narrow, TickTriple { start_tick: -277_600, target_tick: -115_200, end_tick: 887_200 });

    let min_supply = min_tokens(&px, &raised, DEFAULT_TICK_SPACING).unwrap();
    assert_eq!(min_supply, big("442912974684399012081721342"));
    let tightest = derive_tick_range(&px, &min_supply, &raised, DEFAULT_TICK_SPACING).unwrap();
    assert_eq!(tightest.start_tick, -299_400);

    let too_small = derive_tick_range(&px, &e18(442_000_000), &raised, DEFAULT_TICK_SPACING);
    assert!(matches!(too_small, Err(TickMathError::SubByTooLarge { .. })));
}

#[test]
fn test_zero_base_amount_starts_at_target() {
    let px = launch_price_x96();
    let triple = derive_tick_range(&px, &e18(1), &BigInt::from(0), DEFAULT_TICK_SPACING).unwrap();
    assert_eq!(triple.start_tick, triple.target_tick);
    assert_eq!(triple, TickTriple { start_tick: -115_200, target_tick: -115_200, end_tick: 887_200 });
}

#[test]
fn test_zero_token_amount_is_rejected() {
    let px = launch_price_x96();
    assert_eq!(
        derive_tick_range(&px, &BigInt::from(0), &e18(1), DEFAULT_TICK_SPACING),
        Err(TickMathError::InvalidTokenAmount(BigInt::from(0)))
    );
}

#[test]
fn test_range_for_pair_respects_token_order() {
    let px = launch_price_x96();
    let raised = big("4399999999999999999955");
    let base0 = derive_tick_range_for_pair(&px, &e18(500_000_000), &raised, true, 200).unwrap();
    let base1 = derive_tick_range_for_pair(&px, &e18(500_000_000), &raised, false, 200).unwrap();
    assert_eq!(base0, TickTriple { start_tick: -158_600, target_tick: -115_200, end_tick: 887_200 });
    assert_eq!(base1, TickTriple { start_tick: -887_200, target_tick: 115_200, end_tick: 158_600 });
}
