use bonding_curve_math::curve::units::format_base_token_amount_for_curve;
use bonding_curve_math::curve::{corroborate_quote, PriceCurveParams};
use bonding_curve_math::launch::*;
use bonding_curve_math::*;
use num_bigint::BigInt;
use primitive_types::H160;

fn e18(units: u64) -> BigInt {
    BigInt::from(units) * BigInt::from(10u8).pow(18)
}

fn launch_curve() -> PriceCurve {
    let start = format_base_token_amount_for_curve("0.000001", 18).unwrap();
    let end = format_base_token_amount_for_curve("0.00001", 18).unwrap();
    initialize_curve(CurveType::Linear, &start, &end, 100, &e18(800_000_000)).unwrap()
}

#[test]
fn test_end_to_end_launch_flow() {
    println!("=== END-TO-END LAUNCH FLOW ===");

    let curve = launch_curve();
    validate_launch_curve(&e18(800_000_000), &curve).unwrap();

    let analysis = analyze_curve(&curve).unwrap();
    println!("  raise: {}", analysis.base_token_accumulated);

    // the analyzed minimum pool supply must graduate
    let triple = validate_graduatable(&curve, 0, &analysis.min_liquidity_pool_supply).unwrap();
    println!("  graduation ticks: {:?}", triple);
    assert!(triple.start_tick <= triple.target_tick && triple.target_tick <= triple.end_tick);

    let params = graduation_params(&curve, 100, &e18(500_000_000), 100).unwrap();
    assert_eq!(params.starting_tick, -157_000);
    assert_eq!(params.target_tick, -115_200);
    assert_eq!(params.end_tick, 887_200);
    assert_eq!(params.tick_spacing, 200);

    let prices = curve.to_u256_prices().unwrap();
    assert_eq!(prices.len(), 100);
}

#[test]
fn test_not_graduatable_advice() {
    let curve = launch_curve();
    let err = validate_graduatable(&curve, 0, &e18(442_000_000)).unwrap_err();
    println!("  advice: {}", err);
    assert_eq!(err, CurveError::NotGraduatable(Remediation::IncreaseTargetPriceOrPoolSupply));
    assert_eq!(err.to_string(), "Please increase target price or increase liquidity pool supply");
}

#[test]
fn test_wire_params_round_trip_through_validation() {
    let curve = launch_curve();
    let params = PriceCurveParams::from(curve.clone());
    assert_eq!(params.prices.len(), 100);
    assert_eq!(params.num_steps, "100");

    let parsed = validate_launch_params(&e18(800_000_000), params.clone()).unwrap();
    assert_eq!(parsed, curve);

    assert!(matches!(
        validate_launch_params(&e18(799_999_999), params),
        Err(CurveError::SupplyMismatch { .. })
    ));
}

#[test]
fn test_fee_split_adjustment() {
    let creator = H160::from_low_u64_be(1);
    let referrer = H160::from_low_u64_be(2);
    let splits = vec![
        FeeSplit { recipient: creator, bps: 7000 },
        FeeSplit { recipient: referrer, bps: 3000 },
    ];
    let adjusted = adjust_fee_splits(&splits, 2000).unwrap();
    assert_eq!(adjusted[0], FeeSplit { recipient: creator, bps: 5600 });
    assert_eq!(adjusted[1], FeeSplit { recipient: referrer, bps: 2400 });
}

#[test]
fn test_remote_quote_corroboration() {
    let curve = launch_curve();
    let tokens = curve.step_size() * BigInt::from(3);
    let expected = analyze_curve_until(&curve, &tokens).unwrap();

    let same = corroborate_quote(&curve, &tokens, &expected, 0).unwrap();
    assert!(same.within_tolerance);

    let doubled = &expected * BigInt::from(2);
    let off = corroborate_quote(&curve, &tokens, &doubled, 100).unwrap();
    assert_eq!(off.deviation_bps, BigInt::from(5000));
    assert!(!off.within_tolerance);
}
