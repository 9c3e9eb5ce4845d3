// analyzer.rs
//
// What a curve raises, how much of the base token a partial fill costs, and whether the
// raise can seed a pool at the final curve price.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::constants::{scale_factor, BPS_DENOMINATOR, DEFAULT_TICK_SPACING};
use crate::curve::price_curve::PriceCurve;
use crate::error::{CurveError, Remediation, TickMathError};
use crate::math::liquidity_range::{
    derive_tick_range, min_tokens, offset_price_to_sqrt_price_x96, TickTriple,
};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveAnalysis {
    /// Launched tokens sold through the curve.
    #[cfg_attr(feature = "serde", serde(with = "crate::decimal_string"))]
    pub bonding_curve_supply: BigInt,
    /// Base token raised when the curve sells out.
    #[cfg_attr(feature = "serde", serde(with = "crate::decimal_string"))]
    pub base_token_accumulated: BigInt,
    /// Smallest pool-side supply that still derives a valid tick range.
    #[cfg_attr(feature = "serde", serde(with = "crate::decimal_string"))]
    pub min_liquidity_pool_supply: BigInt,
}

/// Base token raised by selling every step, `sum(price * step_size / 10^36)`.
pub fn base_token_accumulated(curve: &PriceCurve) -> BigInt {
    let scale = scale_factor();
    curve
        .prices()
        .iter()
        .map(|price| price * curve.step_size() / &scale)
        .sum()
}

pub fn analyze_curve(curve: &PriceCurve) -> Result<CurveAnalysis, CurveError> {
    let base_token_accumulated = base_token_accumulated(curve);
    let price_x96 = offset_price_to_sqrt_price_x96(curve.end_price())?;
    let min_liquidity_pool_supply =
        min_tokens(&price_x96, &base_token_accumulated, DEFAULT_TICK_SPACING)?;

    Ok(CurveAnalysis {
        bonding_curve_supply: curve.total_supply(),
        base_token_accumulated,
        min_liquidity_pool_supply,
    })
}

/// Base token paid for the first `tokens_consumed` launched tokens.
///
/// Whole steps are charged at their price; the first step that does not fit is charged
/// for the remainder only. Anything past the last step is free.
pub fn analyze_curve_until(curve: &PriceCurve, tokens_consumed: &BigInt) -> Result<BigInt, CurveError> {
    if tokens_consumed.is_negative() {
        return Err(CurveError::NegativeAmount(tokens_consumed.clone()));
    }

    let scale = scale_factor();
    let step_size = curve.step_size();
    let mut remaining = tokens_consumed.clone();
    let mut accumulated = BigInt::zero();

    for price in curve.prices() {
        if *step_size > remaining {
            accumulated += price * &remaining / &scale;
            break;
        }
        accumulated += price * step_size / &scale;
        remaining -= step_size;
    }
    Ok(accumulated)
}

/// Checks that the raise net of `graduation_fee_bps`, paired with `liquidity_pool_supply`,
/// derives a tick range at the final curve price.
pub fn validate_graduatable(
    curve: &PriceCurve,
    graduation_fee_bps: u32,
    liquidity_pool_supply: &BigInt,
) -> Result<TickTriple, CurveError> {
    if graduation_fee_bps > BPS_DENOMINATOR {
        return Err(CurveError::InvalidFeeBps(graduation_fee_bps));
    }

    let price_x96 = offset_price_to_sqrt_price_x96(curve.end_price())?;
    let base_token_amount = base_token_accumulated(curve);
    let graduation_fee =
        &base_token_amount * BigInt::from(graduation_fee_bps) / BigInt::from(BPS_DENOMINATOR);
    let base_token_after_fees = base_token_amount - graduation_fee;

    derive_tick_range(
        &price_x96,
        liquidity_pool_supply,
        &base_token_after_fees,
        DEFAULT_TICK_SPACING,
    )
    .map_err(classify_graduation_error)
}

/// Maps infeasible-ratio failures onto the adjustment the launcher has to make. Other
/// failures pass through unchanged.
pub fn classify_graduation_error(err: TickMathError) -> CurveError {
    let remediation = match &err {
        TickMathError::StartTickTooLow { .. }
        | TickMathError::InvalidTokenAmount(_)
        | TickMathError::SubByTooLarge { .. } => Remediation::IncreaseTargetPriceOrPoolSupply,
        TickMathError::StartTickTooHigh { .. } => {
            Remediation::DecreaseTargetPriceOrIncreaseCurveSupply
        }
        _ => return CurveError::TickMath(err),
    };
    log::debug!("curve is not graduatable ({}): {}", err, remediation);
    CurveError::NotGraduatable(remediation)
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteCheck {
    #[cfg_attr(feature = "serde", serde(with = "crate::decimal_string"))]
    pub expected: BigInt,
    #[cfg_attr(feature = "serde", serde(with = "crate::decimal_string"))]
    pub remote: BigInt,
    /// `|remote - expected| * 10000 / max(remote, expected)`, zero when both are zero.
    #[cfg_attr(feature = "serde", serde(with = "crate::decimal_string"))]
    pub deviation_bps: BigInt,
    pub within_tolerance: bool,
}

/// Compares a quote obtained elsewhere (e.g. decoded from a reverting simulation) with the
/// local curve walk for the same token amount.
pub fn corroborate_quote(
    curve: &PriceCurve,
    tokens_consumed: &BigInt,
    remote_amount: &BigInt,
    tolerance_bps: u32,
) -> Result<QuoteCheck, CurveError> {
    if remote_amount.is_negative() {
        return Err(CurveError::NegativeAmount(remote_amount.clone()));
    }
    let expected = analyze_curve_until(curve, tokens_consumed)?;

    let larger = if *remote_amount > expected { remote_amount } else { &expected };
    let deviation_bps = if larger.is_zero() {
        BigInt::zero()
    } else {
        (remote_amount - &expected).abs() * BigInt::from(BPS_DENOMINATOR) / larger
    };
    let within_tolerance = deviation_bps <= BigInt::from(tolerance_bps);

    if !within_tolerance {
        log::debug!(
            "quote for {} tokens deviates by {} bps (remote {}, expected {})",
            tokens_consumed, deviation_bps, remote_amount, expected
        );
    }

    Ok(QuoteCheck { expected, remote: remote_amount.clone(), deviation_bps, within_tolerance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::builder::{custom_curve, linear_curve};
    use std::str::FromStr;

    fn big(s: &str) -> BigInt {
        BigInt::from_str(s).unwrap()
    }

    fn e18(units: u64) -> BigInt {
        BigInt::from(units) * BigInt::from(10u8).pow(18)
    }

    // 1e30 -> 1e31 over 100 steps, 800M tokens
    fn launch_curve() -> PriceCurve {
        linear_curve(&BigInt::from(10u8).pow(30), &BigInt::from(10u8).pow(31), 100, &e18(800_000_000))
            .unwrap()
    }

    #[test]
    fn analysis_of_linear_launch_curve() {
        let analysis = analyze_curve(&launch_curve()).unwrap();
        assert_eq!(analysis.bonding_curve_supply, e18(800_000_000));
        assert_eq!(analysis.base_token_accumulated, big("4399999999999999999955"));
        assert_eq!(analysis.min_liquidity_pool_supply, big("442912974684399012081721342"));
    }

    #[test]
    fn partial_fills() {
        let curve = launch_curve();
        let step = curve.step_size().clone();
        assert_eq!(analyze_curve_until(&curve, &BigInt::zero()).unwrap(), BigInt::zero());
        assert_eq!(analyze_curve_until(&curve, &step).unwrap(), big("8000000000000000000"));
        let step_and_half = &step + &step / 2;
        assert_eq!(analyze_curve_until(&curve, &step_and_half).unwrap(), big("12363636363636363636"));
        assert_eq!(
            analyze_curve_until(&curve, &(BigInt::from(10u8).pow(40))).unwrap(),
            base_token_accumulated(&curve)
        );
        assert_eq!(
            analyze_curve_until(&curve, &BigInt::from(-1)),
            Err(CurveError::NegativeAmount(BigInt::from(-1)))
        );
    }

    #[test]
    fn graduation_with_and_without_fee() {
        let curve = launch_curve();
        let triple = validate_graduatable(&curve, 0, &e18(500_000_000)).unwrap();
        assert_eq!(triple, TickTriple { start_tick: -158_600, target_tick: -115_200, end_tick: 887_200 });

        let with_fee = validate_graduatable(&curve, 100, &e18(500_000_000)).unwrap();
        assert_eq!(with_fee, TickTriple { start_tick: -157_000, target_tick: -115_200, end_tick: 887_200 });

        // the analyzed minimum is enough on its own
        let min_lp = big("442912974684399012081721342");
        let tight = validate_graduatable(&curve, 0, &min_lp).unwrap();
        assert_eq!(tight.start_tick, -299_400);
    }

    #[test]
    fn graduation_failures_are_classified() {
        let curve = launch_curve();
        assert_eq!(
            validate_graduatable(&curve, 0, &e18(442_000_000)),
            Err(CurveError::NotGraduatable(Remediation::IncreaseTargetPriceOrPoolSupply))
        );
        assert_eq!(
            validate_graduatable(&curve, 0, &BigInt::zero()),
            Err(CurveError::NotGraduatable(Remediation::IncreaseTargetPriceOrPoolSupply))
        );
        assert_eq!(validate_graduatable(&curve, 10_001, &e18(1)), Err(CurveError::InvalidFeeBps(10_001)));
    }

    #[test]
    fn unrelated_tick_errors_pass_through() {
        // a zero price is below the representable range and fails before any ratio is computed
        let curve = custom_curve(vec![BigInt::zero()], &e18(1)).unwrap();
        assert!(matches!(
            validate_graduatable(&curve, 0, &e18(1)),
            Err(CurveError::TickMath(TickMathError::InvalidSqrtPrice(_)))
        ));
        assert_eq!(
            classify_graduation_error(TickMathError::InvalidTick(5)),
            CurveError::TickMath(TickMathError::InvalidTick(5))
        );
        assert_eq!(
            classify_graduation_error(TickMathError::StartTickTooHigh {
                sqrt_start_price: BigInt::from(2),
                max_sqrt_ratio: BigInt::from(1),
            }),
            CurveError::NotGraduatable(Remediation::DecreaseTargetPriceOrIncreaseCurveSupply)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn analysis_serializes_amounts_as_strings() {
        let analysis = analyze_curve(&launch_curve()).unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["bonding_curve_supply"], "800000000000000000000000000");
        assert_eq!(json["base_token_accumulated"], "4399999999999999999955");
        assert_eq!(json["min_liquidity_pool_supply"], "442912974684399012081721342");

        let decoded: CurveAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, analysis);

        let bad = r#"{"bonding_curve_supply":"1.5","base_token_accumulated":"0","min_liquidity_pool_supply":"0"}"#;
        assert!(serde_json::from_str::<CurveAnalysis>(bad).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn quote_check_serializes_amounts_as_strings() {
        let curve = launch_curve();
        let check =
            corroborate_quote(&curve, curve.step_size(), &big("8080000000000000000"), 100).unwrap();
        let json = serde_json::to_string(&check).unwrap();
        assert_eq!(
            json,
            r#"{"expected":"8000000000000000000","remote":"8080000000000000000","deviation_bps":"99","within_tolerance":true}"#
        );
        assert_eq!(serde_json::from_str::<QuoteCheck>(&json).unwrap(), check);
    }

    #[test]
    fn quote_corroboration() {
        let curve = launch_curve();
        let step = curve.step_size().clone();
        let exact = corroborate_quote(&curve, &step, &big("8000000000000000000"), 0).unwrap();
        assert!(exact.within_tolerance);
        assert_eq!(exact.deviation_bps, BigInt::zero());

        // 1% above the local walk
        let off = big("8080000000000000000");
        let loose = corroborate_quote(&curve, &step, &off, 100).unwrap();
        assert_eq!(loose.deviation_bps, BigInt::from(99));
        assert!(loose.within_tolerance);
        let strict = corroborate_quote(&curve, &step, &off, 50).unwrap();
        assert!(!strict.within_tolerance);

        let nothing = corroborate_quote(&curve, &BigInt::zero(), &BigInt::zero(), 0).unwrap();
        assert!(nothing.within_tolerance);
    }
}
