// launch.rs
//
// Launch-time parameter checks and the structs handed to the launch and pool contracts.

use num_bigint::BigInt;
use primitive_types::H160;

use crate::constants::{BPS_DENOMINATOR, DEFAULT_TICK_SPACING};
use crate::curve::analyzer::validate_graduatable;
use crate::curve::price_curve::{PriceCurve, PriceCurveParams};
use crate::error::CurveError;
use crate::math::liquidity_range::TickTriple;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub recipient: H160,
    pub bps: u32,
}

/// Rescales `splits` so they share what is left after the protocol fee, keeping their
/// proportions (floor per split). No splits, or splits summing to zero, yield none.
pub fn adjust_fee_splits(splits: &[FeeSplit], protocol_fee_bps: u32) -> Result<Vec<FeeSplit>, CurveError> {
    if protocol_fee_bps > BPS_DENOMINATOR {
        return Err(CurveError::InvalidFeeBps(protocol_fee_bps));
    }
    let remaining_bps = u64::from(BPS_DENOMINATOR - protocol_fee_bps);
    let total_bps: u64 = splits.iter().map(|s| u64::from(s.bps)).sum();
    if total_bps == 0 {
        return Ok(Vec::new());
    }

    Ok(splits
        .iter()
        .map(|split| FeeSplit {
            recipient: split.recipient,
            // never exceeds remaining_bps, which fits in u32
            bps: (u64::from(split.bps) * remaining_bps / total_bps) as u32,
        })
        .collect())
}

/// The declared bonding-curve supply must be exactly what the curve sells.
pub fn validate_launch_curve(bonding_curve_supply: &BigInt, curve: &PriceCurve) -> Result<(), CurveError> {
    let expected = curve.total_supply();
    if *bonding_curve_supply != expected {
        return Err(CurveError::SupplyMismatch { supply: bonding_curve_supply.clone(), expected });
    }
    Ok(())
}

/// Wire-form variant of [`validate_launch_curve`]; returns the parsed curve.
pub fn validate_launch_params(
    bonding_curve_supply: &BigInt,
    params: PriceCurveParams,
) -> Result<PriceCurve, CurveError> {
    let curve = PriceCurve::try_from(params)?;
    validate_launch_curve(bonding_curve_supply, &curve)?;
    Ok(curve)
}

/// Pool initialization parameters for a graduating token.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GraduationParams {
    pub tick_spacing: i32,
    pub starting_tick: i32,
    pub target_tick: i32,
    pub end_tick: i32,
    /// Pool swap fee in bps.
    pub pool_fee: u32,
}

impl GraduationParams {
    pub fn from_tick_triple(triple: TickTriple, tick_spacing: i32, pool_fee: u32) -> Self {
        Self {
            tick_spacing,
            starting_tick: triple.start_tick,
            target_tick: triple.target_tick,
            end_tick: triple.end_tick,
            pool_fee,
        }
    }
}

/// Runs the graduation check and packages its ticks with the default spacing.
pub fn graduation_params(
    curve: &PriceCurve,
    graduation_fee_bps: u32,
    liquidity_pool_supply: &BigInt,
    pool_fee_bps: u32,
) -> Result<GraduationParams, CurveError> {
    if pool_fee_bps > BPS_DENOMINATOR {
        return Err(CurveError::InvalidFeeBps(pool_fee_bps));
    }
    let triple = validate_graduatable(curve, graduation_fee_bps, liquidity_pool_supply)?;
    Ok(GraduationParams::from_tick_triple(triple, DEFAULT_TICK_SPACING, pool_fee_bps))
}
