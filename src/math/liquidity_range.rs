// liquidity_range.rs
//
// Derives the start/target/end tick triple a graduating token seeds its pool with, and the
// minimum pool-side supply that keeps that triple derivable.
//
// Token0 is the launched token, token1 the base token. The position is single-sided from
// `start` up to the highest usable tick; `target` is the final bonding-curve price.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::constants::{max_sqrt_ratio, min_sqrt_ratio, scale_factor_sqrt, BPS_DENOMINATOR};
use crate::error::{SqrtError, TickMathError};
use crate::math::big_sqrt;
use crate::math::tick_math::{
    assert_tick_in_range, get_sqrt_price_at_tick, get_tick_at_sqrt_price,
    invert_sqrt_price_x96, max_usable_tick, quantize_tick, validate_tick_spacing,
};

// min_tokens pads its result by 10000/9999
const MIN_TOKENS_BUFFER_DENOMINATOR: u32 = BPS_DENOMINATOR - 1;

// ------------------------------- Data types ----------------------------------

/// Deserialized triples go through [`TickTriple::new`] at the finest spacing, so ordering
/// and tick range hold for anything read off the wire.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTickTriple")
)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TickTriple {
    pub start_tick: i32,
    pub target_tick: i32,
    pub end_tick: i32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTickTriple {
    start_tick: i32,
    target_tick: i32,
    end_tick: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTickTriple> for TickTriple {
    type Error = TickMathError;

    fn try_from(raw: RawTickTriple) -> Result<Self, Self::Error> {
        TickTriple::new(raw.start_tick, raw.target_tick, raw.end_tick, crate::constants::MIN_TICK_SPACING)
    }
}

impl TickTriple {
    /// Validates ordering, range and spacing of all three ticks.
    pub fn new(
        start_tick: i32,
        target_tick: i32,
        end_tick: i32,
        tick_spacing: i32,
    ) -> Result<Self, TickMathError> {
        assert_tick_in_range(start_tick, tick_spacing)?;
        assert_tick_in_range(target_tick, tick_spacing)?;
        assert_tick_in_range(end_tick, tick_spacing)?;
        if start_tick > target_tick {
            return Err(TickMathError::StartTickAboveTarget { start_tick, target_tick });
        }
        if target_tick > end_tick {
            return Err(TickMathError::InvalidTick(i64::from(target_tick)));
        }
        Ok(Self { start_tick, target_tick, end_tick })
    }

    /// The same range seen from a pool where the launched token is token1.
    pub fn mirrored(&self) -> Self {
        Self {
            start_tick: -self.end_tick,
            target_tick: -self.target_tick,
            end_tick: -self.start_tick,
        }
    }
}

// -------------------------- Price <-> Q64.96 helpers --------------------------

/// floor(sqrt(price) * 2^96), exact.
pub fn price_to_sqrt_price_x96(price: &BigInt) -> Result<BigInt, SqrtError> {
    big_sqrt::sqrt(&(price << 192))
}

/// Sqrt price of a curve price stored with the 10^36 scale.
pub fn offset_price_to_sqrt_price_x96(scaled_price: &BigInt) -> Result<BigInt, SqrtError> {
    Ok(price_to_sqrt_price_x96(scaled_price)? / scale_factor_sqrt())
}

// ------------------------------- Range derivation -----------------------------

struct RangeAnchor {
    target_tick: i32,
    end_tick: i32,
    sqrt_target_price: BigInt,
    sqrt_price_range: BigInt,
}

fn check_price_bounds(price_x96: &BigInt) -> Result<(), TickMathError> {
    if *price_x96 < min_sqrt_ratio() || *price_x96 > max_sqrt_ratio() {
        return Err(TickMathError::InvalidSqrtPrice(price_x96.clone()));
    }
    Ok(())
}

// Shared first half of range derivation and min_tokens.
fn anchor_range(price_x96: &BigInt, tick_spacing: i32) -> Result<RangeAnchor, TickMathError> {
    validate_tick_spacing(tick_spacing)?;
    check_price_bounds(price_x96)?;

    let target_tick = quantize_tick(get_tick_at_sqrt_price(price_x96)?, tick_spacing, true)?;
    assert_tick_in_range(target_tick, tick_spacing)?;

    let end_tick = max_usable_tick(tick_spacing)?;

    let sqrt_target_price = get_sqrt_price_at_tick(target_tick)?;
    let sqrt_end_price = get_sqrt_price_at_tick(end_tick)?;
    // token sides are priced reciprocally, so the width is measured on inverted prices
    let sqrt_price_range =
        invert_sqrt_price_x96(&sqrt_target_price)? - invert_sqrt_price_x96(&sqrt_end_price)?;

    Ok(RangeAnchor { target_tick, end_tick, sqrt_target_price, sqrt_price_range })
}

/// Start, target and end ticks for `amount0` of token0 and `amount1` of token1 at
/// `price_x96`.
///
/// The start price is pulled below the target by `range * amount1 / amount0`; the
/// remaining failure modes say which side of the ratio is infeasible.
pub fn derive_tick_range(
    price_x96: &BigInt,
    amount0: &BigInt,
    amount1: &BigInt,
    tick_spacing: i32,
) -> Result<TickTriple, TickMathError> {
    let RangeAnchor { target_tick, end_tick, sqrt_target_price, sqrt_price_range } =
        anchor_range(price_x96, tick_spacing)?;

    if !amount0.is_positive() {
        return Err(TickMathError::InvalidTokenAmount(amount0.clone()));
    }

    let sub_by = &sqrt_price_range * amount1 / amount0;
    if sub_by > sqrt_target_price {
        return Err(TickMathError::SubByTooLarge { sub_by, sqrt_target_price });
    }

    let sqrt_start_price = &sqrt_target_price - &sub_by;

    let min_ratio = min_sqrt_ratio();
    if sqrt_start_price < min_ratio {
        return Err(TickMathError::StartTickTooLow { sqrt_start_price, min_sqrt_ratio: min_ratio });
    }
    let max_ratio = max_sqrt_ratio();
    if sqrt_start_price > max_ratio {
        return Err(TickMathError::StartTickTooHigh { sqrt_start_price, max_sqrt_ratio: max_ratio });
    }

    let start_tick = quantize_tick(get_tick_at_sqrt_price(&sqrt_start_price)?, tick_spacing, true)?;
    if start_tick > target_tick {
        return Err(TickMathError::StartTickAboveTarget { start_tick, target_tick });
    }

    assert_tick_in_range(start_tick, tick_spacing)?;
    assert_tick_in_range(target_tick, tick_spacing)?;

    log::debug!(
        "derived tick range start={} target={} end={} (sub_by={})",
        start_tick, target_tick, end_tick, sub_by
    );

    Ok(TickTriple { start_tick, target_tick, end_tick })
}

/// Token-order aware wrapper: when the base token is token1 of the pool the triple is
/// mirrored around tick 0.
pub fn derive_tick_range_for_pair(
    price_quote_x96: &BigInt,
    num_base_token: &BigInt,
    num_quote_token: &BigInt,
    is_base_token0: bool,
    tick_spacing: i32,
) -> Result<TickTriple, TickMathError> {
    let triple = derive_tick_range(price_quote_x96, num_base_token, num_quote_token, tick_spacing)?;
    if is_base_token0 {
        Ok(triple)
    } else {
        Ok(triple.mirrored())
    }
}

/// Smallest token0 supply for which `derive_tick_range(price_x96, supply, num_token1, ..)`
/// stays feasible, padded by 10000/9999.
pub fn min_tokens(
    price_x96: &BigInt,
    num_token1: &BigInt,
    tick_spacing: i32,
) -> Result<BigInt, TickMathError> {
    let RangeAnchor { sqrt_target_price, sqrt_price_range, .. } =
        anchor_range(price_x96, tick_spacing)?;

    if !num_token1.is_positive() {
        return Err(TickMathError::InvalidBaseTokenAmount(num_token1.clone()));
    }

    let numerator = &sqrt_price_range * num_token1;
    let denominator = sqrt_target_price + min_sqrt_ratio();
    let num_token_min = ceil_div(&numerator, &denominator);

    Ok(num_token_min * BigInt::from(BPS_DENOMINATOR) / BigInt::from(MIN_TOKENS_BUFFER_DENOMINATOR))
}

#[inline]
fn ceil_div(a: &BigInt, b: &BigInt) -> BigInt {
    // assumes a>=0, b>0
    if a.is_zero() {
        return BigInt::zero();
    }
    (a + (b - BigInt::one())).div_floor(b)
}
