// tick_math.rs
// ----------------------------------------------------------------------------------------
// BigInt port of the concentrated-liquidity TickMath library:
//   price(tick) = 1.0001^tick, sqrt prices encoded as Q64.96.
//
// Notes:
// - Results are bit-exact with the on-chain library. No floating point anywhere.
// - Ticks are i32 and must lie in [MIN_TICK, MAX_TICK]; spacings in [1, 32767].
// - Valid sqrt-price inputs to the price->tick direction are [MIN_SQRT_RATIO, MAX_SQRT_RATIO).

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::constants::{
    max_sqrt_ratio, min_sqrt_ratio, MAX_TICK, MAX_TICK_SPACING, MIN_TICK, MIN_TICK_SPACING,
};
use crate::error::TickMathError;

// 1/sqrt(1.0001)^(2^i) as Q128.128 for i = 1..19; bit 0 seeds the ratio separately.
const RATIO_BIT_0: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

// log2 -> log_sqrt(1.0001) multiplier and the two error bounds of the 14-bit estimate.
const LOG_SQRT10001_MULTIPLIER: u128 = 255_738_958_999_603_826_347_141;
const TICK_LOW_ERROR: u128 = 3_402_992_956_809_132_418_596_140_100_660_247_210;
const TICK_HIGH_ERROR: u128 = 291_339_464_771_989_622_907_027_621_153_398_088_495;

const LOG2_FRACTION_ITERATIONS: u32 = 14;

// --------------------------------- Helpers ---------------------------------

/// floor(x / 2^bits), also for negative x.
#[inline]
fn floor_shr(x: &BigInt, bits: u32) -> BigInt {
    x.div_floor(&(BigInt::one() << bits))
}

#[inline]
fn clamp_tick(tick: BigInt) -> i32 {
    if tick > BigInt::from(MAX_TICK) {
        MAX_TICK
    } else if tick < BigInt::from(MIN_TICK) {
        MIN_TICK
    } else {
        tick.to_i32().unwrap_or(MIN_TICK)
    }
}

/// Position of the highest set bit; 0 for 0.
pub fn most_significant_bit(x: &BigInt) -> u64 {
    if x.is_zero() {
        0
    } else {
        x.bits() - 1
    }
}

pub fn validate_tick_spacing(tick_spacing: i32) -> Result<(), TickMathError> {
    if (MIN_TICK_SPACING..=MAX_TICK_SPACING).contains(&tick_spacing) {
        Ok(())
    } else {
        Err(TickMathError::InvalidTickSpacing(tick_spacing))
    }
}

// -------------------------------- Tick Math --------------------------------

/// sqrt(1.0001^tick) * 2^96.
///
/// Errors with `InvalidTick` when `|tick| > MAX_TICK`.
pub fn get_sqrt_price_at_tick(tick: i32) -> Result<BigInt, TickMathError> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK.unsigned_abs() {
        return Err(TickMathError::InvalidTick(i64::from(tick)));
    }

    // ratio is Q128.128
    let mut ratio = if abs_tick & 0x1 != 0 {
        BigInt::from(RATIO_BIT_0)
    } else {
        BigInt::one() << 128
    };

    macro_rules! ms {
        ($mask:literal, $constant:expr) => {
            if abs_tick & $mask != 0 {
                ratio = (&ratio * BigInt::from($constant)) >> 128;
            }
        };
    }

    ms!(0x2,     0xfff97272373d413259a46990580e213a_u128);
    ms!(0x4,     0xfff2e50f5f656932ef12357cf3c7fdcc_u128);
    ms!(0x8,     0xffe5caca7e10e4e61c3624eaa0941cd0_u128);
    ms!(0x10,    0xffcb9843d60f6159c9db58835c926644_u128);
    ms!(0x20,    0xff973b41fa98c081472e6896dfb254c0_u128);
    ms!(0x40,    0xff2ea16466c96a3843ec78b326b52861_u128);
    ms!(0x80,    0xfe5dee046a99a2a811c461f1969c3053_u128);
    ms!(0x100,   0xfcbe86c7900a88aedcffc83b479aa3a4_u128);
    ms!(0x200,   0xf987a7253ac413176f2b074cf7815e54_u128);
    ms!(0x400,   0xf3392b0822b70005940c7a398e4b70f3_u128);
    ms!(0x800,   0xe7159475a2c29b7443b29c7fa6e889d9_u128);
    ms!(0x1000,  0xd097f3bdfd2022b8845ad8f792aa5825_u128);
    ms!(0x2000,  0xa9f746462d870fdf8a65dc1f90e061e5_u128);
    ms!(0x4000,  0x70d869a156d2a1b890bb3df62baf32f7_u128);
    ms!(0x8000,  0x31be135f97d08fd981231505542fcfa6_u128);
    ms!(0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9_u128);
    ms!(0x20000, 0x5d6af8dedb81196699c329225ee604_u128);
    ms!(0x40000, 0x2216e584f5fa1ea926041bedfe98_u128);
    ms!(0x80000, 0x48a170391f7dc42444e8fa2_u128);

    // the table encodes negative ticks
    if tick > 0 {
        let max = (BigInt::one() << 256) - 1u8;
        ratio = max / ratio;
    }
    // round-up shift by 32 (Q128.128 -> Q64.96)
    Ok((ratio + ((BigInt::one() << 32) - 1u8)) >> 32)
}

/// Greatest tick such that `get_sqrt_price_at_tick(tick) <= sqrt_price_x96`.
///
/// Errors with `InvalidSqrtPrice` outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
pub fn get_tick_at_sqrt_price(sqrt_price_x96: &BigInt) -> Result<i32, TickMathError> {
    if *sqrt_price_x96 < min_sqrt_ratio() || *sqrt_price_x96 >= max_sqrt_ratio() {
        return Err(TickMathError::InvalidSqrtPrice(sqrt_price_x96.clone()));
    }

    let price: BigInt = sqrt_price_x96 << 32;
    let msb = most_significant_bit(&price);

    // normalize to a 128-bit mantissa in [2^127, 2^128)
    let mut r = if msb >= 128 {
        &price >> (msb - 127)
    } else {
        &price << (127 - msb)
    };

    let mut log_2 = BigInt::from(msb as i64 - 128) << 64;

    for i in 0..LOG2_FRACTION_ITERATIONS {
        r = (&r * &r) >> 127;
        let f: BigInt = &r >> 128;
        // low 64 bits of log_2 are still clear, so adding sets the bit
        log_2 += &f << (63 - i);
        if f.is_one() {
            r >>= 1;
        }
    }

    let log_sqrt10001 = log_2 * BigInt::from(LOG_SQRT10001_MULTIPLIER);

    let tick_low = clamp_tick(floor_shr(&(&log_sqrt10001 - BigInt::from(TICK_LOW_ERROR)), 128));
    let tick_high = clamp_tick(floor_shr(&(&log_sqrt10001 + BigInt::from(TICK_HIGH_ERROR)), 128));

    if tick_low == tick_high {
        Ok(tick_low)
    } else if get_sqrt_price_at_tick(tick_high)? <= *sqrt_price_x96 {
        Ok(tick_high)
    } else {
        Ok(tick_low)
    }
}

/// Sqrt price of the mirrored tick: the same price seen from the other token.
pub fn invert_sqrt_price_x96(sqrt_price_x96: &BigInt) -> Result<BigInt, TickMathError> {
    let tick = get_tick_at_sqrt_price(sqrt_price_x96)?;
    get_sqrt_price_at_tick(-tick)
}

// ------------------------------ Tick spacing -------------------------------

/// Snaps a tick onto the spacing grid.
///
/// `round == false` truncates toward zero. `round == true` works on `|tick|`, rounding away
/// from zero only when the remainder is strictly more than half a spacing, then restores
/// the sign, so negative ticks behave like their positive mirror.
pub fn quantize_tick(tick: i32, tick_spacing: i32, round: bool) -> Result<i32, TickMathError> {
    validate_tick_spacing(tick_spacing)?;

    if round {
        let abs_tick = tick.unsigned_abs();
        let spacing = tick_spacing.unsigned_abs();
        let abs_mod = abs_tick % spacing;
        let abs_result = if abs_mod > spacing / 2 {
            abs_tick + (spacing - abs_mod)
        } else {
            abs_tick - abs_mod
        };
        let magnitude = i64::from(abs_result);
        let signed = if tick >= 0 { magnitude } else { -magnitude };
        i32::try_from(signed).map_err(|_| TickMathError::InvalidTick(signed))
    } else {
        Ok(tick - tick % tick_spacing)
    }
}

pub fn max_usable_tick(tick_spacing: i32) -> Result<i32, TickMathError> {
    validate_tick_spacing(tick_spacing)?;
    Ok((MAX_TICK / tick_spacing) * tick_spacing)
}

pub fn min_usable_tick(tick_spacing: i32) -> Result<i32, TickMathError> {
    validate_tick_spacing(tick_spacing)?;
    Ok((MIN_TICK / tick_spacing) * tick_spacing)
}

/// Tick must be inside the global range and on the spacing grid.
pub fn assert_tick_in_range(tick: i32, tick_spacing: i32) -> Result<(), TickMathError> {
    validate_tick_spacing(tick_spacing)?;
    if !(MIN_TICK..=MAX_TICK).contains(&tick) || tick % tick_spacing != 0 {
        return Err(TickMathError::InvalidTick(i64::from(tick)));
    }
    Ok(())
}

// ------------------------------- Minimal tests -------------------------------
