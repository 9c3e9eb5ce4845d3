// constants.rs
//
// Fixed-point scales shared by the curve builder, the analyzer and the tick converter.
// These mirror values baked into the launch contracts; they are not runtime configuration.

use num_bigint::BigInt;
use num_traits::One;

/// Decimals of every token minted by the launchpad.
pub const MINTED_TOKEN_DECIMALS: u32 = 18;

/// Curve prices are stored multiplied by 10^SCALE_EXPONENT. Must stay even so that
/// the square root of the scale is an integer.
pub const SCALE_EXPONENT: u32 = 36;

/// Tick spacing used when a curve graduates into the AMM pool.
pub const DEFAULT_TICK_SPACING: i32 = 200;

/// Basis-point denominator (100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

pub const MIN_TICK: i32 = -887_272;
pub const MAX_TICK: i32 = 887_272;
pub const MIN_TICK_SPACING: i32 = 1;
pub const MAX_TICK_SPACING: i32 = 32_767;

const MIN_SQRT_RATIO_U64: u64 = 4_295_128_739;
// 1461446703485210103287273052203988822378723970342 split into limbs above/below 2^128
const MAX_SQRT_RATIO_HI: u32 = 0xfffd_8963;
const MAX_SQRT_RATIO_LO: u128 = 0xefd1_fc6a_5064_8849_5d95_1d52_6398_8d26;

/// 10^36
#[inline]
pub fn scale_factor() -> BigInt {
    BigInt::from(10u8).pow(SCALE_EXPONENT)
}

/// 10^18, the square root of [`scale_factor`].
#[inline]
pub fn scale_factor_sqrt() -> BigInt {
    BigInt::from(10u8).pow(SCALE_EXPONENT / 2)
}

/// Smallest sqrt price, `get_sqrt_price_at_tick(MIN_TICK)`.
#[inline]
pub fn min_sqrt_ratio() -> BigInt {
    BigInt::from(MIN_SQRT_RATIO_U64)
}

/// Largest sqrt price, `get_sqrt_price_at_tick(MAX_TICK)`.
#[inline]
pub fn max_sqrt_ratio() -> BigInt {
    (BigInt::from(MAX_SQRT_RATIO_HI) << 128) + BigInt::from(MAX_SQRT_RATIO_LO)
}

/// 2^96
#[inline]
pub fn q96() -> BigInt {
    BigInt::one() << 96
}
