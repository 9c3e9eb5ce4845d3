// units.rs
//
// Decimal strings <-> fixed-point integers. Curve prices carry
// `SCALE_EXPONENT + base_decimals - MINTED_TOKEN_DECIMALS` decimals: the price of one
// 18-decimal launched unit in base-token units, times 10^36.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::constants::{MINTED_TOKEN_DECIMALS, SCALE_EXPONENT};
use crate::error::CurveError;

// Largest decimal shift accepted in either direction; curve prices need at most
// SCALE_EXPONENT + u8::MAX - MINTED_TOKEN_DECIMALS.
pub const MAX_UNIT_DECIMALS: u32 = 1_024;

fn invalid(amount: &str, reason: impl Into<String>) -> CurveError {
    CurveError::InvalidDecimalAmount { amount: amount.to_string(), reason: reason.into() }
}

fn bounded_exponent(amount: &str, shift: i64) -> Result<u32, CurveError> {
    u32::try_from(shift.unsigned_abs())
        .ok()
        .filter(|exp| *exp <= MAX_UNIT_DECIMALS)
        .ok_or_else(|| invalid(amount, format!("exponent exceeds {}", MAX_UNIT_DECIMALS)))
}

/// Parses a human decimal (`"1.5"`, `"2e-3"`) into an integer with `decimals` implied
/// decimals. More fractional digits than `decimals` is an error, not a rounding.
pub fn parse_units(amount: &str, decimals: u32) -> Result<BigInt, CurveError> {
    if decimals > MAX_UNIT_DECIMALS {
        return Err(invalid(amount, format!("{} decimals exceeds {}", decimals, MAX_UNIT_DECIMALS)));
    }
    let value = BigDecimal::from_str(amount.trim()).map_err(|e| invalid(amount, e.to_string()))?;
    let (digits, scale) = value.as_bigint_and_exponent();

    let shift = i64::from(decimals) - scale;
    let exp = bounded_exponent(amount, shift)?;
    if shift >= 0 {
        return Ok(digits * BigInt::from(10u8).pow(exp));
    }

    let (quotient, remainder) = digits.div_rem(&BigInt::from(10u8).pow(exp));
    if !remainder.is_zero() {
        return Err(invalid(amount, format!("more than {} decimal places", decimals)));
    }
    Ok(quotient)
}

/// Renders `value` with `decimals` implied decimals in plain notation, trailing zeros trimmed.
pub fn format_units(value: &BigInt, decimals: u32) -> Result<String, CurveError> {
    if decimals > MAX_UNIT_DECIMALS {
        return Err(invalid(&value.to_string(), format!("{} decimals exceeds {}", decimals, MAX_UNIT_DECIMALS)));
    }
    Ok(render_units(value, decimals))
}

fn render_units(value: &BigInt, decimals: u32) -> String {
    BigDecimal::new(value.clone(), i64::from(decimals)).normalized().to_plain_string()
}

/// Decimals a curve price carries for a base token with `base_token_decimals`.
pub fn curve_price_decimals(base_token_decimals: u8) -> u32 {
    SCALE_EXPONENT + u32::from(base_token_decimals) - MINTED_TOKEN_DECIMALS
}

/// Base-token price of one launched token (`"0.000001"` WETH, `"0.01"` USDC) as a curve
/// price.
pub fn format_base_token_amount_for_curve(
    amount: &str,
    base_token_decimals: u8,
) -> Result<BigInt, CurveError> {
    let price = parse_units(amount, curve_price_decimals(base_token_decimals))?;
    if price.is_negative() {
        return Err(CurveError::NegativeAmount(price));
    }
    Ok(price)
}

/// Base-token amount in its smallest unit rendered as a decimal.
pub fn format_base_token_amount(amount: &BigInt, base_token_decimals: u8) -> String {
    render_units(amount, u32::from(base_token_decimals))
}

pub fn format_curve_price_to_base_token_amount(price: &BigInt, base_token_decimals: u8) -> String {
    render_units(price, curve_price_decimals(base_token_decimals))
}
