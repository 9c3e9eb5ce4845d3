// price_curve.rs
//
// Stepwise price curve: `num_steps` equal-size steps of the launched token, each sold at a
// fixed price scaled by 10^36. Built by the generators in `builder`, read by `analyzer`.

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::Signed;
use primitive_types::U256;

use crate::error::CurveError;

#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurveType {
    Flat,
    Linear,
    Quadratic,
    Cubic,
    SquareRoot,
}

impl CurveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveType::Flat => "flat",
            CurveType::Linear => "linear",
            CurveType::Quadratic => "quadratic",
            CurveType::Cubic => "cubic",
            CurveType::SquareRoot => "square_root",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveType {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(CurveType::Flat),
            "linear" => Ok(CurveType::Linear),
            "quadratic" => Ok(CurveType::Quadratic),
            "cubic" => Ok(CurveType::Cubic),
            "square_root" => Ok(CurveType::SquareRoot),
            _ => Err(CurveError::UnknownCurveType(s.to_string())),
        }
    }
}

/// An immutable stepwise price curve. Always holds at least one price, and exactly
/// `num_steps` of them.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PriceCurveParams", into = "PriceCurveParams")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceCurve {
    prices: Vec<BigInt>,
    num_steps: u64,
    step_size: BigInt,
}

impl PriceCurve {
    // Callers guarantee `prices` is non-empty.
    pub(crate) fn from_parts(prices: Vec<BigInt>, step_size: BigInt) -> Self {
        let num_steps = prices.len() as u64;
        Self { prices, num_steps, step_size }
    }

    pub fn prices(&self) -> &[BigInt] {
        &self.prices
    }

    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    pub fn step_size(&self) -> &BigInt {
        &self.step_size
    }

    /// `step_size * num_steps`, the supply sold through the curve.
    pub fn total_supply(&self) -> BigInt {
        &self.step_size * BigInt::from(self.num_steps)
    }

    pub fn start_price(&self) -> &BigInt {
        &self.prices[0]
    }

    pub fn end_price(&self) -> &BigInt {
        &self.prices[self.prices.len() - 1]
    }

    /// Prices as unsigned 256-bit words, the form the launch contract takes.
    pub fn to_u256_prices(&self) -> Result<Vec<U256>, CurveError> {
        self.prices.iter().map(bigint_to_u256).collect()
    }
}

pub(crate) fn bigint_to_u256(value: &BigInt) -> Result<U256, CurveError> {
    let (sign, bytes) = value.to_bytes_be();
    if sign == Sign::Minus || bytes.len() > 32 {
        return Err(CurveError::PriceOverflow(value.clone()));
    }
    Ok(U256::from_big_endian(&bytes))
}

/// Wire form of a [`PriceCurve`]: every integer as a decimal string, field names as the
/// launch contract ABI spells them.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceCurveParams {
    pub prices: Vec<String>,
    pub num_steps: String,
    pub step_size: String,
}

fn parse_integer(raw: &str) -> Result<BigInt, CurveError> {
    BigInt::from_str(raw.trim()).map_err(|e| CurveError::InvalidDecimalAmount {
        amount: raw.to_string(),
        reason: e.to_string(),
    })
}

impl TryFrom<PriceCurveParams> for PriceCurve {
    type Error = CurveError;

    fn try_from(params: PriceCurveParams) -> Result<Self, Self::Error> {
        let num_steps = params.num_steps.trim().parse::<u64>().map_err(|e| {
            CurveError::InvalidDecimalAmount { amount: params.num_steps.clone(), reason: e.to_string() }
        })?;
        if params.prices.is_empty() {
            return Err(CurveError::EmptyCurve);
        }
        if params.prices.len() as u64 != num_steps {
            return Err(CurveError::StepCountMismatch { prices: params.prices.len(), num_steps });
        }

        let step_size = parse_integer(&params.step_size)?;
        if step_size.is_negative() {
            return Err(CurveError::NegativeAmount(step_size));
        }
        let prices = params
            .prices
            .iter()
            .map(|p| parse_integer(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceCurve::from_parts(prices, step_size))
    }
}

impl From<PriceCurve> for PriceCurveParams {
    fn from(curve: PriceCurve) -> Self {
        Self {
            prices: curve.prices.iter().map(ToString::to_string).collect(),
            num_steps: curve.num_steps.to_string(),
            step_size: curve.step_size.to_string(),
        }
    }
}
