// error.rs
//
// Typed failures for the numeric engine. Every variant is recoverable by the caller
// adjusting inputs; nothing here represents a broken engine state.

use std::fmt;

use num_bigint::BigInt;
use thiserror::Error;

/// Which way a caller has to move launch inputs to make a tick range derivable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// The start price fell below the valid range or the ratio is infeasible.
    IncreaseTargetPriceOrPoolSupply,
    /// The start price rose above the valid range.
    DecreaseTargetPriceOrIncreaseCurveSupply,
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remediation::IncreaseTargetPriceOrPoolSupply => {
                f.write_str("Please increase target price or increase liquidity pool supply")
            }
            Remediation::DecreaseTargetPriceOrIncreaseCurveSupply => {
                f.write_str("Please decrease target price or increase bonding curve supply")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqrtError {
    #[error("cannot take the square root of negative value {0}")]
    NegativeRadicand(BigInt),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickMathError {
    #[error("invalid tick: {0}")]
    InvalidTick(i64),

    #[error("invalid tick spacing: {0}")]
    InvalidTickSpacing(i32),

    #[error("invalid sqrt price: {0}")]
    InvalidSqrtPrice(BigInt),

    #[error("invalid token amount: {0}")]
    InvalidTokenAmount(BigInt),

    #[error("base token amount must be non-zero, got {0}")]
    InvalidBaseTokenAmount(BigInt),

    #[error("subtraction is greater than the price target: {sub_by} > {sqrt_target_price}")]
    SubByTooLarge {
        sub_by: BigInt,
        sqrt_target_price: BigInt,
    },

    #[error("start tick is too low: {sqrt_start_price} < {min_sqrt_ratio}")]
    StartTickTooLow {
        sqrt_start_price: BigInt,
        min_sqrt_ratio: BigInt,
    },

    #[error("start tick is too high: {sqrt_start_price} > {max_sqrt_ratio}")]
    StartTickTooHigh {
        sqrt_start_price: BigInt,
        max_sqrt_ratio: BigInt,
    },

    #[error("start tick should not exceed target tick: {start_tick} > {target_tick}")]
    StartTickAboveTarget { start_tick: i32, target_tick: i32 },
}

impl TickMathError {
    /// Directional advice for the start-tick bound failures.
    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            TickMathError::StartTickTooLow { .. } => {
                Some(Remediation::IncreaseTargetPriceOrPoolSupply)
            }
            TickMathError::StartTickTooHigh { .. } => {
                Some(Remediation::DecreaseTargetPriceOrIncreaseCurveSupply)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("num steps must be greater than 0")]
    InvalidStepCount,

    #[error("flat curve must have start_price == end_price and num_steps == 1")]
    InvalidFlatCurve,

    #[error(
        "invalid price curve input: num_steps must be > 1, start_price must be < end_price, \
         and bonding curve supply must be divisible by num_steps \
         (num_steps={num_steps}, start_price={start_price}, end_price={end_price}, supply={supply})"
    )]
    InvalidPriceCurveInput {
        num_steps: u64,
        start_price: BigInt,
        end_price: BigInt,
        supply: BigInt,
    },

    #[error("price curve does not {which} at the declared price: expected {expected}, got {actual}")]
    CurveEndpointMismatch {
        which: &'static str,
        expected: BigInt,
        actual: BigInt,
    },

    #[error("price curve has no steps")]
    EmptyCurve,

    #[error("number of prices ({prices}) must equal num_steps ({num_steps})")]
    StepCountMismatch { prices: usize, num_steps: u64 },

    #[error("bonding curve supply ({supply}) must equal num_steps * step_size ({expected})")]
    SupplyMismatch { supply: BigInt, expected: BigInt },

    #[error("amount must not be negative: {0}")]
    NegativeAmount(BigInt),

    #[error("fee of {0} bps exceeds 10000")]
    InvalidFeeBps(u32),

    #[error("unknown curve type: {0}")]
    UnknownCurveType(String),

    #[error("invalid decimal amount {amount:?}: {reason}")]
    InvalidDecimalAmount { amount: String, reason: String },

    #[error("price {0} does not fit in 256 bits")]
    PriceOverflow(BigInt),

    #[error("{0}")]
    NotGraduatable(Remediation),

    #[error(transparent)]
    Sqrt(#[from] SqrtError),

    #[error(transparent)]
    TickMath(#[from] TickMathError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_tick_errors_carry_opposite_remediation() {
        let low = TickMathError::StartTickTooLow {
            sqrt_start_price: BigInt::from(1),
            min_sqrt_ratio: BigInt::from(4_295_128_739u64),
        };
        let high = TickMathError::StartTickTooHigh {
            sqrt_start_price: BigInt::from(2),
            max_sqrt_ratio: BigInt::from(1),
        };
        assert_eq!(low.remediation(), Some(Remediation::IncreaseTargetPriceOrPoolSupply));
        assert_eq!(
            high.remediation(),
            Some(Remediation::DecreaseTargetPriceOrIncreaseCurveSupply)
        );
        assert_eq!(TickMathError::InvalidTick(1).remediation(), None);
    }

    #[test]
    fn not_graduatable_message_is_the_advice() {
        let err = CurveError::NotGraduatable(Remediation::IncreaseTargetPriceOrPoolSupply);
        assert_eq!(
            err.to_string(),
            "Please increase target price or increase liquidity pool supply"
        );
    }
}
