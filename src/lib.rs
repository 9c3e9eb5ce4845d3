// lib.rs - Library exports for the report binary and integration tests

pub mod config;
pub mod constants;
pub mod curve;
#[cfg(feature = "serde")]
mod decimal_string;
pub mod error;
pub mod launch;
pub mod math;
#[cfg(feature = "serde")]
pub mod models;

pub use curve::{
    analyze_curve, analyze_curve_until, initialize_curve, validate_graduatable, CurveAnalysis,
    CurveType, PriceCurve,
};
pub use error::{CurveError, Remediation, SqrtError, TickMathError};
pub use math::liquidity_range::{derive_tick_range, TickTriple};
