pub mod analyzer;
pub mod builder;
pub mod price_curve;
pub mod units;

pub use analyzer::{
    analyze_curve, analyze_curve_until, base_token_accumulated, corroborate_quote,
    validate_graduatable, CurveAnalysis, QuoteCheck,
};
pub use builder::{
    accelerating_power_curve, custom_curve, flat_curve, initialize_curve, linear_curve,
    quadratic_curve, sqrt_curve,
};
pub use price_curve::{CurveType, PriceCurve, PriceCurveParams};
