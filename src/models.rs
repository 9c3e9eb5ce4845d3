use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::curve::analyzer::CurveAnalysis;
use crate::curve::price_curve::{CurveType, PriceCurve};
use crate::curve::units::{format_base_token_amount, format_curve_price_to_base_token_amount};
use crate::error::CurveError;
use crate::launch::GraduationParams;

// Integers are rendered as decimal strings; 10^36-scaled values overflow JSON numbers.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurveReport {
    pub timestamp_utc: DateTime<Utc>,
    pub curve_type: CurveType,
    pub curve: CurveDetails,
    pub analysis: AnalysisDetails,
    pub graduation: GraduationStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurveDetails {
    pub num_steps: u64,
    pub step_size: String,
    pub start_price: String,
    pub end_price: String,
    pub start_price_formatted: String, // base token per launched token
    pub end_price_formatted: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub bonding_curve_supply: String,
    pub base_token_accumulated: String,
    pub base_token_accumulated_formatted: String,
    pub min_liquidity_pool_supply: String,
    pub liquidity_pool_supply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GraduationStatus {
    pub graduatable: bool,
    pub params: Option<GraduationParams>,
    pub error: Option<String>,
}

impl GraduationStatus {
    pub fn from_result(result: Result<GraduationParams, CurveError>) -> Self {
        match result {
            Ok(params) => Self { graduatable: true, params: Some(params), error: None },
            Err(e) => Self { graduatable: false, params: None, error: Some(e.to_string()) },
        }
    }
}

impl CurveReport {
    pub fn new(
        curve_type: CurveType,
        curve: &PriceCurve,
        analysis: &CurveAnalysis,
        liquidity_pool_supply: &BigInt,
        base_token_decimals: u8,
        graduation: Result<GraduationParams, CurveError>,
    ) -> Self {
        Self {
            timestamp_utc: Utc::now(),
            curve_type,
            curve: CurveDetails {
                num_steps: curve.num_steps(),
                step_size: curve.step_size().to_string(),
                start_price: curve.start_price().to_string(),
                end_price: curve.end_price().to_string(),
                start_price_formatted: format_curve_price_to_base_token_amount(
                    curve.start_price(),
                    base_token_decimals,
                ),
                end_price_formatted: format_curve_price_to_base_token_amount(
                    curve.end_price(),
                    base_token_decimals,
                ),
            },
            analysis: AnalysisDetails {
                bonding_curve_supply: analysis.bonding_curve_supply.to_string(),
                base_token_accumulated: analysis.base_token_accumulated.to_string(),
                base_token_accumulated_formatted: format_base_token_amount(
                    &analysis.base_token_accumulated,
                    base_token_decimals,
                ),
                min_liquidity_pool_supply: analysis.min_liquidity_pool_supply.to_string(),
                liquidity_pool_supply: liquidity_pool_supply.to_string(),
            },
            graduation: GraduationStatus::from_result(graduation),
        }
    }
}
