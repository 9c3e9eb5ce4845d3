use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use num_bigint::BigInt;

use crate::curve::price_curve::CurveType;

#[derive(Debug, Clone)]
pub struct Config {
    pub curve_type: CurveType,
    // Prices of one launched token in base-token units, as typed by a human ("0.000001")
    pub start_price: String,
    pub end_price: String,
    pub base_token_decimals: u8,
    pub num_steps: u64,

    // Raw 18-decimal token amounts
    pub bonding_curve_supply: BigInt,
    pub liquidity_pool_supply: BigInt,

    // Fees
    pub graduation_fee_bps: u32,
    pub pool_fee_bps: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Launch-specific file first, then the generic one
        dotenv::from_filename("curve.env").ok();
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{} must be set", key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let curve_type = CurveType::from_str(&or_default("CURVE_TYPE", "linear"))
            .context("CURVE_TYPE must be one of flat, linear, quadratic, cubic, square_root")?;

        let start_price = required("CURVE_START_PRICE")?;
        let end_price = lookup("CURVE_END_PRICE").unwrap_or_else(|| start_price.clone());

        Ok(Config {
            curve_type,
            start_price,
            end_price,
            base_token_decimals: or_default("BASE_TOKEN_DECIMALS", "18")
                .parse::<u8>()
                .context("BASE_TOKEN_DECIMALS must be an integer between 0 and 255")?,
            num_steps: or_default("CURVE_NUM_STEPS", "100")
                .parse()
                .context("CURVE_NUM_STEPS must be an integer")?,

            bonding_curve_supply: BigInt::from_str(&required("BONDING_CURVE_SUPPLY")?)
                .context("BONDING_CURVE_SUPPLY must be an integer amount")?,
            liquidity_pool_supply: BigInt::from_str(&required("LIQUIDITY_POOL_SUPPLY")?)
                .context("LIQUIDITY_POOL_SUPPLY must be an integer amount")?,

            graduation_fee_bps: or_default("GRADUATION_FEE_BPS", "0")
                .parse()
                .context("GRADUATION_FEE_BPS must be an integer")?,
            pool_fee_bps: or_default("POOL_FEE_BPS", "100")
                .parse()
                .context("POOL_FEE_BPS must be an integer")?,
        })
    }
}
