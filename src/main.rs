use anyhow::{Context, Result};

use bonding_curve_math::config::Config;
use bonding_curve_math::curve::units::format_base_token_amount_for_curve;
use bonding_curve_math::curve::{analyze_curve, initialize_curve};
use bonding_curve_math::launch::graduation_params;
use bonding_curve_math::models::CurveReport;

fn main() -> Result<()> {
    env_logger::init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    let start_price = format_base_token_amount_for_curve(&config.start_price, config.base_token_decimals)
        .context("CURVE_START_PRICE is not a valid base token amount")?;
    let end_price = format_base_token_amount_for_curve(&config.end_price, config.base_token_decimals)
        .context("CURVE_END_PRICE is not a valid base token amount")?;

    let curve = initialize_curve(
        config.curve_type,
        &start_price,
        &end_price,
        config.num_steps,
        &config.bonding_curve_supply,
    )
    .context("Failed to build price curve")?;
    let analysis = analyze_curve(&curve).context("Failed to analyze price curve")?;

    let graduation = graduation_params(
        &curve,
        config.graduation_fee_bps,
        &config.liquidity_pool_supply,
        config.pool_fee_bps,
    );
    match &graduation {
        Ok(params) => log::info!(
            "curve graduates into ticks [{}, {}, {}]",
            params.starting_tick, params.target_tick, params.end_tick
        ),
        Err(e) => log::warn!("curve is not graduatable: {}", e),
    }

    let report = CurveReport::new(
        config.curve_type,
        &curve,
        &analysis,
        &config.liquidity_pool_supply,
        config.base_token_decimals,
        graduation,
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
