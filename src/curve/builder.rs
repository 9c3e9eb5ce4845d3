// builder.rs
//
// Curve generators. Prices are integers scaled by 10^36; every generator hits the declared
// start and end prices exactly and checks that before returning.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::curve::price_curve::{CurveType, PriceCurve};
use crate::error::CurveError;
use crate::math::big_sqrt;

/// Builds a curve of `curve_type`. The supply is rounded down to a multiple of `num_steps`.
pub fn initialize_curve(
    curve_type: CurveType,
    start_price: &BigInt,
    end_price: &BigInt,
    num_steps: u64,
    approx_supply: &BigInt,
) -> Result<PriceCurve, CurveError> {
    if num_steps < 1 {
        return Err(CurveError::InvalidStepCount);
    }

    let steps = BigInt::from(num_steps);
    let actual_supply = (approx_supply / &steps) * &steps;

    let curve = match curve_type {
        CurveType::Flat => {
            if start_price != end_price || num_steps != 1 {
                return Err(CurveError::InvalidFlatCurve);
            }
            flat_curve(start_price, &actual_supply)
        }
        CurveType::Linear => linear_curve(start_price, end_price, num_steps, &actual_supply)?,
        CurveType::Quadratic => quadratic_curve(start_price, end_price, num_steps, &actual_supply)?,
        CurveType::Cubic => {
            accelerating_power_curve(start_price, end_price, num_steps, &actual_supply)?
        }
        CurveType::SquareRoot => sqrt_curve(start_price, end_price, num_steps, &actual_supply)?,
    };

    log::debug!(
        "initialized {} curve: {} steps of {} from {} to {}",
        curve_type,
        curve.num_steps(),
        curve.step_size(),
        curve.start_price(),
        curve.end_price()
    );
    Ok(curve)
}

/// Single step at `price` carrying the whole supply.
pub fn flat_curve(price: &BigInt, total_supply: &BigInt) -> PriceCurve {
    PriceCurve::from_parts(vec![price.clone()], total_supply.clone())
}

/// Evenly spaced prices. The `diff % (n-1)` remainder is spread one unit at a time over the
/// first steps so the last price lands on `end_price`.
pub fn linear_curve(
    start_price: &BigInt,
    end_price: &BigInt,
    num_steps: u64,
    supply: &BigInt,
) -> Result<PriceCurve, CurveError> {
    validate_inputs(supply, num_steps, start_price, end_price)?;

    let step_size = supply / BigInt::from(num_steps);
    let diff = end_price - start_price;
    let denom = BigInt::from(num_steps - 1);
    let lo_mult = &diff / &denom;
    let hi_mult = &lo_mult + BigInt::one();
    let hi_cutoff = &diff % &denom;

    let mut prices = Vec::new();
    let mut current = start_price.clone();
    for i in 0..num_steps {
        prices.push(current.clone());
        if BigInt::from(i) < hi_cutoff {
            current += &hi_mult;
        } else {
            current += &lo_mult;
        }
    }

    finish(prices, step_size, start_price, end_price)
}

/// `start + diff * i^2 / (n-1)^2`
pub fn quadratic_curve(
    start_price: &BigInt,
    end_price: &BigInt,
    num_steps: u64,
    supply: &BigInt,
) -> Result<PriceCurve, CurveError> {
    validate_inputs(supply, num_steps, start_price, end_price)?;

    let diff = end_price - start_price;
    let last = BigInt::from(num_steps - 1);
    let denom = &last * &last;

    let mut prices = Vec::new();
    // i^2 as a running sum of odd numbers
    let mut idx2 = BigInt::zero();
    for i in 0..num_steps {
        prices.push(start_price + &diff * &idx2 / &denom);
        idx2 += 2 * BigInt::from(i) + 1;
    }

    let step_size = supply / BigInt::from(num_steps);
    finish(prices, step_size, start_price, end_price)
}

/// Cubic curve, `start + diff * i^3 / (n-1)^3`.
pub fn accelerating_power_curve(
    start_price: &BigInt,
    end_price: &BigInt,
    num_steps: u64,
    supply: &BigInt,
) -> Result<PriceCurve, CurveError> {
    validate_inputs(supply, num_steps, start_price, end_price)?;

    let diff = end_price - start_price;
    let last = BigInt::from(num_steps - 1);
    let denom3 = &last * &last * &last;

    let mut prices = Vec::new();
    let mut i2 = BigInt::zero();
    let mut i3 = BigInt::zero();
    for i in 0..num_steps {
        let idx = BigInt::from(i);
        prices.push(start_price + &diff * &i3 / &denom3);
        // (i+1)^3 = i^3 + 3(i^2 + i) + 1, (i+1)^2 = i^2 + 2i + 1
        i3 += 3 * (&i2 + &idx) + 1;
        i2 += 2 * idx + 1;
    }

    let step_size = supply / BigInt::from(num_steps);
    finish(prices, step_size, start_price, end_price)
}

/// `start + sqrt(diff^2 * i / n)`. The formula stops short of `end_price` at `i = n-1`, so
/// the last step is pinned to it.
pub fn sqrt_curve(
    start_price: &BigInt,
    end_price: &BigInt,
    num_steps: u64,
    supply: &BigInt,
) -> Result<PriceCurve, CurveError> {
    validate_inputs(supply, num_steps, start_price, end_price)?;

    let diff = end_price - start_price;
    let diff_sq = &diff * &diff;
    let steps = BigInt::from(num_steps);

    let mut prices = Vec::new();
    for i in 0..num_steps {
        let offset = big_sqrt::sqrt(&(&diff_sq * BigInt::from(i) / &steps))?;
        prices.push(start_price + offset);
    }
    if let Some(last) = prices.last_mut() {
        *last = end_price.clone();
    }

    finish(prices, supply / steps, start_price, end_price)
}

/// Takes `prices` as given; `step_size = supply / prices.len()`.
pub fn custom_curve(prices: Vec<BigInt>, supply: &BigInt) -> Result<PriceCurve, CurveError> {
    if prices.is_empty() {
        return Err(CurveError::EmptyCurve);
    }
    let step_size = supply / BigInt::from(prices.len());
    Ok(PriceCurve::from_parts(prices, step_size))
}

fn validate_inputs(
    supply: &BigInt,
    num_steps: u64,
    start_price: &BigInt,
    end_price: &BigInt,
) -> Result<(), CurveError> {
    if num_steps <= 1
        || start_price >= end_price
        || !(supply % BigInt::from(num_steps)).is_zero()
    {
        return Err(CurveError::InvalidPriceCurveInput {
            num_steps,
            start_price: start_price.clone(),
            end_price: end_price.clone(),
            supply: supply.clone(),
        });
    }
    Ok(())
}

fn finish(
    prices: Vec<BigInt>,
    step_size: BigInt,
    start_price: &BigInt,
    end_price: &BigInt,
) -> Result<PriceCurve, CurveError> {
    match (prices.first(), prices.last()) {
        (Some(first), _) if first != start_price => Err(CurveError::CurveEndpointMismatch {
            which: "start",
            expected: start_price.clone(),
            actual: first.clone(),
        }),
        (_, Some(last)) if last != end_price => Err(CurveError::CurveEndpointMismatch {
            which: "end",
            expected: end_price.clone(),
            actual: last.clone(),
        }),
        (None, _) | (_, None) => Err(CurveError::EmptyCurve),
        _ => Ok(PriceCurve::from_parts(prices, step_size)),
    }
}
