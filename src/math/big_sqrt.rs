// big_sqrt.rs
//
// Exact floor(sqrt(n)) for arbitrary-size integers.
//
// f64 gives a correct seed only below 2^53, so larger inputs are split in two halves of
// even bit width, the root of the high half is found recursively and one Newton step on
// the recombined value restores the low bits. The caller-facing result is then pulled
// down by one if it overshoots.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive};

use crate::error::SqrtError;

// 2^53 - 1, the largest integer an f64 represents exactly.
const F64_EXACT_LIMIT: u64 = 9_007_199_254_740_991;
const F64_MANTISSA_BITS: u64 = 53;

/// Returns `floor(sqrt(n))`.
pub fn sqrt(n: &BigInt) -> Result<BigInt, SqrtError> {
    if n.is_negative() {
        return Err(SqrtError::NegativeRadicand(n.clone()));
    }
    if n < &BigInt::from(F64_EXACT_LIMIT) {
        return Ok(float_sqrt(n));
    }

    let mut root = approx(n, n.bits());
    if &root * &root > *n {
        root -= 1;
    }
    Ok(root)
}

// Seed path, only valid for n < 2^53.
fn float_sqrt(n: &BigInt) -> BigInt {
    let as_f64 = n.to_u64().map_or(0.0, |v| v as f64);
    let mut root = BigInt::from(as_f64.sqrt().floor() as u64);
    if &root * &root > *n {
        root -= 1;
    }
    root
}

fn approx(a: &BigInt, len: u64) -> BigInt {
    if len < F64_MANTISSA_BITS {
        return float_sqrt(a);
    }

    let mut base = len / 2 - len % 2;
    if base % 2 == 1 {
        base -= 1;
    }
    let half = base / 2;

    let hi = a >> base;
    let lo = a & ((BigInt::one() << base) - 1u8);
    let r1 = approx(&hi, len - base);

    // Newton refinement on the recombined value; `/` truncates toward zero.
    let numerator = ((&hi - &r1 * &r1) << base) + lo;
    let r0 = numerator / (&r1 * 2u8);

    (r1 << half) + r0.div_floor(&(BigInt::one() << half))
}
