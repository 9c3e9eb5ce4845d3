// decimal_string.rs
//
// `#[serde(with = "crate::decimal_string")]` for BigInt fields: decimal strings on the wire,
// since 10^36-scaled values overflow JSON numbers.

use std::str::FromStr;

use num_bigint::BigInt;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
    let raw = String::deserialize(deserializer)?;
    BigInt::from_str(raw.trim()).map_err(de::Error::custom)
}
