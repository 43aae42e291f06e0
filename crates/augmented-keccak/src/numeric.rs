//! Coercion of loosely-typed leaves into arbitrary-precision integers.
//!
//! Numeric strings are read as floating point first and then truncated, so
//! `"10.9"` becomes `10` and digits beyond `f64` precision are rounded away.
//! Hashes computed by other implementations of this encoding depend on that
//! behavior, so it is kept as is.

use std::sync::OnceLock;

use num_bigint::BigInt;
use num_traits::FromPrimitive;
use regex::Regex;

use crate::validation::ValueError;
use crate::value::Value;

fn float_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("invalid regex")
    })
}

/// Integer value of a boolean, number, numeric string or big integer.
pub fn normalize(value: &Value) -> Result<BigInt, ValueError> {
    match value {
        Value::Bool(b) => Ok(BigInt::from(u8::from(*b))),
        Value::Number(n) => from_float(*n),
        Value::String(s) => from_float(parse_float(s)?),
        Value::BigInteger(i) => Ok(i.clone()),
        other => Err(ValueError::NotBigNumber(format!(
            "{} cannot be read as an integer",
            other.shape()
        ))),
    }
}

/// Longest leading floating-point literal of `text`, after leading whitespace.
pub fn parse_float(text: &str) -> Result<f64, ValueError> {
    float_prefix()
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .ok_or_else(|| ValueError::NotBigNumber(format!("'{}' is not numeric", text)))
}

/// Truncates a finite float toward zero.
pub fn from_float(n: f64) -> Result<BigInt, ValueError> {
    if !n.is_finite() {
        return Err(ValueError::NotBigNumber(n.to_string()));
    }
    BigInt::from_f64(n.trunc()).ok_or_else(|| ValueError::NotBigNumber(n.to_string()))
}
