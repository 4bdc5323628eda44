//! Metric values and numeric type inference
//!
//! Every scalar carried by a [`CheckResult`](crate::check::result::CheckResult) is a
//! [`MetricValue`]. Before a value is written in a typed output format it is run
//! through [`get_value_types`], which normalises the literal and assigns one of the
//! type tags understood by downstream collectors (`float`, `int32`, `int64`, `string`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest magnitude still reported as `int32`
pub const INT32_MAX: u64 = 2_147_483_647;

/// A scalar metric or tag value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Numbers and booleans are never quoted in line protocol output
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            MetricValue::Bool(_) | MetricValue::Int(_) | MetricValue::Float(_)
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Bool(b) => write!(f, "{}", b),
            MetricValue::Int(i) => write!(f, "{}", i),
            MetricValue::Float(v) => f.write_str(&format_float(*v)),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Render a float the way metric consumers expect it: always with a decimal
/// point or exponent, so `3.0` never collapses to `3`.
///
/// Uses the shortest digits that round-trip. Decimal exponents from -4 to 15
/// are written positionally, anything else as `<digits>e<sign><exp>` with at
/// least two exponent digits (`1e+20`, `1e-05`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. `-1.2345e3`
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if (-4..16).contains(&exponent) {
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
        let point = exponent + 1;
        let body = if point <= 0 {
            format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
        } else {
            let point = point as usize;
            if digits.len() > point {
                format!("{}.{}", &digits[..point], &digits[point..])
            } else {
                format!("{}{}.0", digits, "0".repeat(point - digits.len()))
            }
        };
        format!("{}{}", sign, body)
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exponent.unsigned_abs())
    }
}

macro_rules! impl_from_int {
    ( $( $t:ty ),+ ) => {
        $(
            impl From<$t> for MetricValue {
                fn from(v: $t) -> Self {
                    MetricValue::Int(v as i64)
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, usize);

impl From<bool> for MetricValue {
    fn from(v: bool) -> Self {
        MetricValue::Bool(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::Float(v as f64)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

/// Inferred measurement type of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Float,
    Int32,
    Int64,
    String,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalised value together with the measurement type it is reported as
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub value: MetricValue,
    pub measurement_type: String,
}

/// Normalise `value` and determine its measurement type.
///
/// Text containing a `.` is tried as a float first, floats stay floats, and
/// everything else is tried as an integer (`int64` once the magnitude exceeds
/// the signed 32-bit range). Anything that fails to parse is reported as
/// `string` and left untouched. A non-empty `measurement_type` always wins as
/// the returned tag, but the value is still normalised.
pub fn get_value_types(value: &MetricValue, measurement_type: Option<&str>) -> TypedValue {
    let (value, inferred) = match value {
        MetricValue::Text(text) if text.contains('.') => match text.trim().parse::<f64>() {
            Ok(parsed) => (MetricValue::Float(parsed), ValueType::Float),
            Err(_) => parse_integer_text(text),
        },
        MetricValue::Float(v) => (MetricValue::Float(*v), ValueType::Float),
        MetricValue::Int(i) => classify_integer(*i),
        MetricValue::Bool(b) => classify_integer(i64::from(*b)),
        MetricValue::Text(text) => parse_integer_text(text),
    };

    let measurement_type = match measurement_type {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => inferred.as_str().to_string(),
    };

    TypedValue {
        value,
        measurement_type,
    }
}

fn parse_integer_text(text: &str) -> (MetricValue, ValueType) {
    match text.trim().parse::<i64>() {
        Ok(parsed) => classify_integer(parsed),
        Err(_) => (MetricValue::Text(text.to_string()), ValueType::String),
    }
}

fn classify_integer(value: i64) -> (MetricValue, ValueType) {
    let kind = if value.unsigned_abs() > INT32_MAX {
        ValueType::Int64
    } else {
        ValueType::Int32
    };
    (MetricValue::Int(value), kind)
}
