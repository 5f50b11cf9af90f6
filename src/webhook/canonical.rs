//! Canonical string construction for webhook signatures.
//!
//! The signing side computes its signature over
//! `key1=value1&key2=value2&...` with keys in ascending byte order and the
//! `signature` field left out. Values are rendered with the signer's scalar
//! string coercion, so this must stay bit-exact.

use serde_json::{Map, Number, Value};

/// Name of the field holding the base64 signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// Rendering used for nested arrays and objects.
pub const NESTED_VALUE: &str = "Array";

/// Significant digits kept when rendering floats.
const FLOAT_PRECISION: i32 = 14;

/// Digits after the point in the scientific form, one less than the precision.
const MANTISSA_DECIMALS: usize = 13;

/// Builds the canonical string covered by a payload's signature.
///
/// The payload is only read.
///
/// # Example
///
/// ```
/// use lakipay::webhook::canonical_string;
///
/// let payload = serde_json::json!({"b": "2", "a": "1", "signature": "xyz"});
/// assert_eq!(canonical_string(payload.as_object().unwrap()), "a=1&b=2");
/// ```
#[must_use]
pub fn canonical_string(payload: &Map<String, Value>) -> String {
    let mut fields: Vec<(&String, &Value)> = payload
        .iter()
        .filter(|(key, _)| key.as_str() != SIGNATURE_FIELD)
        .collect();
    fields.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    fields
        .into_iter()
        .map(|(key, value)| format!("{key}={}", render_value(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Renders one field value the way the signer coerces it to a string.
#[must_use]
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(number) => render_number(number),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => NESTED_VALUE.to_string(),
    }
}

fn render_number(number: &Number) -> String {
    if number.is_i64() {
        return number.to_string();
    }

    // Unsigned values past i64::MAX reach the signer as floats.
    number
        .as_f64()
        .map_or_else(|| number.to_string(), render_float)
}

/// Renders a float with 14 significant digits, switching to `1.5E+20`
/// exponent form when the decimal exponent is below -4 or at least 14.
///
/// ```
/// use lakipay::webhook::render_value;
///
/// assert_eq!(render_value(&serde_json::json!(1e14)), "1.0E+14");
/// assert_eq!(render_value(&serde_json::json!(0.1 + 0.2)), "0.3");
/// ```
fn render_float(float: f64) -> String {
    if float.is_nan() {
        return "NAN".to_string();
    }
    if float.is_infinite() {
        return if float > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let scientific = format!("{float:.MANTISSA_DECIMALS$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return float.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return float.to_string();
    };

    let (sign, mantissa) = mantissa
        .strip_prefix('-')
        .map_or(("", mantissa), |rest| ("-", rest));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        return format!("{sign}0");
    }

    if exponent < -4 || exponent >= FLOAT_PRECISION {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{lead}.{rest}E{exp_sign}{}", exponent.abs());
    }

    if exponent < 0 {
        let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
        return format!("{sign}0.{zeros}{digits}");
    }

    let int_len = exponent.unsigned_abs() as usize + 1;
    if digits.len() <= int_len {
        format!("{sign}{digits}{}", "0".repeat(int_len - digits.len()))
    } else {
        let (int_part, frac_part) = digits.split_at(int_len);
        format!("{sign}{int_part}.{frac_part}")
    }
}
