//! Keys and dynamically typed values as delivered by the broadcast source.
//!
//! Values are decoded into a small closed sum type at the client boundary. The
//! dispatcher then coerces them with the explicit helpers below instead of
//! relying on implicit casts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar value as published by the broadcast table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl TelemetryValue {
    /// Numeric view of the value.
    ///
    /// Text is trimmed and parsed as a float; booleans map to 1/0. Returns `None`
    /// when the value cannot be read as a finite number.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            TelemetryValue::Number(n) => *n,
            TelemetryValue::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            TelemetryValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    /// Numeric view with the dashboard's fallback: anything uncoercible reads as `0.0`.
    pub fn number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Text view used for label mutations.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TelemetryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryValue::Boolean(true) => write!(f, "True"),
            TelemetryValue::Boolean(false) => write!(f, "False"),
            TelemetryValue::Number(n) => write!(f, "{}", format_reading(*n)),
            TelemetryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for TelemetryValue {
    fn from(n: f64) -> Self {
        TelemetryValue::Number(n)
    }
}

impl From<bool> for TelemetryValue {
    fn from(b: bool) -> Self {
        TelemetryValue::Boolean(b)
    }
}

impl From<&str> for TelemetryValue {
    fn from(s: &str) -> Self {
        TelemetryValue::Text(s.to_string())
    }
}

impl From<String> for TelemetryValue {
    fn from(s: String) -> Self {
        TelemetryValue::Text(s)
    }
}

/// Format a reading the way robot-side Python prints floats: integral values
/// keep a trailing `.0` (`10.0`), and exponents carry a sign and at least two
/// digits (`1e+20`, `1.5e-07`).
pub fn format_reading(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    let s = format!("{v:?}");
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_numbers_are_parsed() {
        assert_eq!(TelemetryValue::from(" 42.5 ").as_number(), Some(42.5));
        assert_eq!(TelemetryValue::from("abc").as_number(), None);
        assert_eq!(TelemetryValue::from("abc").number_or_zero(), 0.0);
    }

    #[test]
    fn non_finite_numbers_fall_back_to_zero() {
        assert_eq!(TelemetryValue::Number(f64::NAN).as_number(), None);
        assert_eq!(TelemetryValue::from("inf").number_or_zero(), 0.0);
    }

    #[test]
    fn booleans_coerce_to_one_and_zero() {
        assert_eq!(TelemetryValue::from(true).as_number(), Some(1.0));
        assert_eq!(TelemetryValue::from(false).to_text(), "False");
    }

    #[test]
    fn readings_keep_a_decimal_point() {
        assert_eq!(format_reading(10.0), "10.0");
        assert_eq!(format_reading(87.5), "87.5");
        assert_eq!(TelemetryValue::Number(3.0).to_text(), "3.0");
    }

    #[test]
    fn exponents_are_signed_and_padded() {
        assert_eq!(format_reading(1e20), "1e+20");
        assert_eq!(format_reading(1e16), "1e+16");
        assert_eq!(format_reading(1.5e-7), "1.5e-07");
        assert_eq!(format_reading(-2.5e100), "-2.5e+100");
        assert_eq!(format_reading(0.0001), "0.0001");
        assert_eq!(format_reading(f64::NAN), "nan");
    }

    #[test]
    fn untagged_json_decodes_each_variant() {
        let v: Vec<TelemetryValue> = serde_json::from_str(r#"[1.5, "Cube", true]"#).unwrap();
        assert_eq!(
            v,
            vec![
                TelemetryValue::Number(1.5),
                TelemetryValue::Text("Cube".into()),
                TelemetryValue::Boolean(true)
            ]
        );
    }
}
