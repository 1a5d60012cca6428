//! Raw extracted strings to typed values.

use crate::error::ReportError;
use crate::types::{NormalizedValue, ERROR, NOT_FOUND};

pub const CURRENCY_SYMBOL: &str = "$";
pub const CURRENCY_CODE: &str = "USD";

/// Substrings removed before parsing, applied in this order. "USD" must go before "US".
const STRIP_TOKENS: &[&str] = &["$", ",", "USD", "US"];

/// Normalize one raw value. Never fails: problems are reported through the status.
pub fn normalize(raw_value: Option<&str>) -> NormalizedValue {
    let raw = match raw_value {
        Some(raw) if !is_missing(raw) => raw,
        other => return NormalizedValue::not_found(other.map(str::to_string)),
    };

    match parse_amount(raw) {
        Ok(Some(value)) => NormalizedValue::numeric(
            raw.to_string(),
            value,
            format_currency(value),
            CURRENCY_CODE,
        ),
        Ok(None) => NormalizedValue::non_numeric(raw.to_string(), clean_value(raw)),
        Err(e) => {
            tracing::warn!(raw_value = %raw, error = %e, "Could not format extracted value");
            NormalizedValue::format_error(Some(raw.to_string()))
        }
    }
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw == NOT_FOUND || raw == ERROR
}

/// Strip currency markers and thousands separators.
fn clean_value(raw: &str) -> String {
    let mut cleaned = raw.to_string();
    for token in STRIP_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    cleaned.trim().to_string()
}

/// `Ok(None)` when the cleaned text is not a number at all; `Err` when it parses
/// to something that cannot be treated as an amount (NaN, infinity).
fn parse_amount(raw: &str) -> Result<Option<f64>, ReportError> {
    let cleaned = clean_value(raw);
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(ReportError::InvalidInput(format!(
            "'{}' is not a finite amount",
            cleaned
        ))),
        Err(_) => Ok(None),
    }
}

/// Format amount as currency with thousands separators and two decimals
/// (e.g. 1234567.5 -> "$1,234,567.50", -12.3 -> "-$12.30").
pub fn format_currency(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, CURRENCY_SYMBOL, format_amount(n.abs()))
}

/// Group the integer part of a non-negative amount in threes, keeping two decimals.
fn format_amount(n: f64) -> String {
    let s = format!("{:.2}", n);
    let (int_part, dec_part) = match s.find('.') {
        Some(dot) => (&s[..dot], &s[dot..]),
        None => (s.as_str(), ""),
    };
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3 + dec_part.len());
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(dec_part);
    out
}
