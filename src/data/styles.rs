//! Beer styles and the beers listed under them
//!
//! Decoding for the `/styles/` and `/beers/` endpoints, plus the conversion of
//! request-supplied style ids into the integer the directory expects.

use serde::Deserialize;

use super::directory::number_or_numeric_string;
use super::{Beverage, Style};

/// Convert request text into a style id
///
/// Follows PHP's `(int)` cast on strings: leading whitespace is skipped and the
/// longest leading number is read, everything after it is ignored. That number
/// may carry a sign, a fraction and an exponent, so `"1e3"` is 1000 and
/// `"3.7"` is 3. Text without a leading number becomes `0`, so `"abc"` asks
/// the directory for style 0 rather than failing. Out-of-range values
/// saturate; infinite ones become `0`.
pub fn coerce_style_id(raw: &str) -> i64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut fractional = false;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            fractional = true;
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && !fractional {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            fractional = true;
            end += 1 + sign + exp_digits;
        }
    }

    if fractional {
        match s[..end].parse::<f64>() {
            // `as` truncates toward zero and saturates
            Ok(value) if value.is_finite() => value as i64,
            _ => 0,
        }
    } else {
        saturating_integer(&s[..end])
    }
}

/// Parse a signed run of digits, saturating at the `i64` bounds
fn saturating_integer(text: &str) -> i64 {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    digits.bytes().fold(0i64, |value, digit| {
        let d = i64::from(digit - b'0');
        if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        }
    })
}

/// Map the directory's organic flag
///
/// Only an explicit `"N"` means not organic. Missing or unexpected values are
/// reported as organic.
pub fn organic_flag(raw: Option<&str>) -> bool {
    raw != Some("N")
}

/// A single element of the `/styles/` response
#[derive(Debug, Deserialize)]
pub(crate) struct RawStyle {
    id: i64,
    name: String,
    #[serde(default)]
    description: String,
}

impl From<RawStyle> for Style {
    fn from(raw: RawStyle) -> Self {
        Style {
            id: raw.id,
            name: raw.name,
            description: raw.description,
        }
    }
}

/// A single element of the `/beers/` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBeer {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    abv: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    ibu: f64,
    is_organic: Option<String>,
    available: Option<RawAvailability>,
    labels: Option<RawLabels>,
}

#[derive(Debug, Deserialize)]
struct RawAvailability {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawLabels {
    medium: Option<String>,
}

impl From<RawBeer> for Beverage {
    fn from(raw: RawBeer) -> Self {
        Beverage {
            is_organic: organic_flag(raw.is_organic.as_deref()),
            availability_description: raw.available.map(|a| a.description).unwrap_or_default(),
            image_url: raw
                .labels
                .and_then(|l| l.medium)
                .filter(|url| !url.is_empty()),
            name: raw.name,
            description: raw.description,
            abv: raw.abv,
            ibu: raw.ibu,
        }
    }
}
