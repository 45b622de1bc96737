//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount as a price with two fractional digits.
///
/// Usage in templates: `{{ artwork.price|price }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn price(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_price(&value.to_string()))
}

/// Pad a numeric string to two fractional digits; non-numeric input
/// passes through unchanged.
fn format_price(raw: &str) -> String {
    use rust_decimal::Decimal;
    use std::str::FromStr;

    Decimal::from_str(raw).map_or_else(|_| raw.to_owned(), |d| format!("{d:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_pads_to_two_places() {
        assert_eq!(
            format_price(&rust_decimal::Decimal::new(1050, 1).to_string()),
            "105.00"
        );
        assert_eq!(format_price("2478"), "2478.00");
    }

    #[test]
    fn test_format_price_passes_through_non_numeric() {
        assert_eq!(format_price("free"), "free");
    }
}
