//! Reusable field validators
//!
//! Each validator takes the raw submitted value (`None` when the field is
//! absent) and either yields the coerced value or the message to show next to
//! the field. They are combined by the [`schema`](super::schema).

use crate::core::invoice::to_minor_units;
use std::str::FromStr;

/// Validator: field is present and not blank
pub fn required_text(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<String, String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(message.to_string()),
    }
}

/// Coerce a raw value to a number the way an HTML number input is read
///
/// Absent or blank input coerces to `0.0`; anything unparseable to `NaN`.
pub fn coerce_number(value: Option<&str>) -> f64 {
    match value.map(str::trim) {
        None | Some("") => 0.0,
        Some(s) => s.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Validator: coerced amount converts to more than `min_minor` minor units
///
/// The check runs on the rounded, range-checked value that gets stored, so a
/// fraction of a cent or an amount too large for `i64` is rejected.
pub fn minor_units_above(
    min_minor: i64,
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<i64, String> + Send + Sync + Clone {
    move |value: Option<&str>| match to_minor_units(coerce_number(value)) {
        Some(minor) if minor > min_minor => Ok(minor),
        _ => Err(message.to_string()),
    }
}

/// Validator: value parses as one of the variants of `T`
pub fn one_of<T: FromStr>(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<T, String> + Send + Sync + Clone {
    move |value: Option<&str>| {
        value
            .and_then(|s| s.parse::<T>().ok())
            .ok_or_else(|| message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invoice::InvoiceStatus;

    // === required_text() ===

    #[test]
    fn test_required_text_absent_returns_error() {
        let v = required_text("Please select a customer.");
        assert_eq!(v(None), Err("Please select a customer.".to_string()));
    }

    #[test]
    fn test_required_text_empty_returns_error() {
        let v = required_text("missing");
        assert!(v(Some("")).is_err());
        assert!(v(Some("   ")).is_err());
    }

    #[test]
    fn test_required_text_keeps_value_verbatim() {
        let v = required_text("missing");
        assert_eq!(v(Some(" cust-1 ")), Ok(" cust-1 ".to_string()));
    }

    // === coerce_number() ===

    #[test]
    fn test_coerce_absent_and_blank_to_zero() {
        assert_eq!(coerce_number(None), 0.0);
        assert_eq!(coerce_number(Some("")), 0.0);
        assert_eq!(coerce_number(Some("  ")), 0.0);
    }

    #[test]
    fn test_coerce_decimal_and_exponent() {
        assert_eq!(coerce_number(Some("49.99")), 49.99);
        assert_eq!(coerce_number(Some(" 12 ")), 12.0);
        assert_eq!(coerce_number(Some("1e3")), 1000.0);
        assert_eq!(coerce_number(Some("-4")), -4.0);
    }

    #[test]
    fn test_coerce_garbage_to_nan() {
        assert!(coerce_number(Some("twelve")).is_nan());
        assert!(coerce_number(Some("12abc")).is_nan());
    }

    // === minor_units_above() ===

    #[test]
    fn test_minor_units_above_zero_rejects_zero_and_negative() {
        let v = minor_units_above(0, "too small");
        assert!(v(Some("0")).is_err());
        assert!(v(Some("-0.01")).is_err());
        assert!(v(None).is_err());
    }

    #[test]
    fn test_minor_units_above_rejects_nan_and_infinity() {
        let v = minor_units_above(0, "too small");
        assert!(v(Some("abc")).is_err());
        assert!(v(Some("inf")).is_err());
    }

    #[test]
    fn test_minor_units_above_rejects_sub_cent_amounts() {
        let v = minor_units_above(0, "too small");
        assert_eq!(v(Some("0.001")), Err("too small".to_string()));
        assert_eq!(v(Some("0.004")), Err("too small".to_string()));
    }

    #[test]
    fn test_minor_units_above_rejects_amounts_past_i64() {
        let v = minor_units_above(0, "too small");
        assert_eq!(v(Some("1e300")), Err("too small".to_string()));
        assert_eq!(v(Some("1e17")), Err("too small".to_string()));
    }

    #[test]
    fn test_minor_units_above_accepts_positive() {
        let v = minor_units_above(0, "too small");
        assert_eq!(v(Some("0.01")), Ok(1));
        assert_eq!(v(Some("0.005")), Ok(1));
        assert_eq!(v(Some("49.99")), Ok(4999));
    }

    // === one_of() ===

    #[test]
    fn test_one_of_accepts_known_variant() {
        let v = one_of::<InvoiceStatus>("bad status");
        assert_eq!(v(Some("paid")), Ok(InvoiceStatus::Paid));
    }

    #[test]
    fn test_one_of_rejects_unknown_and_absent() {
        let v = one_of::<InvoiceStatus>("bad status");
        assert_eq!(v(Some("overdue")), Err("bad status".to_string()));
        assert_eq!(v(None), Err("bad status".to_string()));
    }
}
