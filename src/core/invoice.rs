//! Invoice records and their status

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format used for the `date` column (ISO-8601 calendar date)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    /// Only the exact lowercase spellings are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Returned when a status string is neither `pending` nor `paid`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown invoice status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

/// Convert a major-unit amount (dollars) into minor units (cents)
///
/// `49.99 * 100.0` is `4998.999...` in binary floating point, so the product
/// is rounded to the nearest cent rather than truncated. Returns `None` when
/// the rounded product is not finite or does not fit in an `i64`.
pub fn to_minor_units(amount: f64) -> Option<i64> {
    let minor = (amount * 100.0).round();
    // `i64::MAX as f64` is 2^63, one past the largest i64.
    if minor.is_finite() && minor >= i64::MIN as f64 && minor < i64::MAX as f64 {
        Some(minor as i64)
    } else {
        None
    }
}

/// Convert minor units back into a major-unit amount
pub fn to_major_units(amount_minor: i64) -> f64 {
    amount_minor as f64 / 100.0
}

/// Today's calendar date in UTC, as stored in the `date` column
pub fn today_utc() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Validated fields of an invoice submission
///
/// The amount is already converted to minor units and is at least one cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInput {
    pub customer_id: String,
    pub amount_minor: i64,
    pub status: InvoiceStatus,
}

impl InvoiceInput {
    pub fn amount_major(&self) -> f64 {
        to_major_units(self.amount_minor)
    }
}

/// Row to insert: validated input plus the server-computed date
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_minor: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

impl NewInvoice {
    /// Build a row dated today (UTC)
    pub fn from_input(input: &InvoiceInput) -> Self {
        Self::dated(input, today_utc())
    }

    pub fn dated(input: &InvoiceInput, date: impl Into<String>) -> Self {
        Self {
            customer_id: input.customer_id.clone(),
            amount_minor: input.amount_minor,
            status: input.status,
            date: date.into(),
        }
    }
}

/// Replacement values for an existing row
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_minor: i64,
    pub status: InvoiceStatus,
}

impl From<&InvoiceInput> for InvoiceChanges {
    fn from(input: &InvoiceInput) -> Self {
        Self {
            customer_id: input.customer_id.clone(),
            amount_minor: input.amount_minor,
            status: input.status,
        }
    }
}

/// A stored invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    /// Amount in minor units
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

impl Invoice {
    /// Amount in major units, reversing the write-time conversion
    pub fn amount_major(&self) -> f64 {
        to_major_units(self.amount)
    }

    /// Parsed `date` column, if it holds a valid ISO date
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}
