//! Expense domain model.
//!
//! # Responsibility
//! - Define the canonical record persisted under the device-store key.
//! - Validate raw form input before a record may be constructed.
//! - Mint stable, strictly increasing record identifiers.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another record.
//! - Ids issued by one process are strictly increasing, even within a
//!   single millisecond.
//! - Stored amounts may be non-finite; aggregation coerces them to 0
//!   without correcting the record itself.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};

/// Stable identifier for an expense record.
///
/// A millisecond-epoch token in decimal text form; the sole identity used
/// for deletion.
pub type ExpenseId = String;

static LAST_ISSUED_ID: AtomicI64 = AtomicI64::new(0);

/// Mints the next record identifier from the wall clock.
///
/// When the clock has not advanced since the previous mint (or stepped
/// backwards), the token is bumped past the last issued value so ids stay
/// strictly increasing.
pub fn next_expense_id() -> ExpenseId {
    let now_ms = chrono::Utc::now().timestamp_millis();
    loop {
        let last = LAST_ISSUED_ID.load(Ordering::SeqCst);
        let candidate = now_ms.max(last + 1);
        if LAST_ISSUED_ID
            .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            return candidate.to_string();
        }
    }
}

/// Raw form input for the add-expense flow.
///
/// Fields carry the user's text unchanged; validation is an empty-string
/// check with no trimming, so whitespace-only input is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseInput {
    pub name: String,
    pub category: String,
    pub date: String,
    pub amount: String,
}

impl ExpenseInput {
    /// Rejects any empty field before a record may exist.
    ///
    /// Fields are checked in form order; the first empty one is reported.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if self.category.is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        if self.date.is_empty() {
            return Err(ExpenseValidationError::EmptyDate);
        }
        if self.amount.is_empty() {
            return Err(ExpenseValidationError::EmptyAmount);
        }
        Ok(())
    }
}

/// Validation failure for raw form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    EmptyCategory,
    EmptyDate,
    EmptyAmount,
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let field = match self {
            Self::EmptyName => "name",
            Self::EmptyCategory => "category",
            Self::EmptyDate => "date",
            Self::EmptyAmount => "amount",
        };
        write!(f, "{field} must not be empty")
    }
}

impl Error for ExpenseValidationError {}

/// Amount parse failure for the add-expense flow.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountParseError {
    NotANumber(String),
    Negative(f64),
}

impl Display for AmountParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber(text) => write!(f, "amount `{text}` is not a decimal number"),
            Self::Negative(value) => write!(f, "amount {value} must not be negative"),
        }
    }
}

impl Error for AmountParseError {}

/// Parses user amount text with locale-agnostic decimal rules.
///
/// # Contract
/// - Accepts what `f64::from_str` accepts (`4.50`, `2`, `1e3`).
/// - Rejects non-numeric text and non-finite or negative results, so an
///   invalid amount never reaches a constructed record.
pub fn parse_amount(text: &str) -> Result<f64, AmountParseError> {
    let value: f64 = text
        .parse()
        .map_err(|_| AmountParseError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(AmountParseError::NotANumber(text.to_string()));
    }
    if value < 0.0 {
        return Err(AmountParseError::Negative(value));
    }
    Ok(value)
}

/// Canonical persisted expense record.
///
/// The stored collection is a flat JSON array of these objects under one
/// device-store key; the field names are the wire format and must not
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Stable creation-time token; sole identity for deletion.
    pub id: ExpenseId,
    pub name: String,
    pub category: String,
    /// `YYYY-MM-DD` text as entered; not validated for calendar
    /// correctness.
    pub date: String,
    /// Non-negative on the entry path. Legacy stored values may decode to
    /// `NaN`; a non-finite amount serializes as JSON `null`.
    #[serde(default = "amount_fallback", deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl Expense {
    /// Builds a record from validated input and an already parsed amount,
    /// minting a fresh id.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self::with_id(next_expense_id(), name, category, date, amount)
    }

    /// Builds a record with a caller-provided identity.
    ///
    /// Used by tests and fixtures where identity already exists; the id
    /// must remain stable for the record's lifetime.
    pub fn with_id(
        id: impl Into<ExpenseId>,
        name: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            date: date.into(),
            amount,
        }
    }

    /// Amount as counted by totals: non-finite values count as zero.
    pub fn countable_amount(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }
}

fn amount_fallback() -> f64 {
    f64::NAN
}

/// Accepts a number, numeric text, or null/garbage from older blobs.
///
/// The stored collection has no schema version; records written by earlier
/// app revisions may carry `"amount": null` (a serialized non-finite
/// float) or free text. Those decode to `NaN` instead of failing the
/// whole load.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(text) => text.parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}
