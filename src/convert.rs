//! Pure conversion math
//!
//! Computes forward and inverse rates and the converted amount from a rate
//! snapshot and two currency codes. No I/O and no side effects; an absent
//! rate and an invalid amount are explicit states here, never a silent zero
//! or NaN flowing into the display layer.

use thiserror::Error;

use crate::data::RateSnapshot;

/// Errors for user-entered amount text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The input is empty or only whitespace
    #[error("No amount entered")]
    Empty,

    /// The input does not parse as a number
    #[error("'{0}' is not a valid amount")]
    Invalid(String),
}

/// Outcome of evaluating one conversion
///
/// `converted` is present only when both a rate and a valid amount exist;
/// callers distinguish "no rate", "bad amount", and a genuine zero result by
/// the option/result fields, not by a numeric sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Forward rate (1 from-unit in to-units), if both codes are quoted
    pub rate: Option<f64>,
    /// Inverse rate (1 to-unit in from-units), if defined and non-zero
    pub inverse_rate: Option<f64>,
    /// Parsed amount, or why it could not be parsed
    pub amount: Result<f64, AmountError>,
    /// Converted amount, when rate and amount are both available
    pub converted: Option<f64>,
}

/// Forward rate between two currency codes
///
/// Returns `None` when either code is missing from the snapshot; otherwise
/// `rates[to] / rates[from]`.
pub fn rate(snapshot: &RateSnapshot, from_code: &str, to_code: &str) -> Option<f64> {
    let from = snapshot.rates.get(from_code)?;
    let to = snapshot.rates.get(to_code)?;
    Some(to / from)
}

/// Inverse of a forward rate
///
/// `None` when the rate is absent or zero.
pub fn inverse(rate: Option<f64>) -> Option<f64> {
    match rate {
        Some(r) if r != 0.0 => Some(1.0 / r),
        _ => None,
    }
}

/// Parses user-entered amount text
///
/// A comma decimal separator is normalized to a period before the numeric
/// parse, so "12,5" reads as 12.5. Empty and unparseable input are distinct
/// errors; a NaN can never come out of here.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AmountError::Invalid(input.to_string())),
    }
}

/// Evaluates a full conversion from snapshot, codes, and raw amount text
pub fn evaluate(
    snapshot: &RateSnapshot,
    from_code: &str,
    to_code: &str,
    amount_text: &str,
) -> Conversion {
    let rate = rate(snapshot, from_code, to_code);
    let inverse_rate = inverse(rate);
    let amount = parse_amount(amount_text);
    let converted = match (&amount, rate) {
        (Ok(value), Some(r)) => Some(value * r),
        _ => None,
    };

    Conversion {
        rate,
        inverse_rate,
        amount,
        converted,
    }
}
