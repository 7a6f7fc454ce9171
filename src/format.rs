//! Display formatting for amounts and rates

use crate::data::Currency;

/// Formats an amount in a currency: symbol, thousands grouping, two decimals
///
/// Examples: `$1,234.57`, `€0.90`, `-£12.00`.
pub fn format_currency(amount: f64, currency: &Currency) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.2}", amount.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let grouped = group_thousands(whole);
    let sign = if negative { "-" } else { "" };
    format!("{}{}{}.{}", sign, currency.symbol, grouped, frac)
}

/// Formats an exchange rate at six decimal places
pub fn format_rate(rate: f64) -> String {
    format!("{:.6}", rate)
}

/// Inserts comma separators into an unsigned integer string
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
