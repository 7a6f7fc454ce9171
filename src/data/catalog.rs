//! Static currency catalog
//!
//! This module contains the fixed list of currencies the converter offers,
//! with their display names and symbols. The catalog order matters: the first
//! two entries are the default from/to selection for a fresh install.

use super::Currency;

/// Static array of supported currencies
///
/// The remote rate source quotes many more codes, but the picker only offers
/// this curated list. Codes follow ISO 4217.
pub static CURRENCIES: [Currency; 9] = [
    Currency {
        code: "USD",
        name: "United States Dollar",
        symbol: "$",
    },
    Currency {
        code: "EUR",
        name: "Euro",
        symbol: "\u{20AC}",
    },
    Currency {
        code: "GBP",
        name: "British Pound",
        symbol: "\u{A3}",
    },
    Currency {
        code: "JPY",
        name: "Japanese Yen",
        symbol: "\u{A5}",
    },
    Currency {
        code: "RUB",
        name: "Russian Ruble",
        symbol: "\u{20BD}",
    },
    Currency {
        code: "CNY",
        name: "Chinese Yuan",
        symbol: "\u{A5}",
    },
    Currency {
        code: "CHF",
        name: "Swiss Franc",
        symbol: "Fr",
    },
    Currency {
        code: "CAD",
        name: "Canadian Dollar",
        symbol: "C$",
    },
    Currency {
        code: "AUD",
        name: "Australian Dollar",
        symbol: "A$",
    },
];

/// Returns the full currency catalog
pub fn all_currencies() -> &'static [Currency] {
    &CURRENCIES
}

/// Get a currency by its ISO code
///
/// The lookup is case-sensitive; persisted and CLI-provided codes are
/// uppercased before calling this.
///
/// # Returns
///
/// Returns `Some(&Currency)` if found, `None` otherwise
pub fn get_currency_by_code(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|currency| currency.code == code)
}

/// Default "from" currency: the first catalog entry
pub fn default_from() -> &'static Currency {
    &CURRENCIES[0]
}

/// Default "to" currency: the second catalog entry
pub fn default_to() -> &'static Currency {
    &CURRENCIES[1]
}
