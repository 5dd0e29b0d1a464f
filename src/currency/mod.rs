//! Display formatting for money amounts. Arithmetic never goes through here.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Symbol printed before amounts; unknown codes print as `"XYZ "`.
    pub fn symbol(&self) -> String {
        match self.as_str() {
            "USD" | "CAD" | "AUD" | "NZD" | "MXN" => "$".into(),
            "EUR" => "€".into(),
            "GBP" => "£".into(),
            "JPY" | "CNY" => "¥".into(),
            "INR" => "₹".into(),
            "BRL" => "R$".into(),
            other => format!("{other} "),
        }
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Locale-aware grouping preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub grouping_separator: char,
}

impl LocaleConfig {
    /// Picks the thousands separator conventionally used by `tag`'s language.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let grouping_separator = match language.as_str() {
            "de" | "es" | "it" | "pt" | "nl" | "da" | "id" | "tr" => '.',
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" | "ru" => ' ',
            _ => ',',
        };
        Self {
            language_tag: tag.to_string(),
            grouping_separator,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::from_tag("en-US")
    }
}

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Whole-unit currency strings such as `$1,235` or `-$100`.
#[derive(Debug, Clone, Default)]
pub struct WholeCurrencyFormatter {
    pub currency: CurrencyCode,
    pub locale: LocaleConfig,
}

impl WholeCurrencyFormatter {
    pub fn new(currency: CurrencyCode, locale: LocaleConfig) -> Self {
        Self { currency, locale }
    }
}

impl CurrencyFormatter for WholeCurrencyFormatter {
    fn format_amount(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}-", self.currency.symbol());
        }
        let rounded = amount.round();
        let digits = format!("{:.0}", rounded.abs());
        let grouped = group_digits(&digits, self.locale.grouping_separator);
        let sign = if rounded < 0.0 { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), grouped)
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
