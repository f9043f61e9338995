//! Money parsing and currency formatting using rust_decimal
//!
//! All arithmetic on monetary amounts goes through `Decimal`; amounts
//! enter and leave as the decimal strings the site API uses. Rounding
//! is 2 decimal places, half-up, matching the server.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Parse an API amount string into a `Decimal`.
///
/// Empty strings are treated as zero, which is how the site encodes
/// absent totals (e.g. `total_tax: ""`).
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(trimmed).ok()
}

/// Render a `Decimal` as a machine amount string ("17.00")
pub fn to_amount_string(value: Decimal) -> String {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
}

/// Where the currency symbol sits relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurrencyPosition {
    #[default]
    Left,
    Right,
    LeftSpace,
    RightSpace,
}

/// Site-level currency configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencySettings {
    /// Currency symbol, e.g. "$" or "£"
    pub symbol: String,
    /// Symbol placement
    pub position: CurrencyPosition,
    /// Thousand separator (may be empty)
    pub thousand_separator: String,
    /// Decimal separator
    pub decimal_separator: String,
    /// Number of decimal places
    pub decimals: u32,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            position: CurrencyPosition::Left,
            thousand_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            decimals: 2,
        }
    }
}

/// Locale/currency-aware amount formatter
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    settings: CurrencySettings,
}

impl CurrencyFormatter {
    pub fn new(settings: CurrencySettings) -> Self {
        Self { settings }
    }

    /// Format an API amount string for display ("18.5" → "$18.50").
    ///
    /// Returns `None` when the input is not a decimal amount.
    pub fn format_amount(&self, value: &str) -> Option<String> {
        parse_amount(value).map(|d| self.format(d))
    }

    /// Format a `Decimal` for display
    pub fn format(&self, value: Decimal) -> String {
        let rounded = value
            .abs()
            .round_dp_with_strategy(self.settings.decimals, RoundingStrategy::MidpointAwayFromZero);
        let plain = format!("{:.*}", self.settings.decimals as usize, rounded);

        let (integral, fraction) = match plain.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (plain, String::new()),
        };

        let mut grouped = String::new();
        for (idx, ch) in integral.chars().enumerate() {
            let remaining = integral.len() - idx;
            if idx > 0 && remaining % 3 == 0 {
                grouped.push_str(&self.settings.thousand_separator);
            }
            grouped.push(ch);
        }

        let mut amount = grouped;
        if !fraction.is_empty() {
            amount.push_str(&self.settings.decimal_separator);
            amount.push_str(&fraction);
        }

        let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
        let symbol = &self.settings.symbol;
        match self.settings.position {
            CurrencyPosition::Left => format!("{sign}{symbol}{amount}"),
            CurrencyPosition::Right => format!("{sign}{amount}{symbol}"),
            CurrencyPosition::LeftSpace => format!("{sign}{symbol}\u{a0}{amount}"),
            CurrencyPosition::RightSpace => format!("{sign}{amount}\u{a0}{symbol}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gbp() -> CurrencyFormatter {
        CurrencyFormatter::new(CurrencySettings {
            symbol: "£".to_string(),
            position: CurrencyPosition::Left,
            thousand_separator: String::new(),
            decimal_separator: ".".to_string(),
            decimals: 2,
        })
    }

    #[test]
    fn formats_api_amount_strings() {
        let formatter = gbp();
        assert_eq!(formatter.format_amount("20.00").unwrap(), "£20.00");
        assert_eq!(formatter.format_amount("10").unwrap(), "£10.00");
        assert_eq!(formatter.format_amount("").unwrap(), "£0.00");
        assert!(formatter.format_amount("not a number").is_none());
    }

    #[test]
    fn groups_thousands_with_configured_separators() {
        let formatter = CurrencyFormatter::new(CurrencySettings {
            symbol: "€".to_string(),
            position: CurrencyPosition::RightSpace,
            thousand_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            decimals: 2,
        });
        assert_eq!(formatter.format_amount("1234567.5").unwrap(), "1.234.567,50\u{a0}€");
    }

    #[test]
    fn rounds_half_up_to_two_places() {
        let formatter = gbp();
        assert_eq!(formatter.format_amount("2.005").unwrap(), "£2.01");
        assert_eq!(to_amount_string(Decimal::from_str("17.005").unwrap()), "17.01");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside_the_symbol() {
        let formatter = gbp();
        assert_eq!(formatter.format(Decimal::from_str("-3.5").unwrap()), "-£3.50");
    }

    #[test]
    fn parse_amount_treats_empty_as_zero() {
        assert_eq!(parse_amount(""), Some(Decimal::ZERO));
        assert_eq!(parse_amount(" 8.50 "), Decimal::from_str("8.50").ok());
    }
}
