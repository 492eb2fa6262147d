//! Converting calculator results between two currencies.

use super::rates::{RateError, RateTable};
use std::fmt;

/// Decimal places shown for converted amounts.
pub const CONVERTED_DECIMALS: usize = 3;

/// Convert `value` from one currency to another through the table's base.
pub fn convert(value: f64, from: &str, to: &str, rates: &RateTable) -> Result<f64, RateError> {
    let from_rate = rates.rate(from)?;
    let to_rate = rates.rate(to)?;
    Ok((value / from_rate) * to_rate)
}

/// Format a converted amount with three decimal places.
pub fn format_converted(value: f64) -> String {
    format!("{:.*}", CONVERTED_DECIMALS, value)
}

/// The two currencies shown side by side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Exchange the two sides.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn convert(&self, value: f64, rates: &RateTable) -> Result<f64, RateError> {
        convert(value, &self.from, &self.to, rates)
    }

    /// Converted amount ready for display.
    pub fn convert_display(&self, value: f64, rates: &RateTable) -> Result<String, RateError> {
        self.convert(value, rates).map(format_converted)
    }

    /// One-line summary such as `1 USD = 32.25 TWD`.
    pub fn exchange_info(&self, rates: &RateTable) -> Result<String, RateError> {
        let rate = self.convert(1.0, rates)?;
        Ok(format!("1 {} = {} {}", self.from, rate, self.to))
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn rates() -> RateTable {
        let rates = HashMap::from([
            ("USD".to_string(), 1.0),
            ("TWD".to_string(), 32.0),
            ("JPY".to_string(), 150.0),
        ]);
        RateTable::new("USD", rates)
    }

    #[test]
    fn test_convert_through_base() {
        assert_eq!(convert(64.0, "TWD", "USD", &rates()).unwrap(), 2.0);
        assert_eq!(convert(2.0, "USD", "JPY", &rates()).unwrap(), 300.0);
        assert_eq!(convert(32.0, "TWD", "JPY", &rates()).unwrap(), 150.0);
    }

    #[test]
    fn test_three_decimal_places() {
        assert_eq!(format_converted(2.0), "2.000");
        assert_eq!(format_converted(1.0 / 3.0), "0.333");
        assert_eq!(format_converted(2.0 / 3.0), "0.667");
    }

    #[test]
    fn test_missing_rate() {
        let pair = CurrencyPair::new("TWD", "EUR");
        assert!(matches!(
            pair.convert(1.0, &rates()),
            Err(RateError::RateUnavailable(code)) if code == "EUR"
        ));
    }

    #[test]
    fn test_swap_and_display() {
        let mut pair = CurrencyPair::new("TWD", "USD");
        assert_eq!(pair.convert_display(100.0, &rates()).unwrap(), "3.125");
        pair.swap();
        assert_eq!(pair.to_string(), "USD → TWD");
        assert_eq!(pair.convert_display(100.0, &rates()).unwrap(), "3200.000");
    }

    #[test]
    fn test_exchange_info() {
        let pair = CurrencyPair::new("USD", "TWD");
        assert_eq!(pair.exchange_info(&rates()).unwrap(), "1 USD = 32 TWD");
    }
}
