//! Currency conversion of calculator results.

mod conversion;
mod rates;

pub use conversion::{CONVERTED_DECIMALS, CurrencyPair, convert, format_converted};
pub use rates::{RateError, RateTable};

/// Currencies offered when none are configured.
pub const DEFAULT_CURRENCIES: &[&str] = &["JPY", "USD", "EUR", "TWD"];
