//! Exchange rate tables.
//!
//! Rates come from an exchange-rate API response saved as JSON. Fetching it
//! is left to whatever keeps that file fresh; this module only reads it.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RateError {
    /// The code is missing from the table, or its rate is unusable.
    #[error("no rate available for {0}")]
    RateUnavailable(String),
    #[error("failed to read rate table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rate table: {0}")]
    Parse(#[from] serde_json::Error),
    /// The API reported something other than success.
    #[error("rate provider returned {0:?}")]
    Unsuccessful(String),
}

/// Shape of the exchange-rate API response.
#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    result: String,
    base_code: String,
    #[serde(default)]
    time_last_update_unix: Option<i64>,
    conversion_rates: HashMap<String, f64>,
}

/// Rates relative to a base currency.
#[derive(Clone, Debug, PartialEq)]
pub struct RateTable {
    base_code: String,
    updated_at: Option<i64>,
    rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base_code: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        Self {
            base_code: base_code.into(),
            updated_at: None,
            rates,
        }
    }

    /// Decode an exchange-rate API response.
    pub fn from_json(json: &str) -> Result<Self, RateError> {
        let response: ExchangeRateResponse = serde_json::from_str(json)?;
        if response.result != "success" {
            return Err(RateError::Unsuccessful(response.result));
        }

        debug!(
            base = %response.base_code,
            count = response.conversion_rates.len(),
            "decoded rate table"
        );
        Ok(Self {
            base_code: response.base_code,
            updated_at: response.time_last_update_unix,
            rates: response.conversion_rates,
        })
    }

    /// Read a saved response from disk.
    pub fn load(path: &Path) -> Result<Self, RateError> {
        let json = std::fs::read_to_string(path).map_err(|source| RateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json(&json)?;
        info!(path = %path.display(), base = %table.base_code, "loaded exchange rates");
        Ok(table)
    }

    pub fn base_code(&self) -> &str {
        &self.base_code
    }

    /// Unix timestamp of the last provider update, if known.
    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    /// Rate of `code` against the base currency.
    ///
    /// Zero, negative and non-finite rates count as unavailable.
    pub fn rate(&self, code: &str) -> Result<f64, RateError> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| RateError::RateUnavailable(code.to_string()))
    }
}
