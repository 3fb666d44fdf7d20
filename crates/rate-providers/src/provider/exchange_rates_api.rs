//! HTTP-backed rate source speaking the exchangerates-API dialect:
//! `GET /{YYYY-MM-DD}` for a day pinned in a closed month and `GET /latest`
//! for the still-open current month, both with an EUR base.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use log::debug;
use reqwest::blocking::Client;
use rust_decimal::Decimal;

use moneta_core::errors::Result;
use moneta_core::fx::RateSourceTrait;
use moneta_core::Currency;

use crate::errors::ProviderError;
use crate::models::RatesResponse;

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate source backed by an exchangerates-style HTTP API.
///
/// Requests are blocking: the engine converts inside the caller's unit of
/// work and a cache miss is allowed to stall it. An upstream timeout is a
/// hard failure of the whole operation, never a partial result.
pub struct ExchangeRatesApiProvider {
    client: Client,
    base_url: String,
    access_key: Option<String>,
}

impl ExchangeRatesApiProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into(),
            access_key: None,
        }
    }

    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    fn symbols() -> String {
        Currency::ALL
            .iter()
            .filter(|c| **c != Currency::RATE_BASE)
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn fetch(&self, path: &str) -> std::result::Result<HashMap<Currency, Decimal>, ProviderError> {
        let url = format!(
            "{}/{}?base={}&symbols={}",
            self.base_url.trim_end_matches('/'),
            path,
            Currency::RATE_BASE,
            Self::symbols()
        );
        debug!("Fetching exchange rates from {url}");

        let mut request = self.client.get(&url);
        if let Some(key) = &self.access_key {
            request = request.query(&[("access_key", key.as_str())]);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body: RatesResponse = response
            .json()
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(body.into_rate_table())
    }
}

impl RateSourceTrait for ExchangeRatesApiProvider {
    fn get_rates(&self, month_end: NaiveDate) -> Result<HashMap<Currency, Decimal>> {
        let path = month_end.format("%Y-%m-%d").to_string();
        Ok(self.fetch(&path)?)
    }

    fn get_latest_rates(&self) -> Result<HashMap<Currency, Decimal>> {
        Ok(self.fetch("latest")?)
    }
}
