use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use moneta_core::Currency;

/// Response body of the rates API.
///
/// Rates are quoted against the request base (EUR). Codes outside the
/// supported set are ignored; completeness is enforced by the engine.
#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    pub base: String,
    pub date: NaiveDate,
    pub rates: HashMap<String, Decimal>,
}

impl RatesResponse {
    /// Converts the raw code-keyed body into the engine's currency map,
    /// adding the identity entry for the base.
    pub fn into_rate_table(self) -> HashMap<Currency, Decimal> {
        let mut table: HashMap<Currency, Decimal> = self
            .rates
            .iter()
            .filter_map(|(code, rate)| {
                code.parse::<Currency>().ok().map(|currency| (currency, *rate))
            })
            .collect();
        if let Ok(base) = self.base.parse::<Currency>() {
            table.entry(base).or_insert(Decimal::ONE);
        }
        table
    }
}
