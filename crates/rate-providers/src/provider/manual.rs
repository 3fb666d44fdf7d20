use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use moneta_core::errors::Result;
use moneta_core::fx::{FxError, RateSourceTrait};
use moneta_core::Currency;

/// Rate source serving fixed tables supplied at construction.
///
/// Used for fixtures and offline runs: one table per pinned month end plus a
/// latest table. Dates with no table are a hard rate outage, the same
/// contract a network source honors.
#[derive(Debug, Clone, Default)]
pub struct ManualRateSource {
    monthly: HashMap<NaiveDate, HashMap<Currency, Decimal>>,
    latest: Option<HashMap<Currency, Decimal>>,
}

impl ManualRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month_end: NaiveDate, rates: HashMap<Currency, Decimal>) -> Self {
        self.monthly.insert(month_end, rates);
        self
    }

    pub fn with_latest(mut self, rates: HashMap<Currency, Decimal>) -> Self {
        self.latest = Some(rates);
        self
    }
}

impl RateSourceTrait for ManualRateSource {
    fn get_rates(&self, month_end: NaiveDate) -> Result<HashMap<Currency, Decimal>> {
        self.monthly
            .get(&month_end)
            .cloned()
            .ok_or_else(|| FxError::RateUnavailable(format!("no manual rates for {month_end}")).into())
    }

    fn get_latest_rates(&self) -> Result<HashMap<Currency, Decimal>> {
        self.latest
            .clone()
            .ok_or_else(|| FxError::RateUnavailable("no manual latest rates".to_string()).into())
    }
}
