use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::RateMonth;
use super::fx_traits::{FxServiceTrait, RateSourceTrait};
use crate::constants::DECIMAL_PRECISION;
use crate::currencies::{Currency, CurrencyMap};
use crate::errors::Result;

/// Converts monetary amounts into every supported currency as of a date.
///
/// Rate lookup is routed by calendar month: a closed month uses rates pinned
/// to that month's end and is cached for the rest of the run, while the
/// current month always consults the source's latest rates. The cache-miss
/// path may block on the source.
#[derive(Clone)]
pub struct FxService {
    source: Arc<dyn RateSourceTrait>,
    cache: Arc<RwLock<HashMap<RateMonth, HashMap<Currency, Decimal>>>>,
}

impl FxService {
    pub fn new(source: Arc<dyn RateSourceTrait>) -> Self {
        Self {
            source,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Rates for a closed historical month, cached after the first fetch.
    fn month_rates(&self, month: RateMonth) -> Result<HashMap<Currency, Decimal>> {
        {
            let cache = self
                .cache
                .read()
                .map_err(|e| FxError::CacheError(e.to_string()))?;
            if let Some(rates) = cache.get(&month) {
                return Ok(rates.clone());
            }
        }

        let rates = self.source.get_rates(month.end())?;
        validate_complete(&rates, &format!("month {}", month))?;

        debug!("Caching exchange rates for {}", month);
        let mut cache = self
            .cache
            .write()
            .map_err(|e| FxError::CacheError(e.to_string()))?;
        cache.insert(month, rates.clone());
        Ok(rates)
    }

    fn rates_as_of(&self, as_of: Option<NaiveDate>) -> Result<HashMap<Currency, Decimal>> {
        let current = RateMonth::of(Self::today());
        match as_of {
            Some(date) if RateMonth::of(date) < current => self.month_rates(RateMonth::of(date)),
            _ => {
                let rates = self.source.get_latest_rates()?;
                validate_complete(&rates, "latest")?;
                Ok(rates)
            }
        }
    }
}

impl FxServiceTrait for FxService {
    fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        as_of: Option<NaiveDate>,
    ) -> Result<CurrencyMap> {
        let rates = self.rates_as_of(as_of)?;

        let from_rate = rates
            .get(&from)
            .copied()
            .ok_or_else(|| FxError::RateUnavailable(format!("no rate for {from}")))?;
        if from_rate.is_zero() {
            return Err(FxError::InvalidRate(format!("zero rate for {from}")).into());
        }

        let base_amount = amount / from_rate;
        let mut values = CurrencyMap::with_capacity(Currency::ALL.len());
        for currency in Currency::ALL {
            if currency == from {
                // Identity conversion stays exact.
                values.insert(currency, amount);
                continue;
            }
            let rate = rates
                .get(&currency)
                .copied()
                .ok_or_else(|| FxError::RateUnavailable(format!("no rate for {currency}")))?;
            values.insert(currency, (base_amount * rate).round_dp(DECIMAL_PRECISION));
        }
        Ok(values)
    }
}

fn validate_complete(rates: &HashMap<Currency, Decimal>, context: &str) -> Result<()> {
    for currency in Currency::ALL {
        if !rates.contains_key(&currency) {
            return Err(FxError::RateUnavailable(format!(
                "incomplete rate set ({context}): missing {currency}"
            ))
            .into());
        }
    }
    Ok(())
}
