use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::currencies::{Currency, CurrencyMap};
use crate::errors::Result;

/// Trait defining the contract for exchange-rate suppliers.
///
/// Rates are quoted as units of each currency per one EUR. A source must
/// return a complete map covering every supported currency or a hard error,
/// never a silently partial one. Rates for a closed month must be stable
/// across calls; the engine caches them indefinitely within a run.
pub trait RateSourceTrait: Send + Sync {
    /// Rates pinned to the close of the month containing `month_end`.
    fn get_rates(&self, month_end: NaiveDate) -> Result<HashMap<Currency, Decimal>>;

    /// The most recent rates available for the still-open current month.
    fn get_latest_rates(&self) -> Result<HashMap<Currency, Decimal>>;
}

/// Trait defining the contract for the value-conversion service.
pub trait FxServiceTrait: Send + Sync {
    /// Converts a signed amount in `from`, as of `as_of`, into every
    /// supported currency. `None` means "now".
    fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        as_of: Option<NaiveDate>,
    ) -> Result<CurrencyMap>;

    /// Boundary variant taking a raw currency code; fails with
    /// `UnsupportedCurrency` before any rate lookup.
    fn convert_code(
        &self,
        amount: Decimal,
        from_code: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<CurrencyMap> {
        let from = from_code.parse::<Currency>().map_err(crate::Error::from)?;
        self.convert(amount, from, as_of)
    }
}
