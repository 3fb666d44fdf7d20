use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fx::FxError;

/// The fixed set of currencies every monetary value is tracked in.
///
/// EUR is the rate base: exchange rates are expressed as units of a currency
/// per one EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Uah,
    Usd,
    Eur,
    Huf,
    Btc,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Uah,
        Currency::Usd,
        Currency::Eur,
        Currency::Huf,
        Currency::Btc,
    ];

    /// The base currency exchange rates are quoted against.
    pub const RATE_BASE: Currency = Currency::Eur;

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Uah => "UAH",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Huf => "HUF",
            Currency::Btc => "BTC",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = FxError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.to_ascii_uppercase().as_str() {
            "UAH" => Ok(Currency::Uah),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "HUF" => Ok(Currency::Huf),
            "BTC" => Ok(Currency::Btc),
            _ => Err(FxError::UnsupportedCurrency(code.to_string())),
        }
    }
}

/// A monetary magnitude expressed in every supported currency.
pub type CurrencyMap = HashMap<Currency, Decimal>;

/// Accessor for entities that carry a converted-values map.
pub trait ConvertedValues {
    fn converted_values(&self) -> &CurrencyMap;

    fn converted_value(&self, currency: Currency) -> Decimal {
        self.converted_values()
            .get(&currency)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_codes_case_insensitively() {
        assert_eq!("uah".parse::<Currency>().unwrap(), Currency::Uah);
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("Btc".parse::<Currency>().unwrap(), Currency::Btc);
    }

    #[test]
    fn rejects_unknown_codes() {
        let err = "XAU".parse::<Currency>().unwrap_err();
        assert!(matches!(err, FxError::UnsupportedCurrency(code) if code == "XAU"));
    }

    #[test]
    fn round_trips_through_display() {
        for currency in Currency::ALL {
            assert_eq!(currency.as_str().parse::<Currency>().unwrap(), currency);
        }
    }
}
