use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currencies::{ConvertedValues, Currency, CurrencyMap};

/// Domain model representing an account in the system.
///
/// `balance` is the authoritative running total: the sum of signed effects of
/// every non-canceled, non-draft transaction on the account. It is mutated
/// only by the engine's balance stage; `converted_values` tracks the same
/// balance in every supported currency at latest rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub balance: Decimal,
    #[serde(default)]
    pub converted_values: CurrencyMap,
    pub created_at: NaiveDateTime,
}

impl Account {
    pub fn new(name: impl Into<String>, currency: Currency, created_at: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            currency,
            balance: Decimal::ZERO,
            converted_values: CurrencyMap::new(),
            created_at,
        }
    }
}

impl ConvertedValues for Account {
    fn converted_values(&self) -> &CurrencyMap {
        &self.converted_values
    }
}
