use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currencies::{ConvertedValues, Currency, CurrencyMap};

/// Domain model representing a debt owed to or by a counterparty.
///
/// `balance` lives in the debt's own currency; linked transactions contribute
/// their value converted into that currency, with the sign convention
/// mirrored from accounts (an expense increases what is owed, an income
/// repays it).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub counterparty: String,
    pub currency: Currency,
    pub balance: Decimal,
    #[serde(default)]
    pub converted_values: CurrencyMap,
    pub created_at: NaiveDateTime,
}

impl Debt {
    pub fn new(
        counterparty: impl Into<String>,
        currency: Currency,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            counterparty: counterparty.into(),
            currency,
            balance: Decimal::ZERO,
            converted_values: CurrencyMap::new(),
            created_at,
        }
    }
}

impl ConvertedValues for Debt {
    fn converted_values(&self) -> &CurrencyMap {
        &self.converted_values
    }
}
