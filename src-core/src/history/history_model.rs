use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currencies::{ConvertedValues, CurrencyMap};

/// Immutable snapshot of an account's running balance at one instant.
///
/// `balance` is the running balance immediately before the transactions at
/// `created_at` apply (start-of-instant convention); `created_at` aliases a
/// transaction's execution instant, never wall-clock time. At most one entry
/// exists per account and instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountLogEntry {
    /// Deterministic: "{account_id}_{created_at}" so that replays are
    /// reproducible entry for entry.
    pub id: String,
    pub account_id: String,
    pub balance: Decimal,
    #[serde(default)]
    pub converted_values: CurrencyMap,
    pub created_at: NaiveDateTime,
}

impl AccountLogEntry {
    pub fn entry_id(account_id: &str, at: NaiveDateTime) -> String {
        format!("{}_{}", account_id, at.format("%Y-%m-%dT%H:%M:%S"))
    }
}

impl ConvertedValues for AccountLogEntry {
    fn converted_values(&self) -> &CurrencyMap {
        &self.converted_values
    }
}

/// One row of the netted replay set: the summed signed effect of every
/// transaction sharing an exact execution instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayEntry {
    pub executed_at: NaiveDateTime,
    pub net_effect: Decimal,
}
