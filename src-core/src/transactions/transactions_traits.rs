use chrono::NaiveDateTime;

use super::transactions_model::Transaction;
use crate::currencies::CurrencyMap;
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
///
/// Implemented by the persistence layer and called inside the unit of work
/// that invoked the engine. Query methods must reflect the caller's pending
/// state, with one exception the engine handles itself: a transaction pending
/// deletion may still be visible and is excluded explicitly during replay.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    /// Every transaction for the account with `executed_at` strictly after
    /// `after` (all of them when `None`), ordered by `executed_at` ascending.
    /// Canceled and draft rows are included; the engine filters.
    fn transactions_for_account_after(
        &self,
        account_id: &str,
        after: Option<NaiveDateTime>,
    ) -> Result<Vec<Transaction>>;

    /// Incomes whose `compensates` references the given expense.
    fn compensations_for(&self, expense_id: &str) -> Result<Vec<Transaction>>;

    /// Persists engine-computed converted values for a transaction.
    fn update_converted_values(&self, transaction_id: &str, values: &CurrencyMap) -> Result<()>;
}
