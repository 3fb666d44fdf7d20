use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::transactions_errors::TransactionError;
use super::transactions_model::Transaction;
use crate::currencies::Currency;
use crate::errors::Result;

/// The fields that differ between a transaction's previous and new state.
///
/// Pure and side-effect-free; the caller supplies both snapshots explicitly.
/// The mutation strategy downstream branches on exactly which of
/// {account, amount, execution date} changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub account_changed: bool,
    pub amount_changed: bool,
    pub execution_date_changed: bool,
    pub old_account_id: String,
    pub new_account_id: String,
    pub old_amount: Decimal,
    pub new_amount: Decimal,
    pub old_currency: Currency,
    pub new_currency: Currency,
    pub old_executed_at: NaiveDateTime,
    pub new_executed_at: NaiveDateTime,
}

impl ChangeSet {
    /// Diffs two snapshots of the same transaction.
    ///
    /// Amount comparison is numeric: `100` and `100.00` are not a change.
    pub fn diff(previous: &Transaction, current: &Transaction) -> Result<ChangeSet> {
        if previous.id != current.id {
            return Err(TransactionError::InconsistentChangeSet(format!(
                "previous snapshot is for '{}', current is '{}'",
                previous.id, current.id
            ))
            .into());
        }

        Ok(ChangeSet {
            account_changed: previous.account_id != current.account_id,
            amount_changed: previous.amount != current.amount,
            execution_date_changed: previous.executed_at != current.executed_at,
            old_account_id: previous.account_id.clone(),
            new_account_id: current.account_id.clone(),
            old_amount: previous.amount,
            new_amount: current.amount,
            old_currency: previous.currency,
            new_currency: current.currency,
            old_executed_at: previous.executed_at,
            new_executed_at: current.executed_at,
        })
    }

    /// Converted values must be recomputed.
    pub fn affects_conversion(&self) -> bool {
        self.account_changed || self.amount_changed || self.execution_date_changed
    }

    /// Account and debt balances must move.
    pub fn affects_balances(&self) -> bool {
        self.account_changed || self.amount_changed
    }

    /// The snapshot history must be replayed.
    pub fn affects_history(&self) -> bool {
        self.account_changed || self.amount_changed || self.execution_date_changed
    }

    /// The earliest instant whose snapshots the change can invalidate.
    pub fn earliest_affected_at(&self) -> NaiveDateTime {
        self.old_executed_at.min(self.new_executed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::transactions_model::TransactionKind;
    use crate::Error;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn base_tx() -> Transaction {
        let executed_at = NaiveDate::from_ymd_opt(2018, 3, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Transaction::new("acct-a", TransactionKind::Expense, dec!(100), Currency::Uah, executed_at)
    }

    #[test]
    fn identical_snapshots_diff_to_no_change() {
        let tx = base_tx();
        let change = ChangeSet::diff(&tx, &tx).unwrap();

        assert!(!change.account_changed);
        assert!(!change.amount_changed);
        assert!(!change.execution_date_changed);
        assert!(!change.affects_conversion());
        assert!(!change.affects_balances());
    }

    #[test]
    fn amount_comparison_is_numeric() {
        let previous = base_tx();
        let mut current = previous.clone();
        current.amount = dec!(100.00);

        let change = ChangeSet::diff(&previous, &current).unwrap();
        assert!(!change.amount_changed);
    }

    #[test]
    fn account_move_is_detected() {
        let previous = base_tx();
        let mut current = previous.clone();
        current.account_id = "acct-b".to_string();

        let change = ChangeSet::diff(&previous, &current).unwrap();
        assert!(change.account_changed);
        assert!(!change.amount_changed);
        assert!(change.affects_balances());
        assert!(change.affects_history());
    }

    #[test]
    fn date_change_alone_moves_history_but_not_balances() {
        let previous = base_tx();
        let mut current = previous.clone();
        current.executed_at = previous.executed_at - chrono::Duration::days(5);

        let change = ChangeSet::diff(&previous, &current).unwrap();
        assert!(change.execution_date_changed);
        assert!(!change.affects_balances());
        assert!(change.affects_history());
        assert_eq!(change.earliest_affected_at(), current.executed_at);
    }

    #[test]
    fn mismatched_ids_are_rejected() {
        let previous = base_tx();
        let current = base_tx(); // fresh uuid

        let err = ChangeSet::diff(&previous, &current).unwrap_err();
        assert!(matches!(
            err,
            Error::Transaction(TransactionError::InconsistentChangeSet(_))
        ));
    }
}
