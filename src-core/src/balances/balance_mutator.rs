use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use crate::accounts::Account;
use crate::currencies::Currency;
use crate::debts::Debt;
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::transactions::{ChangeSet, Transaction, TransactionKind};

/// A signed balance adjustment targeting one account.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceDelta {
    pub account_id: String,
    pub delta: Decimal,
}

fn signed(kind: TransactionKind, amount: Decimal) -> Decimal {
    match kind {
        TransactionKind::Expense => -amount,
        TransactionKind::Income => amount,
    }
}

/// Translates transaction lifecycle events into signed balance deltas and
/// applies them to Account and Debt aggregates.
///
/// Account deltas use the raw amount (transactions live in their account's
/// currency); debt deltas use the amount converted into the debt's own
/// currency as of the execution date, with the sign mirrored.
#[derive(Clone)]
pub struct BalanceMutator {
    fx: Arc<dyn FxServiceTrait>,
}

impl BalanceMutator {
    pub fn new(fx: Arc<dyn FxServiceTrait>) -> Self {
        Self { fx }
    }

    /// Delta for a newly created transaction, if it has a balance effect.
    pub fn create_delta(transaction: &Transaction) -> Option<BalanceDelta> {
        if !transaction.affects_balance() {
            return None;
        }
        Some(BalanceDelta {
            account_id: transaction.account_id.clone(),
            delta: transaction.signed_amount(),
        })
    }

    /// Delta reversing a transaction about to be removed. Already-canceled
    /// transactions were reversed when they were canceled.
    pub fn delete_delta(transaction: &Transaction) -> Option<BalanceDelta> {
        if !transaction.affects_balance() {
            return None;
        }
        Some(BalanceDelta {
            account_id: transaction.account_id.clone(),
            delta: -transaction.signed_amount(),
        })
    }

    /// Deltas for an update. Exactly one of four cases applies; execution-date
    /// changes alone never move balances.
    pub fn update_deltas(change: &ChangeSet, kind: TransactionKind) -> Vec<BalanceDelta> {
        match (change.account_changed, change.amount_changed) {
            (false, false) => Vec::new(),
            (true, false) => vec![
                BalanceDelta {
                    account_id: change.old_account_id.clone(),
                    delta: -signed(kind, change.old_amount),
                },
                BalanceDelta {
                    account_id: change.new_account_id.clone(),
                    delta: signed(kind, change.old_amount),
                },
            ],
            (false, true) => vec![BalanceDelta {
                account_id: change.new_account_id.clone(),
                delta: signed(kind, change.new_amount) - signed(kind, change.old_amount),
            }],
            (true, true) => vec![
                BalanceDelta {
                    account_id: change.old_account_id.clone(),
                    delta: -signed(kind, change.old_amount),
                },
                BalanceDelta {
                    account_id: change.new_account_id.clone(),
                    delta: signed(kind, change.new_amount),
                },
            ],
        }
    }

    /// Applies a delta to the matching account.
    pub fn apply(account: &mut Account, delta: &BalanceDelta) {
        debug_assert_eq!(account.id, delta.account_id);
        account.balance += delta.delta;
        debug!(
            "Account {} balance adjusted by {} to {}",
            account.id, delta.delta, account.balance
        );
    }

    /// The transaction's effect in the debt's own currency.
    fn converted_effect(
        &self,
        kind: TransactionKind,
        amount: Decimal,
        currency: Currency,
        executed_at: chrono::NaiveDateTime,
        debt_currency: Currency,
    ) -> Result<Decimal> {
        let values = self.fx.convert(amount, currency, Some(executed_at.date()))?;
        let converted = values.get(&debt_currency).copied().unwrap_or(Decimal::ZERO);
        // Mirror of the account sign: expenses grow the debt, incomes repay it.
        Ok(-signed(kind, converted))
    }

    /// Debt delta for a created transaction.
    pub fn debt_create_delta(&self, transaction: &Transaction, debt: &Debt) -> Result<Decimal> {
        if !transaction.affects_balance() {
            return Ok(Decimal::ZERO);
        }
        self.converted_effect(
            transaction.kind,
            transaction.amount,
            transaction.currency,
            transaction.executed_at,
            debt.currency,
        )
    }

    /// Debt delta reversing a removed transaction.
    pub fn debt_delete_delta(&self, transaction: &Transaction, debt: &Debt) -> Result<Decimal> {
        Ok(-self.debt_create_delta(transaction, debt)?)
    }

    /// Debt delta for an update: reverse the old converted effect, apply the
    /// new one. Zero when neither amount nor account changed.
    pub fn debt_update_delta(
        &self,
        change: &ChangeSet,
        kind: TransactionKind,
        debt: &Debt,
    ) -> Result<Decimal> {
        if !change.affects_balances() {
            return Ok(Decimal::ZERO);
        }
        let old_effect = self.converted_effect(
            kind,
            change.old_amount,
            change.old_currency,
            change.old_executed_at,
            debt.currency,
        )?;
        let new_effect = self.converted_effect(
            kind,
            change.new_amount,
            change.new_currency,
            change.new_executed_at,
            debt.currency,
        )?;
        Ok(new_effect - old_effect)
    }

    /// Applies a signed delta to a debt balance.
    pub fn apply_debt(debt: &mut Debt, delta: Decimal) {
        debt.balance += delta;
        debug!(
            "Debt {} balance adjusted by {} to {}",
            debt.id, delta, debt.balance
        );
    }
}
