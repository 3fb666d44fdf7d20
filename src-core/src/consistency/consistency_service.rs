use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::consistency_model::ConsistencyMode;
use super::consistency_traits::ConsistencyServiceTrait;
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::balances::BalanceMutator;
use crate::currencies::{ConvertedValues, Currency};
use crate::debts::{Debt, DebtRepositoryTrait};
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::history::{AccountLogRepositoryTrait, HistoryRebuilder};
use crate::transactions::{
    ChangeSet, CompensationNetter, Transaction, TransactionRepositoryTrait,
};

/// Entry point the persistence layer drives on transaction and debt
/// mutations. Sequences conversion, netting, balance mutation and history
/// replay within the caller's unit of work.
///
/// Stages run strictly in order because the history replay reads the balance
/// the balancing stage wrote; any failure propagates before a later stage
/// runs, and the caller rolls the unit of work back as a whole.
///
/// The engine assumes at most one in-flight mutation per account. Callers
/// exposing it to concurrent writers must serialize writes per account.
pub struct ConsistencyService {
    base_currency: Currency,
    fx: Arc<dyn FxServiceTrait>,
    accounts: Arc<dyn AccountRepositoryTrait>,
    debts: Arc<dyn DebtRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    netter: CompensationNetter,
    mutator: BalanceMutator,
    rebuilder: HistoryRebuilder,
}

impl ConsistencyService {
    pub fn new(
        base_currency: Currency,
        fx: Arc<dyn FxServiceTrait>,
        accounts: Arc<dyn AccountRepositoryTrait>,
        debts: Arc<dyn DebtRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        log: Arc<dyn AccountLogRepositoryTrait>,
    ) -> Self {
        Self {
            base_currency,
            fx: fx.clone(),
            accounts,
            debts,
            transactions: transactions.clone(),
            netter: CompensationNetter::new(fx.clone()),
            mutator: BalanceMutator::new(fx.clone()),
            rebuilder: HistoryRebuilder::new(transactions, log, fx),
        }
    }

    /// Currency-qualified accessor over any converted-values map.
    /// `None` resolves to the configured base currency.
    pub fn converted_value(
        &self,
        entity: &dyn ConvertedValues,
        currency: Option<Currency>,
    ) -> Decimal {
        entity.converted_value(currency.unwrap_or(self.base_currency))
    }

    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }

    /// Recomputes converted values for `transaction`, netting an expense
    /// against its live compensations.
    fn convert_and_net(&self, transaction: &mut Transaction) -> Result<()> {
        transaction.converted_values = self.fx.convert(
            transaction.amount,
            transaction.currency,
            Some(transaction.executed_at.date()),
        )?;

        if transaction.is_expense() {
            let compensations = self.live_compensations(&transaction.id, None)?;
            if !compensations.is_empty() {
                transaction.converted_values =
                    self.netter.net_value(transaction, &compensations)?;
            }
        }
        Ok(())
    }

    fn live_compensations(
        &self,
        expense_id: &str,
        excluded: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let mut compensations = self.transactions.compensations_for(expense_id)?;
        compensations
            .retain(|c| c.canceled_at.is_none() && excluded != Some(c.id.as_str()));
        Ok(compensations)
    }

    /// Re-nets the expense a compensation points at, excluding a compensation
    /// that is logically removed but may still be visible in storage.
    fn refresh_compensated_expense(
        &self,
        expense_id: &str,
        excluded: Option<&str>,
    ) -> Result<()> {
        let expense = self.transactions.get_transaction(expense_id)?;
        let compensations = self.live_compensations(expense_id, excluded)?;
        let net = self.netter.net_value(&expense, &compensations)?;
        self.transactions.update_converted_values(expense_id, &net)?;
        debug!("Refreshed net value of compensated expense {expense_id}");
        Ok(())
    }

    fn refresh_account_values(&self, account: &mut Account) -> Result<()> {
        account.converted_values = self.fx.convert(account.balance, account.currency, None)?;
        Ok(())
    }

    fn refresh_debt_values(&self, debt: &mut Debt) -> Result<()> {
        debt.converted_values = self.fx.convert(debt.balance, debt.currency, None)?;
        Ok(())
    }

    fn apply_account_delta(&self, delta: &crate::balances::BalanceDelta) -> Result<Account> {
        let mut account = self.accounts.get_account(&delta.account_id)?;
        BalanceMutator::apply(&mut account, delta);
        self.refresh_account_values(&mut account)?;
        self.accounts.save_account(&account)?;
        Ok(account)
    }

    fn apply_debt_delta(&self, debt_id: &str, delta: Decimal) -> Result<()> {
        if delta.is_zero() {
            return Ok(());
        }
        let mut debt = self.debts.get_debt(debt_id)?;
        BalanceMutator::apply_debt(&mut debt, delta);
        self.refresh_debt_values(&mut debt)?;
        self.debts.save_debt(&debt)
    }
}

impl ConsistencyServiceTrait for ConsistencyService {
    fn transaction_created(
        &self,
        transaction: &mut Transaction,
        mode: ConsistencyMode,
    ) -> Result<()> {
        if mode == ConsistencyMode::BulkLoad {
            return Ok(());
        }

        let account = self.accounts.get_account(&transaction.account_id)?;
        transaction.currency = account.currency;

        self.convert_and_net(transaction)?;
        if let Some(expense_id) = transaction.compensates.clone() {
            self.refresh_compensated_expense(&expense_id, None)?;
        }

        let Some(delta) = BalanceMutator::create_delta(transaction) else {
            // Drafts stop after conversion.
            return Ok(());
        };
        let account = self.apply_account_delta(&delta)?;

        if let Some(debt_id) = transaction.debt_id.clone() {
            let debt = self.debts.get_debt(&debt_id)?;
            let debt_delta = self.mutator.debt_create_delta(transaction, &debt)?;
            self.apply_debt_delta(&debt_id, debt_delta)?;
        }

        self.rebuilder
            .rebuild(&account, transaction.executed_at, None)
    }

    fn transaction_updated(
        &self,
        previous: &Transaction,
        current: &mut Transaction,
        mode: ConsistencyMode,
    ) -> Result<()> {
        if mode == ConsistencyMode::BulkLoad {
            return Ok(());
        }
        // Cancellation flows through the delete hook.
        if previous.canceled_at.is_some() || current.canceled_at.is_some() {
            return Ok(());
        }

        let account = self.accounts.get_account(&current.account_id)?;
        current.currency = account.currency;

        let change = ChangeSet::diff(previous, current)?;
        if !change.affects_conversion() {
            return Ok(());
        }

        self.convert_and_net(current)?;
        if let Some(expense_id) = current.compensates.clone() {
            self.refresh_compensated_expense(&expense_id, None)?;
        }

        // A transaction that never had and still has no balance effect is
        // done once its values are fresh.
        if previous.is_draft && current.is_draft {
            return Ok(());
        }

        if change.affects_balances() {
            for delta in BalanceMutator::update_deltas(&change, current.kind) {
                self.apply_account_delta(&delta)?;
            }
            if let Some(debt_id) = current.debt_id.clone() {
                let debt = self.debts.get_debt(&debt_id)?;
                let debt_delta = self.mutator.debt_update_delta(&change, current.kind, &debt)?;
                self.apply_debt_delta(&debt_id, debt_delta)?;
            }
        }

        if change.account_changed {
            let old_account = self.accounts.get_account(&change.old_account_id)?;
            self.rebuilder
                .rebuild(&old_account, change.old_executed_at, None)?;
            let new_account = self.accounts.get_account(&change.new_account_id)?;
            self.rebuilder
                .rebuild(&new_account, change.new_executed_at, None)?;
        } else {
            let account = self.accounts.get_account(&change.new_account_id)?;
            self.rebuilder
                .rebuild(&account, change.earliest_affected_at(), None)?;
        }
        Ok(())
    }

    fn transaction_deleted(
        &self,
        transaction: &Transaction,
        mode: ConsistencyMode,
    ) -> Result<()> {
        if mode == ConsistencyMode::BulkLoad {
            return Ok(());
        }
        // An already-canceled transaction was reversed when it was canceled.
        if transaction.canceled_at.is_some() {
            return Ok(());
        }

        if let Some(expense_id) = transaction.compensates.clone() {
            self.refresh_compensated_expense(&expense_id, Some(&transaction.id))?;
        }

        let Some(delta) = BalanceMutator::delete_delta(transaction) else {
            return Ok(());
        };
        let account = self.apply_account_delta(&delta)?;

        if let Some(debt_id) = transaction.debt_id.clone() {
            let debt = self.debts.get_debt(&debt_id)?;
            let debt_delta = self.mutator.debt_delete_delta(transaction, &debt)?;
            self.apply_debt_delta(&debt_id, debt_delta)?;
        }

        self.rebuilder
            .rebuild(&account, transaction.executed_at, Some(&transaction.id))
    }

    fn debt_saved(&self, debt: &mut Debt, mode: ConsistencyMode) -> Result<()> {
        if mode == ConsistencyMode::BulkLoad {
            return Ok(());
        }
        self.refresh_debt_values(debt)
    }
}
