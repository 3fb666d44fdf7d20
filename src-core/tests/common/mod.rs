//! In-memory collaborators standing in for the persistence layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use moneta_core::accounts::AccountRepositoryTrait;
use moneta_core::currencies::CurrencyMap;
use moneta_core::debts::DebtRepositoryTrait;
use moneta_core::errors::{Error, Result};
use moneta_core::fx::{FxService, RateSourceTrait};
use moneta_core::history::{AccountLogEntry, AccountLogRepositoryTrait};
use moneta_core::transactions::TransactionRepositoryTrait;
use moneta_core::{
    Account, ConsistencyMode, ConsistencyService, ConsistencyServiceTrait, Currency, Debt,
    Transaction,
};

/// Fixture rates: units of each currency per one EUR.
pub struct FixtureRateSource;

impl FixtureRateSource {
    fn table() -> HashMap<Currency, Decimal> {
        let mut rates = HashMap::new();
        rates.insert(Currency::Eur, dec!(1.0));
        rates.insert(Currency::Usd, dec!(1.2));
        rates.insert(Currency::Huf, dec!(300));
        rates.insert(Currency::Uah, dec!(30));
        rates.insert(Currency::Btc, dec!(0.0001));
        rates
    }
}

impl RateSourceTrait for FixtureRateSource {
    fn get_rates(&self, _month_end: NaiveDate) -> Result<HashMap<Currency, Decimal>> {
        Ok(Self::table())
    }

    fn get_latest_rates(&self) -> Result<HashMap<Currency, Decimal>> {
        Ok(Self::table())
    }
}

#[derive(Default)]
pub struct AccountStore {
    rows: Mutex<HashMap<String, Account>>,
}

impl AccountRepositoryTrait for AccountStore {
    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.rows
            .lock()
            .unwrap()
            .get(account_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("account {account_id}")))
    }

    fn save_account(&self, account: &Account) -> Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(account.id.clone(), account.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct DebtStore {
    rows: Mutex<HashMap<String, Debt>>,
}

impl DebtRepositoryTrait for DebtStore {
    fn get_debt(&self, debt_id: &str) -> Result<Debt> {
        self.rows
            .lock()
            .unwrap()
            .get(debt_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("debt {debt_id}")))
    }

    fn save_debt(&self, debt: &Debt) -> Result<()> {
        self.rows
            .lock()
            .unwrap()
            .insert(debt.id.clone(), debt.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct TransactionStore {
    rows: Mutex<HashMap<String, Transaction>>,
}

impl TransactionStore {
    pub fn upsert(&self, transaction: &Transaction) {
        self.rows
            .lock()
            .unwrap()
            .insert(transaction.id.clone(), transaction.clone());
    }

    pub fn remove(&self, transaction_id: &str) {
        self.rows.lock().unwrap().remove(transaction_id);
    }
}

impl TransactionRepositoryTrait for TransactionStore {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.rows
            .lock()
            .unwrap()
            .get(transaction_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("transaction {transaction_id}")))
    }

    fn transactions_for_account_after(
        &self,
        account_id: &str,
        after: Option<NaiveDateTime>,
    ) -> Result<Vec<Transaction>> {
        let mut rows: Vec<Transaction> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|tx| tx.account_id == account_id)
            .filter(|tx| after.map_or(true, |cutoff| tx.executed_at > cutoff))
            .cloned()
            .collect();
        rows.sort_by_key(|tx| tx.executed_at);
        Ok(rows)
    }

    fn compensations_for(&self, expense_id: &str) -> Result<Vec<Transaction>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|tx| tx.compensates.as_deref() == Some(expense_id))
            .cloned()
            .collect())
    }

    fn update_converted_values(&self, transaction_id: &str, values: &CurrencyMap) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(transaction_id)
            .ok_or_else(|| Error::NotFound(format!("transaction {transaction_id}")))?;
        row.converted_values = values.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct LogStore {
    rows: Mutex<Vec<AccountLogEntry>>,
}

impl AccountLogRepositoryTrait for LogStore {
    fn latest_entry_before(
        &self,
        account_id: &str,
        before: NaiveDateTime,
    ) -> Result<Option<AccountLogEntry>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.account_id == account_id && e.created_at < before)
            .max_by_key(|e| e.created_at)
            .cloned())
    }

    fn delete_entries_from(&self, account_id: &str, from: NaiveDateTime) -> Result<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| !(e.account_id == account_id && e.created_at >= from));
        Ok(before - rows.len())
    }

    fn append_entries(&self, entries: &[AccountLogEntry]) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.extend_from_slice(entries);
        rows.sort_by_key(|e| e.created_at);
        Ok(())
    }

    fn entries_for_account(&self, account_id: &str) -> Result<Vec<AccountLogEntry>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect())
    }
}

/// Drives the engine's hooks the way a persistence layer would: pending state
/// is visible to the repositories while a hook runs, and the stored row is
/// finalized afterwards.
pub struct TestLedger {
    pub accounts: Arc<AccountStore>,
    pub debts: Arc<DebtStore>,
    pub transactions: Arc<TransactionStore>,
    pub log: Arc<LogStore>,
    pub service: ConsistencyService,
}

impl TestLedger {
    pub fn new() -> Self {
        let accounts = Arc::new(AccountStore::default());
        let debts = Arc::new(DebtStore::default());
        let transactions = Arc::new(TransactionStore::default());
        let log = Arc::new(LogStore::default());
        let fx = Arc::new(FxService::new(Arc::new(FixtureRateSource)));
        let service = ConsistencyService::new(
            Currency::Eur,
            fx,
            accounts.clone(),
            debts.clone(),
            transactions.clone(),
            log.clone(),
        );
        Self {
            accounts,
            debts,
            transactions,
            log,
            service,
        }
    }

    pub fn add_account(&self, name: &str, currency: Currency) -> Account {
        let account = Account::new(name, currency, day(1).and_hms_opt(0, 0, 0).unwrap());
        self.accounts.save_account(&account).unwrap();
        account
    }

    pub fn add_debt(&self, counterparty: &str, currency: Currency) -> Debt {
        let debt = Debt::new(counterparty, currency, day(1).and_hms_opt(0, 0, 0).unwrap());
        self.debts.save_debt(&debt).unwrap();
        debt
    }

    pub fn create(&self, mut transaction: Transaction) -> Transaction {
        self.transactions.upsert(&transaction);
        self.service
            .transaction_created(&mut transaction, ConsistencyMode::Normal)
            .unwrap();
        self.transactions.upsert(&transaction);
        transaction
    }

    pub fn update(&self, previous: &Transaction, mut current: Transaction) -> Transaction {
        self.transactions.upsert(&current);
        self.service
            .transaction_updated(previous, &mut current, ConsistencyMode::Normal)
            .unwrap();
        self.transactions.upsert(&current);
        current
    }

    pub fn delete(&self, transaction: &Transaction) {
        self.service
            .transaction_deleted(transaction, ConsistencyMode::Normal)
            .unwrap();
        self.transactions.remove(&transaction.id);
    }

    pub fn account(&self, account_id: &str) -> Account {
        self.accounts.get_account(account_id).unwrap()
    }

    pub fn debt(&self, debt_id: &str) -> Debt {
        self.debts.get_debt(debt_id).unwrap()
    }

    pub fn transaction(&self, transaction_id: &str) -> Transaction {
        self.transactions.get_transaction(transaction_id).unwrap()
    }

    pub fn entries(&self, account_id: &str) -> Vec<AccountLogEntry> {
        self.log.entries_for_account(account_id).unwrap()
    }
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 3, d).unwrap()
}

pub fn at(d: u32, hour: u32) -> NaiveDateTime {
    day(d).and_hms_opt(hour, 0, 0).unwrap()
}
