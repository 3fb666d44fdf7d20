//! Ledger consistency engine.
//!
//! Keeps account balances, debt balances, multi-currency converted values and
//! the per-account history of balance snapshots consistent as transactions
//! are created, edited and deleted, including edits to past transactions.
//! Persistence is a collaborator behind repository traits; every hook runs
//! synchronously inside the caller's atomic unit of work.

pub mod accounts;
pub mod balances;
pub mod consistency;
pub mod constants;
pub mod currencies;
pub mod debts;
pub mod errors;
pub mod fx;
pub mod history;
pub mod transactions;

pub use errors::{Error, Result};

pub use accounts::{Account, AccountRepositoryTrait};
pub use balances::{BalanceDelta, BalanceMutator};
pub use consistency::{ConsistencyMode, ConsistencyService, ConsistencyServiceTrait};
pub use currencies::{ConvertedValues, Currency, CurrencyMap};
pub use debts::{Debt, DebtRepositoryTrait};
pub use fx::{FxService, FxServiceTrait, RateSourceTrait};
pub use history::{AccountLogEntry, AccountLogRepositoryTrait, HistoryRebuilder};
pub use transactions::{
    ChangeSet, CompensationNetter, Transaction, TransactionKind, TransactionRepositoryTrait,
};
