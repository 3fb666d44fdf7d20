use super::accounts_model::Account;
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Implemented by the persistence layer; every call happens inside the unit
/// of work that invoked the engine, so a failed operation rolls the whole
/// mutation back.
pub trait AccountRepositoryTrait: Send + Sync {
    fn get_account(&self, account_id: &str) -> Result<Account>;
    fn save_account(&self, account: &Account) -> Result<()>;
}
