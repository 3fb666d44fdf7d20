use chrono::NaiveDateTime;

use super::history_model::AccountLogEntry;
use crate::errors::Result;

/// Trait defining the contract for account-log repository operations.
///
/// Entries are ordered by `created_at` ascending. Only the rebuilder writes
/// through this trait.
pub trait AccountLogRepositoryTrait: Send + Sync {
    /// The latest entry with `created_at` strictly before `before`.
    fn latest_entry_before(
        &self,
        account_id: &str,
        before: NaiveDateTime,
    ) -> Result<Option<AccountLogEntry>>;

    /// Deletes every entry with `created_at >= from`; returns how many went.
    fn delete_entries_from(&self, account_id: &str, from: NaiveDateTime) -> Result<usize>;

    fn append_entries(&self, entries: &[AccountLogEntry]) -> Result<()>;

    /// Full ascending history for an account.
    fn entries_for_account(&self, account_id: &str) -> Result<Vec<AccountLogEntry>>;
}
