use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use log::debug;
use rust_decimal::Decimal;

use super::history_errors::HistoryError;
use super::history_model::{AccountLogEntry, ReplayEntry};
use super::history_traits::AccountLogRepositoryTrait;
use crate::accounts::Account;
use crate::errors::Result;
use crate::fx::FxServiceTrait;
use crate::transactions::TransactionRepositoryTrait;

/// Keeps each account's log an accurate, time-ordered history of its running
/// balance, replaying the tail whenever an earlier transaction changes.
///
/// Snapshot convention: an entry's balance is the running balance immediately
/// before the transactions at its instant apply. Walking the netted replay
/// set forward from `account.balance - sum(replay effects)` therefore ends,
/// by construction, at the authoritative balance.
#[derive(Clone)]
pub struct HistoryRebuilder {
    transactions: Arc<dyn TransactionRepositoryTrait>,
    log: Arc<dyn AccountLogRepositoryTrait>,
    fx: Arc<dyn FxServiceTrait>,
}

impl HistoryRebuilder {
    pub fn new(
        transactions: Arc<dyn TransactionRepositoryTrait>,
        log: Arc<dyn AccountLogRepositoryTrait>,
        fx: Arc<dyn FxServiceTrait>,
    ) -> Self {
        Self {
            transactions,
            log,
            fx,
        }
    }

    /// Invalidates every entry at or after `affected_at` and replays the tail.
    ///
    /// `removed_transaction` is the id of a transaction pending deletion; it
    /// may still be visible in storage and is excluded from the replay.
    /// The whole tail is computed before anything is deleted, so a failed
    /// rate lookup leaves the existing log untouched.
    pub fn rebuild(
        &self,
        account: &Account,
        affected_at: NaiveDateTime,
        removed_transaction: Option<&str>,
    ) -> Result<()> {
        self.rebuild_inner(account, affected_at, removed_transaction)
            .map_err(|e| {
                HistoryError::RebuildFailed {
                    account_id: account.id.clone(),
                    source: Box::new(e),
                }
                .into()
            })
    }

    fn rebuild_inner(
        &self,
        account: &Account,
        affected_at: NaiveDateTime,
        removed_transaction: Option<&str>,
    ) -> Result<()> {
        let base = self.log.latest_entry_before(&account.id, affected_at)?;
        let after = base.as_ref().map(|entry| entry.created_at);

        let mut replay = self
            .transactions
            .transactions_for_account_after(&account.id, after)?;
        replay.retain(|tx| {
            tx.affects_balance() && removed_transaction != Some(tx.id.as_str())
        });

        let netted = net_by_instant(replay.iter().map(|tx| (tx.executed_at, tx.signed_amount())));

        let replayed_total: Decimal = netted.iter().map(|entry| entry.net_effect).sum();
        let mut running = account.balance - replayed_total;

        let mut entries = Vec::with_capacity(netted.len());
        for row in &netted {
            let converted =
                self.fx
                    .convert(running, account.currency, Some(row.executed_at.date()))?;
            entries.push(AccountLogEntry {
                id: AccountLogEntry::entry_id(&account.id, row.executed_at),
                account_id: account.id.clone(),
                balance: running,
                converted_values: converted,
                created_at: row.executed_at,
            });
            running += row.net_effect;
        }

        let dropped = self.log.delete_entries_from(&account.id, affected_at)?;
        self.log.append_entries(&entries)?;

        debug!(
            "Rebuilt history for account {}: {} entries dropped, {} replayed",
            account.id,
            dropped,
            entries.len()
        );
        Ok(())
    }
}

/// Nets transactions sharing an exact execution instant into one replay row.
fn net_by_instant(
    effects: impl Iterator<Item = (NaiveDateTime, Decimal)>,
) -> Vec<ReplayEntry> {
    let mut by_instant: BTreeMap<NaiveDateTime, Decimal> = BTreeMap::new();
    for (executed_at, effect) in effects {
        *by_instant.entry(executed_at).or_insert(Decimal::ZERO) += effect;
    }
    by_instant
        .into_iter()
        .map(|(executed_at, net_effect)| ReplayEntry {
            executed_at,
            net_effect,
        })
        .collect()
}
