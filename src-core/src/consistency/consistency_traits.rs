use super::consistency_model::ConsistencyMode;
use crate::debts::Debt;
use crate::errors::Result;
use crate::transactions::Transaction;

/// Trait defining the contract the persistence layer calls into.
///
/// Each hook must be invoked exactly once per logical mutation, inside the
/// unit of work that will commit it, before the commit. Updates supply the
/// previous and new snapshots explicitly; the engine never reaches into an
/// ambient change-tracking table.
pub trait ConsistencyServiceTrait: Send + Sync {
    fn transaction_created(
        &self,
        transaction: &mut Transaction,
        mode: ConsistencyMode,
    ) -> Result<()>;

    fn transaction_updated(
        &self,
        previous: &Transaction,
        current: &mut Transaction,
        mode: ConsistencyMode,
    ) -> Result<()>;

    fn transaction_deleted(&self, transaction: &Transaction, mode: ConsistencyMode) -> Result<()>;

    fn debt_saved(&self, debt: &mut Debt, mode: ConsistencyMode) -> Result<()>;
}
