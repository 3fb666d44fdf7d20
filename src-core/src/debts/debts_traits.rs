use super::debts_model::Debt;
use crate::errors::Result;

/// Trait defining the contract for Debt repository operations.
pub trait DebtRepositoryTrait: Send + Sync {
    fn get_debt(&self, debt_id: &str) -> Result<Debt>;
    fn save_debt(&self, debt: &Debt) -> Result<()>;
}
