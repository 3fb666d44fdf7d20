pub mod debts_model;
pub mod debts_traits;

pub use debts_model::Debt;
pub use debts_traits::DebtRepositoryTrait;
