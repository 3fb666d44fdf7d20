pub mod accounts_model;
pub mod accounts_traits;

pub use accounts_model::Account;
pub use accounts_traits::AccountRepositoryTrait;
