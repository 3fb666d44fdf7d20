use thiserror::Error;

use crate::fx::FxError;
use crate::history::HistoryError;
use crate::transactions::TransactionError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Currency operation failed: {0}")]
    Fx(#[from] FxError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Carrier for failures raised inside the caller's persistence layer.
    #[error("Storage error: {0}")]
    Storage(String),
}
