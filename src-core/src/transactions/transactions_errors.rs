use thiserror::Error;

/// Custom error type for transaction-related operations
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The previous snapshot handed to the diff does not describe the same
    /// transaction as the current one. Programmer error; never recovered
    /// from silently.
    #[error("Inconsistent change set: {0}")]
    InconsistentChangeSet(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
