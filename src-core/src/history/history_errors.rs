use thiserror::Error;

/// Custom error type for history-rebuild operations
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Any step of a rebuild failed. The existing log entries for the
    /// account are left untouched; the caller's unit of work rolls back
    /// whatever else was written.
    #[error("History rebuild failed for account {account_id}: {source}")]
    RebuildFailed {
        account_id: String,
        #[source]
        source: Box<crate::errors::Error>,
    },
}
