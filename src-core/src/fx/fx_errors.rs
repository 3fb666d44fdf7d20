use thiserror::Error;

/// Custom error type for currency conversion operations
#[derive(Debug, Error)]
pub enum FxError {
    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Exchange rates unavailable: {0}")]
    RateUnavailable(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Rate cache error: {0}")]
    CacheError(String),
}
