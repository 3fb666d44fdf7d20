use thiserror::Error;

use moneta_core::fx::FxError;

/// Errors raised while fetching rates from an upstream source.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<ProviderError> for moneta_core::Error {
    fn from(err: ProviderError) -> Self {
        // Every upstream failure is a hard rate outage for the engine;
        // the surrounding unit of work rolls back and may retry later.
        FxError::RateUnavailable(err.to_string()).into()
    }
}
