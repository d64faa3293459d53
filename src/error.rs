use thiserror::Error;

/// Terminal failures for one search attempt. None of these are retried
/// inside the engine; the caller decides whether to resubmit.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Criteria rejected before any listing source was contacted
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// The amortization formula requires a rate strictly above zero
    #[error("annual interest rate must be greater than zero")]
    InvalidRate,

    /// The listing source failed; no partial results are kept
    #[error("listing source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

/// Failures raised by a listing source adapter.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Malformed(String),
}
