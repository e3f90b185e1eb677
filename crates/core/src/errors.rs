use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("malformed margin value {raw:?}: expected a percent string such as \"12.5%\"")]
    MalformedMargin { raw: String },
    #[error("negative revenue value {raw}")]
    NegativeRevenue { raw: String },
    #[error("score weight must be a finite non-negative number, got {value}")]
    InvalidWeight { value: f64 },
    #[error("score weights must sum to 1.0, got {sum}")]
    UnbalancedWeights { sum: f64 },
}
