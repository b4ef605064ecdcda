use thiserror::Error;

/// Recoverable conditions of the chat core. Every variant degrades to a
/// user-facing payload message; none is fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no usable address in query")]
    AddressNotFound,

    #[error("no coordinates found for address: {0}")]
    GeocodeMiss(String),

    #[error("query has no searchable terms")]
    NoSearchableTerms,

    #[error("no prior recommendation in session history")]
    NoPriorRecommendation,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
