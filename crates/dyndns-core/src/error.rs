//! Error types for the zone synchronizer.
//!
//! Every fatal condition aborts the whole run. Nothing is retried here:
//! retry cadence belongs to the external scheduler re-invoking the program.

use thiserror::Error;

use crate::traits::IpFamily;

/// Result type alias for synchronizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the zone synchronizer
#[derive(Error, Debug)]
pub enum Error {
    /// Address oracle errors (lookup failed or response unparseable)
    #[error("address oracle error: {0}")]
    Oracle(String),

    /// An enabled record family has no observed address.
    ///
    /// The run cannot safely proceed without an authoritative current value,
    /// so this is fatal rather than a silent skip.
    #[error("no {family} address observed for an enabled record family")]
    AddressUnavailable {
        /// The family that was enabled but unobserved
        family: IpFamily,
    },

    /// Remote zone API errors (list, delete, or create)
    #[error("zone API error: {0}")]
    ZoneApi(String),

    /// State store errors
    #[error("state store error: {0}")]
    StateStore(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication errors
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Zone or record not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Network-related errors
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an address oracle error
    pub fn oracle(msg: impl Into<String>) -> Self {
        Self::Oracle(msg.into())
    }

    /// Create a zone API error
    pub fn zone_api(msg: impl Into<String>) -> Self {
        Self::ZoneApi(msg.into())
    }

    /// Create a state store error
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
