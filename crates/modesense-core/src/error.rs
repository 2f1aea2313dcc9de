//! Error types for modesense.

use thiserror::Error;

/// Crate-wide error type.
///
/// Detection and resolution never fail at runtime. Errors only surface while
/// building configuration, so that a bad threshold or preference ordering is
/// caught once at startup instead of on every event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid tracker or monitor configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid device preference ordering or token name
    #[error("Invalid device preference: {0}")]
    InvalidPreference(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
