//! Error types for the IOU core
//!
//! Contract verification has exactly one outcome kind besides acceptance:
//! a [`Rejection`] carrying a human-readable reason. Everything else in
//! [`Error`] belongs to the adapter layer (decoding proposals, building
//! amounts and keys) and never comes out of the verifier itself.

use thiserror::Error;

/// A proposal failed one of the contract's rules.
///
/// The reason is the literal message of the first failing constraint.
/// Callers surface it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// IOU core error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The transaction was rejected by the contract
    #[error("Rejected: {0}")]
    Rejected(#[from] Rejection),

    /// Malformed proposal document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Currency code is not three upper-case ASCII letters
    #[error("Invalid currency code '{0}'")]
    InvalidCurrency(String),

    /// Public key or hash is not 32 bytes of hex
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Arithmetic across two different currencies
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// Amount arithmetic left the i64 range
    #[error("Arithmetic overflow")]
    Overflow,

    /// Failure while encoding a value
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for IOU operations
pub type Result<T> = std::result::Result<T, Error>;
