//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// No formatting rules for the requested locale.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] hbspa_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation error, carrying the message shown to the shopper.
    #[error("{0}")]
    Validation(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
