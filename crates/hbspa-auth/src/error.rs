//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No credential stored for the requested kind.
    #[error("not signed in")]
    MissingToken,

    /// Token is not a readable JWT.
    #[error("token invalid: {0}")]
    InvalidToken(String),

    /// Token is readable but lacks the required role.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] hbspa_cache::CacheError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::MissingToken | AuthError::InvalidToken(_))
    }

    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::InsufficientPermissions)
    }
}
