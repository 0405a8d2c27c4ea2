//! Storefront error types.

use thiserror::Error;

/// Errors surfaced by storefront pages.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Backend request failed.
    #[error(transparent)]
    Fetch(#[from] hbspa_data::FetchError),

    /// Missing or unacceptable credentials.
    #[error(transparent)]
    Auth(#[from] hbspa_auth::AuthError),

    /// Domain validation or storage problem.
    #[error(transparent)]
    Commerce(#[from] hbspa_commerce::CommerceError),

    /// Local storage error.
    #[error(transparent)]
    Storage(#[from] hbspa_cache::CacheError),
}

impl StorefrontError {
    /// Whether the user has to sign in (again) to continue.
    pub fn needs_login(&self) -> bool {
        match self {
            StorefrontError::Auth(e) => e.is_auth_failure() || e.is_permission_error(),
            StorefrontError::Fetch(e) => e.is_unauthorized(),
            _ => false,
        }
    }

    /// Short message for the shopper.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Auth(hbspa_auth::AuthError::InsufficientPermissions) => {
                "⚠️ Acceso denegado: no tienes permisos de administrador.".to_string()
            }
            StorefrontError::Auth(_) => "Inicia sesión para continuar.".to_string(),
            other => other.to_string(),
        }
    }
}
