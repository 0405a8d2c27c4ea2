//! Authentication module for hbspa.
//!
//! Stores the bearer credentials the backend issues and reads the role
//! claims out of them. Tokens are never minted or verified here; the
//! backend remains the authority on signatures and expiry.

mod credentials;
mod error;
mod role;
mod token;

pub use credentials::{CredentialStore, TokenKind, PROFILE_KEYS};
pub use error::AuthError;
pub use role::Role;
pub use token::{decode_claims, TokenClaims};
