//! Bearer credential storage.

use crate::{decode_claims, AuthError, TokenClaims};
use hbspa_cache::Cache;

/// Keys cleared when a shopper signs out.
pub const PROFILE_KEYS: [&str; 4] = ["token", "username", "role", "userId"];

/// Which credential a page needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Admin panel credential.
    Admin,
    /// Shopper profile credential.
    Shopper,
}

impl TokenKind {
    /// Storage key the credential lives under.
    pub fn storage_key(&self) -> &'static str {
        match self {
            TokenKind::Admin => "hbspa_token",
            TokenKind::Shopper => "token",
        }
    }
}

/// Reads and writes the raw tokens in local storage.
///
/// Tokens are stored as plain strings, not JSON.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    cache: Cache,
}

impl CredentialStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// The stored token, if any. Blank values count as absent.
    pub fn get(&self, kind: TokenKind) -> Result<Option<String>, AuthError> {
        Ok(self
            .cache
            .get_raw(kind.storage_key())?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    pub fn set(&self, kind: TokenKind, token: &str) -> Result<(), AuthError> {
        self.cache.set_raw(kind.storage_key(), token.trim())?;
        Ok(())
    }

    pub fn clear(&self, kind: TokenKind) -> Result<(), AuthError> {
        self.cache.delete(kind.storage_key())?;
        Ok(())
    }

    /// The stored token, or [`AuthError::MissingToken`].
    pub fn require(&self, kind: TokenKind) -> Result<String, AuthError> {
        self.get(kind)?.ok_or(AuthError::MissingToken)
    }

    /// Check that the admin token carries an admin role.
    ///
    /// An unreadable or non-admin token is removed from storage.
    pub fn require_admin(&self) -> Result<TokenClaims, AuthError> {
        let token = self.require(TokenKind::Admin)?;
        let outcome = decode_claims(&token).and_then(|claims| {
            if claims.is_admin() {
                Ok(claims)
            } else {
                Err(AuthError::InsufficientPermissions)
            }
        });

        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "rejecting stored admin token");
            if let Err(clear_err) = self.clear(TokenKind::Admin) {
                tracing::warn!(error = %clear_err, "failed to remove admin token");
            }
        }
        outcome
    }

    /// Store a shopper token along with the username and role it names.
    ///
    /// A token whose claims cannot be read is still stored; the backend
    /// decides whether it is any good.
    pub fn login_shopper(&self, token: &str) -> Result<Option<TokenClaims>, AuthError> {
        self.set(TokenKind::Shopper, token)?;
        let claims = match decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "shopper token has no readable claims");
                return Ok(None);
            }
        };

        if let Some(sub) = &claims.sub {
            self.cache.set_raw("username", sub)?;
        }
        if let Some(role) = claims.roles().first() {
            self.cache.set_raw("role", role.as_str())?;
        }
        Ok(Some(claims))
    }

    /// Remember who is signed in, as the profile page does after loading.
    pub fn remember_user_id(&self, user_id: &str) -> Result<(), AuthError> {
        self.cache.set_raw("userId", user_id)?;
        Ok(())
    }

    /// Sign the shopper out, removing every profile key.
    pub fn logout_shopper(&self) -> Result<(), AuthError> {
        for key in PROFILE_KEYS {
            self.cache.delete(key)?;
        }
        Ok(())
    }

    /// Sign the admin out.
    pub fn logout_admin(&self) -> Result<(), AuthError> {
        self.clear(TokenKind::Admin)
    }
}
