//! JWT payload decoding.
//!
//! Only the claims segment is read. The signature is not checked: the
//! result gates which pages the client shows, while the backend enforces
//! the real authorization on every request.

use crate::{AuthError, Role};
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

/// Claims the storefront looks at.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenClaims {
    /// Subject, usually the username or email.
    #[serde(default)]
    pub sub: Option<String>,
    /// Single role claim.
    #[serde(default)]
    pub role: Option<Value>,
    /// Spring-style authorities claim.
    #[serde(default)]
    pub authorities: Option<Value>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Roles named by the token.
    ///
    /// `role` wins when present; otherwise `authorities` is used. Either may
    /// be a string, an array of strings, or an array of `{authority}` objects.
    pub fn roles(&self) -> Vec<Role> {
        let source = match &self.role {
            Some(v) if !v.is_null() => Some(v),
            _ => self.authorities.as_ref(),
        };
        let mut names = Vec::new();
        if let Some(value) = source {
            collect_role_names(value, &mut names);
        }
        names.iter().filter_map(|n| n.parse().ok()).collect()
    }

    pub fn is_admin(&self) -> bool {
        self.roles().iter().any(Role::is_admin)
    }
}

fn collect_role_names(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|v| collect_role_names(v, out)),
        Value::Object(map) => {
            if let Some(Value::String(s)) = map.get("authority") {
                out.push(s.clone());
            }
        }
        _ => {}
    }
}

/// Decode the claims segment of a JWT.
///
/// Accepts URL-safe or standard alphabets, with or without padding.
pub fn decode_claims(token: &str) -> Result<TokenClaims, AuthError> {
    let payload = token
        .trim()
        .split('.')
        .nth(1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("expected three dot-separated segments".into()))?;

    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
pub(crate) fn make_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{body}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_claim() {
        let claims = decode_claims(&make_token(&json!({"sub": "ana", "role": "ADMIN"}))).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("ana"));
        assert!(claims.is_admin());
    }

    #[test]
    fn test_authorities_claim_forms() {
        let string = decode_claims(&make_token(&json!({"authorities": "ROLE_ADMIN"}))).unwrap();
        assert!(string.is_admin());

        let list = decode_claims(&make_token(&json!({"authorities": ["ROLE_USER", "ROLE_ADMIN"]})))
            .unwrap();
        assert!(list.is_admin());

        let objects =
            decode_claims(&make_token(&json!({"authorities": [{"authority": "ROLE_ADMIN"}]})))
                .unwrap();
        assert!(objects.is_admin());
    }

    #[test]
    fn test_non_admin() {
        let claims = decode_claims(&make_token(&json!({"role": "USER"}))).unwrap();
        assert!(!claims.is_admin());
        assert_eq!(claims.roles(), vec![Role::User]);

        let none = decode_claims(&make_token(&json!({"sub": "x"}))).unwrap();
        assert!(none.roles().is_empty());
    }

    #[test]
    fn test_padded_payload() {
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"role":"ADMIN"}"#);
        let claims = decode_claims(&format!("h.{body}.s")).unwrap();
        assert!(claims.is_admin());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(decode_claims("garbage"), Err(AuthError::InvalidToken(_))));
        assert!(decode_claims("a.!!!.c").is_err());
        assert!(decode_claims(&format!("a.{}.c", URL_SAFE_NO_PAD.encode("not json"))).is_err());
    }
}
