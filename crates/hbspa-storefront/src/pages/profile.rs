//! Signed-in shopper profile.

use crate::api::StorefrontApi;
use crate::error::StorefrontError;
use crate::region::Region;
use hbspa_auth::{CredentialStore, TokenKind};
use hbspa_commerce::account::{OrderSummary, UserProfile};
use hbspa_commerce::booking::Reservation;
use serde::Serialize;

pub const SESSION_EXPIRED: &str = "Tu sesión expiró o no es válida. Inicia sesión nuevamente.";
pub const RESERVATIONS_UNAVAILABLE: &str = "Error al cargar reservas.";
pub const ORDERS_UNAVAILABLE: &str = "Error al cargar compras.";

/// The three profile regions. Each loads independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub user: Region<UserProfile>,
    pub reservations: Region<Vec<Reservation>>,
    pub orders: Region<Vec<OrderSummary>>,
}

impl ProfileView {
    /// The user region failed; the shopper should sign in again.
    pub fn session_expired(&self) -> bool {
        self.user.is_failed()
    }
}

#[derive(Debug, Clone)]
pub struct ProfilePage {
    api: StorefrontApi,
    credentials: CredentialStore,
}

impl ProfilePage {
    pub fn new(api: StorefrontApi, credentials: CredentialStore) -> Self {
        Self { api, credentials }
    }

    /// Load every region with the shopper token.
    pub async fn load(&self) -> Result<ProfileView, StorefrontError> {
        let token = self.credentials.require(TokenKind::Shopper)?;

        let (user, reservations, orders) = tokio::join!(
            self.api.me(&token),
            self.api.my_reservations(&token),
            self.api.my_orders(&token),
        );

        if let Ok(profile) = &user {
            if let Err(e) = self.credentials.remember_user_id(profile.id.as_str()) {
                tracing::warn!(error = %e, "failed to remember user id");
            }
        }

        Ok(ProfileView {
            user: Region::load("profile", user, SESSION_EXPIRED),
            reservations: Region::load("reservations", reservations, RESERVATIONS_UNAVAILABLE),
            orders: Region::load("orders", orders, ORDERS_UNAVAILABLE),
        })
    }

    pub fn logout(&self) -> Result<(), StorefrontError> {
        Ok(self.credentials.logout_shopper()?)
    }
}
