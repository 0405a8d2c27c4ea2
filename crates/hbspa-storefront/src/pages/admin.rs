//! Admin product panel.

use crate::api::StorefrontApi;
use crate::error::StorefrontError;
use crate::region::{FormMessage, Region};
use crate::pages::catalog::{CATEGORIES_UNAVAILABLE, PRODUCTS_UNAVAILABLE};
use hbspa_auth::{CredentialStore, TokenClaims, TokenKind};
use hbspa_commerce::catalog::{Category, NewProduct, Product};
use hbspa_commerce::ProductId;

pub const ADMIN_CREATE_FAILED: &str = "❌ No autorizado o error al agregar producto.";
pub const ADMIN_DELETE_FAILED: &str = "No autorizado o error al eliminar producto.";
pub const ADMIN_CREATED: &str = "✅ Producto agregado exitosamente.";
pub const ADMIN_DELETED: &str = "Producto eliminado.";

/// Admin panel bound to the stored admin token.
///
/// Every operation checks the token first; a token that is unreadable or
/// lacks the admin role is removed and the caller gets an auth error.
#[derive(Debug, Clone)]
pub struct AdminPage {
    api: StorefrontApi,
    credentials: CredentialStore,
}

impl AdminPage {
    pub fn new(api: StorefrontApi, credentials: CredentialStore) -> Self {
        Self { api, credentials }
    }

    /// Check the stored admin token.
    pub fn guard(&self) -> Result<TokenClaims, StorefrontError> {
        Ok(self.credentials.require_admin()?)
    }

    fn token(&self) -> Result<String, StorefrontError> {
        self.guard()?;
        Ok(self.credentials.require(TokenKind::Admin)?)
    }

    pub async fn list_products(&self) -> Result<Region<Vec<Product>>, StorefrontError> {
        let token = self.token()?;
        Ok(Region::load(
            "admin-products",
            self.api.products(Some(&token)).await,
            PRODUCTS_UNAVAILABLE,
        ))
    }

    pub async fn list_categories(&self) -> Result<Region<Vec<Category>>, StorefrontError> {
        self.guard()?;
        Ok(Region::load(
            "admin-categories",
            self.api.categories().await,
            CATEGORIES_UNAVAILABLE,
        ))
    }

    /// Create a product. Validation and backend failures come back as an
    /// inline error message.
    pub async fn create_product(&self, product: &NewProduct) -> Result<FormMessage, StorefrontError> {
        let token = self.token()?;
        if let Err(e) = product.validate() {
            return Ok(FormMessage::error(format!("❌ {}", e)));
        }

        Ok(match self.api.create_product(&token, product).await {
            Ok(()) => FormMessage::success(ADMIN_CREATED),
            Err(e) => {
                tracing::warn!(error = %e, "create product failed");
                FormMessage::error(ADMIN_CREATE_FAILED)
            }
        })
    }

    pub async fn delete_product(&self, id: &ProductId) -> Result<FormMessage, StorefrontError> {
        let token = self.token()?;
        Ok(match self.api.delete_product(&token, id).await {
            Ok(()) => FormMessage::success(ADMIN_DELETED),
            Err(e) => {
                tracing::warn!(product = %id, error = %e, "delete product failed");
                FormMessage::error(ADMIN_DELETE_FAILED)
            }
        })
    }

    pub fn logout(&self) -> Result<(), StorefrontError> {
        Ok(self.credentials.logout_admin()?)
    }
}
