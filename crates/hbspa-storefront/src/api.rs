//! Typed client for the storefront backend.

use hbspa_commerce::account::{OrderSummary, UserProfile};
use hbspa_commerce::booking::{Reservation, ReservationRequest, SpaService};
use hbspa_commerce::catalog::{Category, NewProduct, Product};
use hbspa_commerce::{CategoryId, ProductId};
use hbspa_data::{FetchClient, FetchError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default backend base URL.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest<'a> {
    pub product_id: &'a ProductId,
    pub quantity: u32,
}

/// One method per backend endpoint the storefront uses.
///
/// Every non-2xx reply becomes [`FetchError::HttpError`].
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: FetchClient,
}

impl StorefrontApi {
    /// Wrap a client whose base URL points at the backend's `/api` root.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, FetchError> {
        self.client
            .get(path)
            .maybe_bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    /// `GET /products`, optionally authenticated.
    pub async fn products(&self, token: Option<&str>) -> Result<Vec<Product>, FetchError> {
        self.get_json("/products", token).await
    }

    /// `GET /products/category/{id}`.
    pub async fn products_by_category(&self, id: &CategoryId) -> Result<Vec<Product>, FetchError> {
        self.get_json(&format!("/products/category/{}", id), None).await
    }

    /// `GET /categories`.
    pub async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_json("/categories", None).await
    }

    /// `POST /products`. The reply body is not needed.
    pub async fn create_product(&self, token: &str, product: &NewProduct) -> Result<(), FetchError> {
        self.client
            .post("/products")
            .bearer_auth(token)
            .json(product)?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `DELETE /products/{id}`.
    pub async fn delete_product(&self, token: &str, id: &ProductId) -> Result<(), FetchError> {
        self.client
            .delete(format!("/products/{}", id))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `POST /cart/add` with `{productId, quantity}`.
    pub async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<(), FetchError> {
        self.client
            .post("/cart/add")
            .json(&AddToCartRequest {
                product_id,
                quantity,
            })?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `GET /spa-services`.
    pub async fn spa_services(&self) -> Result<Vec<SpaService>, FetchError> {
        self.get_json("/spa-services", None).await
    }

    /// `POST /reservas`.
    pub async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, FetchError> {
        self.client
            .post("/reservas")
            .json(request)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    /// `GET /reservas/mias`.
    pub async fn my_reservations(&self, token: &str) -> Result<Vec<Reservation>, FetchError> {
        self.get_json("/reservas/mias", Some(token)).await
    }

    /// `GET /orders/mine`.
    pub async fn my_orders(&self, token: &str) -> Result<Vec<OrderSummary>, FetchError> {
        self.get_json("/orders/mine", Some(token)).await
    }

    /// `GET /usuarios/me`.
    pub async fn me(&self, token: &str) -> Result<UserProfile, FetchError> {
        self.get_json("/usuarios/me", Some(token)).await
    }
}
