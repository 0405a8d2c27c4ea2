//! Product listing pages.

use crate::api::StorefrontApi;
use crate::region::Region;
use hbspa_commerce::catalog::{CatalogCache, Category, Product};
use hbspa_commerce::CategoryId;

pub const PRODUCTS_UNAVAILABLE: &str = "Error al cargar productos.";
pub const CATEGORIES_UNAVAILABLE: &str = "Error al cargar categorías.";

#[derive(Debug, Clone)]
pub struct CatalogPage {
    api: StorefrontApi,
    catalog: CatalogCache,
}

impl CatalogPage {
    pub fn new(api: StorefrontApi, catalog: CatalogCache) -> Self {
        Self { api, catalog }
    }

    /// Fetch the full listing and refresh the catalog snapshot from it.
    pub async fn load_products(&self) -> Region<Vec<Product>> {
        let result = self.api.products(None).await;
        if let Ok(products) = &result {
            let cached = self.catalog.rebuild(products);
            tracing::debug!(cached, "catalog snapshot rebuilt");
        }
        Region::load("products", result, PRODUCTS_UNAVAILABLE)
    }

    /// Fetch one category. The catalog snapshot is left alone.
    pub async fn load_category(&self, id: &CategoryId) -> Region<Vec<Product>> {
        Region::load(
            "category",
            self.api.products_by_category(id).await,
            PRODUCTS_UNAVAILABLE,
        )
    }

    pub async fn load_categories(&self) -> Region<Vec<Category>> {
        Region::load(
            "categories",
            self.api.categories().await,
            CATEGORIES_UNAVAILABLE,
        )
    }
}
