//! Wiring for a storefront session.

use crate::api::StorefrontApi;
use crate::pages::{AdminPage, BookingPage, CartPage, CatalogPage, ContactPage, ProfilePage};
use hbspa_auth::CredentialStore;
use hbspa_cache::Cache;
use hbspa_commerce::cart::{CartStore, NotificationChannel};
use hbspa_commerce::catalog::CatalogCache;
use hbspa_data::FetchClient;

/// One browsing session: a storage area, a backend client and the shared
/// cart store every page and widget works against.
#[derive(Debug, Clone)]
pub struct Storefront {
    cache: Cache,
    api: StorefrontApi,
    cart: CartStore,
    catalog: CatalogCache,
    credentials: CredentialStore,
}

impl Storefront {
    pub fn new(cache: Cache, client: FetchClient) -> Self {
        Self {
            api: StorefrontApi::new(client),
            cart: CartStore::new(cache.clone(), NotificationChannel::new()),
            catalog: CatalogCache::new(cache.clone()),
            credentials: CredentialStore::new(cache.clone()),
            cache,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn api(&self) -> &StorefrontApi {
        &self.api
    }

    pub fn cart_store(&self) -> &CartStore {
        &self.cart
    }

    pub fn catalog_cache(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn catalog(&self) -> CatalogPage {
        CatalogPage::new(self.api.clone(), self.catalog.clone())
    }

    pub fn cart(&self) -> CartPage {
        CartPage::new(self.api.clone(), self.cart.clone())
    }

    pub fn admin(&self) -> AdminPage {
        AdminPage::new(self.api.clone(), self.credentials.clone())
    }

    pub fn booking(&self) -> BookingPage {
        BookingPage::new(self.api.clone())
    }

    pub fn profile(&self) -> ProfilePage {
        ProfilePage::new(self.api.clone(), self.credentials.clone())
    }

    pub fn contact(&self) -> ContactPage {
        ContactPage
    }
}
