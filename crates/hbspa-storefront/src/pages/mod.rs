//! Page controllers, one per storefront page.

pub mod admin;
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod profile;

pub use admin::{AdminPage, ADMIN_CREATE_FAILED, ADMIN_DELETE_FAILED};
pub use booking::{BookingOutcome, BookingPage};
pub use cart::{AddToCartOutcome, CartPage};
pub use catalog::CatalogPage;
pub use contact::ContactPage;
pub use profile::{ProfilePage, ProfileView};
