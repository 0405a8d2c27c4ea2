//! Cart preview widget for the hbspa storefront.
//!
//! One configurable component replaces the separate bubble, bar and header
//! badge previews. The widget is driven by a single [`PreviewWidget::dispatch`]
//! entry point feeding a pure state machine ([`state::transition`]), and
//! renders to HTML from a [`PreviewView`] view model.
//!
//! # Example
//!
//! ```rust
//! use hbspa_cache::{Cache, MemoryStore};
//! use hbspa_commerce::cart::{CartStore, NotificationChannel};
//! use hbspa_commerce::catalog::CatalogCache;
//! use hbspa_commerce::ProductId;
//! use hbspa_preview::{Activation, PreviewConfig, PreviewInput, PreviewWidget, ScrollLock};
//!
//! let cache = Cache::new(MemoryStore::new());
//! let store = CartStore::new(cache.clone(), NotificationChannel::new());
//! let widget = PreviewWidget::mount(
//!     store.clone(),
//!     CatalogCache::new(cache),
//!     PreviewConfig::default(),
//!     ScrollLock::new(),
//! );
//!
//! store.increment(&ProductId::new("7"), 1);
//! widget.dispatch(PreviewInput::Activate(Activation::Pointer));
//! assert!(widget.html().contains("Producto #7"));
//! ```

pub mod config;
pub mod render;
pub mod state;
pub mod view;
mod widget;

pub use config::{resolve_cart_url, PreviewConfig, PreviewError, PreviewVariant, DEFAULT_ITEM_LIMIT};
pub use render::{render_popover, render_preview, render_trigger};
pub use state::{transition, Activation, Effect, ItemAction, Key, PreviewInput, PreviewState};
pub use view::{PreviewLine, PreviewView};
pub use widget::{DispatchOutcome, PreviewWidget, ScrollLock};
