//! A live preview widget bound to a cart store.

use crate::config::PreviewConfig;
use crate::render::render_preview;
use crate::state::{transition, Effect, ItemAction, PreviewInput, PreviewState};
use crate::view::PreviewView;
use hbspa_commerce::cart::{Cart, CartEvent, CartStore, SubscriptionId};
use hbspa_commerce::catalog::CatalogCache;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Page-level scroll lock shared by every widget on a page.
///
/// Scroll stays locked while at least one holder has it.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(&self) {
        self.holders.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        let _ = self
            .holders
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub state: PreviewState,
    /// Set when the CTA was followed.
    pub navigate_to: Option<&'static str>,
}

#[derive(Debug)]
struct WidgetState {
    state: PreviewState,
    cart: Cart,
    holds_scroll: bool,
    html: String,
    renders: u64,
}

#[derive(Debug)]
struct Shared {
    store: CartStore,
    catalog: CatalogCache,
    config: PreviewConfig,
    scroll: ScrollLock,
    inner: Mutex<WidgetState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, WidgetState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn render(&self, inner: &mut WidgetState) {
        let view = PreviewView::build(inner.state, &inner.cart, &self.catalog.read(), &self.config);
        inner.html = render_preview(&view);
        inner.renders += 1;
    }

    fn on_cart_event(&self, event: &CartEvent) {
        let mut inner = self.lock();
        match event {
            CartEvent::Replaced { items } => inner.cart.items = items.clone(),
            CartEvent::Delta { .. } => inner.cart = self.store.read(),
        }
        let t = transition(inner.state, &PreviewInput::CartChanged);
        inner.state = t.next;
        if t.effects.contains(&Effect::Render) {
            self.render(&mut inner);
        }
    }
}

/// One preview widget instance.
///
/// The widget subscribes to the store's channel when mounted and
/// unsubscribes when dropped. Several widgets may watch the same store;
/// each re-renders on every announcement without changing its own state.
pub struct PreviewWidget {
    shared: Arc<Shared>,
    subscription: SubscriptionId,
}

impl PreviewWidget {
    /// Create a closed widget, render it and start listening for changes.
    pub fn mount(
        store: CartStore,
        catalog: CatalogCache,
        config: PreviewConfig,
        scroll: ScrollLock,
    ) -> Self {
        let cart = store.read();
        let shared = Arc::new(Shared {
            store,
            catalog,
            config,
            scroll,
            inner: Mutex::new(WidgetState {
                state: PreviewState::Closed,
                cart,
                holds_scroll: false,
                html: String::new(),
                renders: 0,
            }),
        });
        {
            let mut inner = shared.lock();
            shared.render(&mut inner);
        }

        let weak: Weak<Shared> = Arc::downgrade(&shared);
        let subscription = shared.store.channel().subscribe(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_cart_event(event);
            }
        });

        tracing::debug!(variant = shared.config.variant.as_str(), "preview widget mounted");
        Self {
            shared,
            subscription,
        }
    }

    /// Feed one input through the state machine and carry out its effects.
    ///
    /// Cart mutations run after the widget's own lock is released, so the
    /// store's announcement can re-render this widget synchronously.
    pub fn dispatch(&self, input: PreviewInput) -> DispatchOutcome {
        let mut mutation = None;
        let mut navigate_to = None;

        let state = {
            let mut inner = self.shared.lock();
            let t = transition(inner.state, &input);
            inner.state = t.next;

            for effect in t.effects {
                match effect {
                    Effect::LockScroll if !inner.holds_scroll => {
                        self.shared.scroll.acquire();
                        inner.holds_scroll = true;
                    }
                    Effect::UnlockScroll if inner.holds_scroll => {
                        self.shared.scroll.release();
                        inner.holds_scroll = false;
                    }
                    Effect::LockScroll | Effect::UnlockScroll => {}
                    Effect::Refresh => inner.cart = self.shared.store.read(),
                    Effect::Render => self.shared.render(&mut inner),
                    Effect::Mutate { product_id, action } => mutation = Some((product_id, action)),
                    Effect::Navigate => navigate_to = Some(self.shared.config.cart_url()),
                }
            }
            inner.state
        };

        if let Some((product_id, action)) = mutation {
            match action {
                ItemAction::Inc => self.shared.store.increment(&product_id, 1),
                ItemAction::Dec => self.shared.store.decrement(&product_id),
                ItemAction::Remove => self.shared.store.remove(&product_id),
            };
        }

        DispatchOutcome { state, navigate_to }
    }

    pub fn state(&self) -> PreviewState {
        self.shared.lock().state
    }

    /// The most recent render.
    pub fn html(&self) -> String {
        self.shared.lock().html.clone()
    }

    /// View model for the current state, freshly built.
    pub fn view(&self) -> PreviewView {
        let inner = self.shared.lock();
        PreviewView::build(
            inner.state,
            &inner.cart,
            &self.shared.catalog.read(),
            &self.shared.config,
        )
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> u64 {
        self.shared.lock().renders
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.shared.scroll
    }
}

impl Drop for PreviewWidget {
    fn drop(&mut self) {
        self.shared.store.channel().unsubscribe(self.subscription);
        let mut inner = self.shared.lock();
        if inner.holds_scroll {
            self.shared.scroll.release();
            inner.holds_scroll = false;
        }
    }
}

impl std::fmt::Debug for PreviewWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewWidget")
            .field("state", &self.state())
            .field("variant", &self.shared.config.variant)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Activation, Key};
    use hbspa_cache::{Cache, MemoryStore};
    use hbspa_commerce::cart::NotificationChannel;
    use hbspa_commerce::ProductId;

    fn setup() -> (CartStore, CatalogCache) {
        let cache = Cache::new(MemoryStore::new());
        (
            CartStore::new(cache.clone(), NotificationChannel::new()),
            CatalogCache::new(cache),
        )
    }

    #[test]
    fn test_mount_renders_closed() {
        let (store, catalog) = setup();
        let widget = PreviewWidget::mount(store, catalog, PreviewConfig::default(), ScrollLock::new());
        assert_eq!(widget.state(), PreviewState::Closed);
        assert_eq!(widget.render_count(), 1);
        assert!(widget.html().contains(r#"data-state="closed""#));
    }

    #[test]
    fn test_open_close_locks_scroll() {
        let (store, catalog) = setup();
        let scroll = ScrollLock::new();
        let widget = PreviewWidget::mount(store, catalog, PreviewConfig::default(), scroll.clone());

        widget.dispatch(PreviewInput::Activate(Activation::Pointer));
        assert!(scroll.is_locked());

        widget.dispatch(PreviewInput::Key {
            key: Key::Escape,
            trigger_focused: false,
        });
        assert!(!scroll.is_locked());
        assert_eq!(widget.state(), PreviewState::Closed);
    }

    #[test]
    fn test_item_controls_update_store_and_view() {
        let (store, catalog) = setup();
        store.increment(&ProductId::new("7"), 1);
        let widget =
            PreviewWidget::mount(store.clone(), catalog, PreviewConfig::default(), ScrollLock::new());

        widget.dispatch(PreviewInput::Activate(Activation::Touch));
        widget.dispatch(PreviewInput::Item {
            product_id: ProductId::new("7"),
            action: ItemAction::Inc,
        });

        assert_eq!(store.read().quantity(&ProductId::new("7")), 2);
        assert_eq!(widget.view().count, 2);
        assert_eq!(widget.state(), PreviewState::Open);

        widget.dispatch(PreviewInput::Item {
            product_id: ProductId::new("7"),
            action: ItemAction::Remove,
        });
        assert!(widget.view().is_empty());
    }

    #[test]
    fn test_follow_cta() {
        let (store, catalog) = setup();
        let config = PreviewConfig {
            page_path: "/pages/servicios.html".to_string(),
            ..PreviewConfig::default()
        };
        let widget = PreviewWidget::mount(store, catalog, config, ScrollLock::new());
        widget.dispatch(PreviewInput::Activate(Activation::Pointer));

        let outcome = widget.dispatch(PreviewInput::FollowCta);
        assert_eq!(outcome.state, PreviewState::Closed);
        assert_eq!(outcome.navigate_to, Some("ShoppingCart.html"));
        assert!(!widget.scroll_lock().is_locked());
    }

    #[test]
    fn test_drop_unsubscribes_and_releases_scroll() {
        let (store, catalog) = setup();
        let scroll = ScrollLock::new();
        let widget =
            PreviewWidget::mount(store.clone(), catalog, PreviewConfig::default(), scroll.clone());
        widget.dispatch(PreviewInput::Activate(Activation::Pointer));
        assert_eq!(store.channel().subscriber_count(), 1);

        drop(widget);
        assert_eq!(store.channel().subscriber_count(), 0);
        assert!(!scroll.is_locked());
    }
}
