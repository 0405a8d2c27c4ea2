//! In-process "cart changed" broadcast.

use crate::cart::CartItems;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// A cart change announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartEvent {
    /// The authoritative new item mapping.
    Replaced { items: CartItems },
    /// A single additive change to one product.
    Delta {
        #[serde(rename = "productId")]
        product_id: ProductId,
        #[serde(default = "default_delta")]
        qty: i64,
    },
}

fn default_delta() -> i64 {
    1
}

/// Handle returned by [`NotificationChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&CartEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Publish/subscribe point for cart changes.
///
/// Clones share one subscriber list. Listeners run synchronously, in
/// subscription order, on the publishing thread. The list is snapshotted
/// before delivery, so a listener may publish again or (un)subscribe
/// without deadlocking; changes to the list apply from the next event.
#[derive(Clone, Default)]
pub struct NotificationChannel {
    registry: Arc<Mutex<Registry>>,
}

impl NotificationChannel {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        // A panicking listener never runs under this lock, so the data is
        // consistent even if the mutex reports poisoning.
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a listener for every future event.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        let before = registry.listeners.len();
        registry.listeners.retain(|(sid, _)| *sid != id);
        registry.listeners.len() < before
    }

    /// Deliver an event to every listener. Returns how many were called.
    pub fn publish(&self, event: &CartEvent) -> usize {
        let listeners: Vec<Listener> = self
            .registry()
            .listeners
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        tracing::debug!(subscribers = listeners.len(), ?event, "cart event");
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.registry().listeners.len()
    }
}

impl std::fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_every_subscriber_receives_event() {
        let channel = NotificationChannel::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            channel.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        let delivered = channel.publish(&CartEvent::Replaced {
            items: CartItems::new(),
        });
        assert_eq!(delivered, 3);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let channel = NotificationChannel::new();
        let id = channel.subscribe(|_| {});
        assert_eq!(channel.subscriber_count(), 1);
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_may_publish_reentrantly() {
        let channel = NotificationChannel::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let inner = channel.clone();
        let counter = Arc::clone(&seen);
        channel.subscribe(move |event| {
            counter.fetch_add(1, Ordering::SeqCst);
            if let CartEvent::Delta { .. } = event {
                inner.publish(&CartEvent::Replaced {
                    items: CartItems::new(),
                });
            }
        });

        channel.publish(&CartEvent::Delta {
            product_id: ProductId::new("7"),
            qty: 1,
        });
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_event_wire_shapes() {
        let replaced: CartEvent = serde_json::from_value(json!({"items": {"7": 2}})).unwrap();
        assert!(matches!(replaced, CartEvent::Replaced { ref items } if items.len() == 1));

        let delta: CartEvent = serde_json::from_value(json!({"productId": 7})).unwrap();
        assert_eq!(
            delta,
            CartEvent::Delta {
                product_id: ProductId::new("7"),
                qty: 1
            }
        );
    }
}
