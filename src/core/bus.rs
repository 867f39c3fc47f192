//! # Event Bus
//!
//! In-process publish/subscribe channel that lets the category screen announce selections
//! without knowing who listens.
//!
//! The bus is keyed by message type: an `EventBus<CategorySelected>` only ever carries
//! category selections. It is a cheap `Clone` handle over shared state, so one instance is
//! created at start-up and injected into every component that needs it.
//!
//! ```text
//!  CategoriesPresenter ──publish──▶ EventBus<T> ──▶ Subscription (listings)
//!                                              └──▶ Subscription (…)
//! ```
//!
//! Each subscriber gets its own unbounded queue, so delivery never drops or reorders
//! messages and a slow subscriber cannot stall the publisher. Subscribers only see messages
//! published after they subscribed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::debug;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::category::Category;

/// Published whenever the user picks a category, including on back navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelected(pub Category);

struct Subscribers<T> {
    next_id: u64,
    senders: Vec<(u64, UnboundedSender<T>)>,
}

type Shared<T> = Arc<Mutex<Subscribers<T>>>;

fn lock<T>(shared: &Mutex<Subscribers<T>>) -> MutexGuard<'_, Subscribers<T>> {
    // The guarded data is a plain list; a panic mid-update cannot leave it inconsistent.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct EventBus<T> {
    shared: Shared<T>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> EventBus<T> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Subscribers {
                next_id: 0,
                senders: Vec::new(),
            })),
        }
    }

    /// Registers a new subscriber. It receives every message published from now on.
    pub fn subscribe(&self) -> Subscription<T> {
        let (sender, receiver) = unbounded_channel();
        let mut subscribers = lock(&self.shared);
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.senders.push((id, sender));
        debug!("Bus subscriber {} added ({} live)", id, subscribers.senders.len());

        Subscription {
            guard: SubscriptionGuard {
                id,
                shared: Arc::downgrade(&self.shared),
            },
            receiver,
        }
    }

    /// Delivers `message` to every live subscriber and returns how many received it.
    ///
    /// Fire-and-forget: publishing with no subscribers is not an error. Subscribers whose
    /// receiving end has gone away are pruned here.
    pub fn publish(&self, message: T) -> usize {
        let mut subscribers = lock(&self.shared);
        subscribers
            .senders
            .retain(|(_, sender)| sender.send(message.clone()).is_ok());
        subscribers.senders.len()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared).senders.len()
    }
}

/// A live subscription: the receiving queue plus the guard that keeps it registered.
///
/// Dropping the subscription (or just its guard) unregisters it.
pub struct Subscription<T> {
    guard: SubscriptionGuard<T>,
    receiver: UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Waits for the next message. `None` once unsubscribed and drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// Splits the subscription so the receiver can move into a task while the guard stays
    /// with the owner that decides when to unsubscribe.
    pub fn into_parts(self) -> (SubscriptionGuard<T>, UnboundedReceiver<T>) {
        (self.guard, self.receiver)
    }
}

/// Registration handle for one subscriber. Unsubscribes on drop.
pub struct SubscriptionGuard<T> {
    id: u64,
    shared: Weak<Mutex<Subscribers<T>>>,
}

impl<T> SubscriptionGuard<T> {
    /// Removes this subscriber from the bus. Safe to call any number of times.
    pub fn unsubscribe(&mut self) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut subscribers = lock(&shared);
        let before = subscribers.senders.len();
        subscribers.senders.retain(|(id, _)| *id != self.id);
        if subscribers.senders.len() != before {
            debug!("Bus subscriber {} removed ({} live)", self.id, subscribers.senders.len());
        }
        drop(subscribers);
        self.shared = Weak::new();
    }
}

impl<T> Drop for SubscriptionGuard<T> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
