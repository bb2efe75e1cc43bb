//! Observer subscriptions
//!
//! The delivery mechanism is an explicit observer interface rather than a
//! reactive-streams framework: a [`Subscription`] is a cancel-on-drop handle
//! to one registered callback, and a [`SubscriptionSet`] owns the handles a
//! lifecycle phase holds open (cancelled together on pause).

use crate::store::StoreInner;
use smallvec::SmallVec;
use std::sync::{Mutex, Weak};

/// Handle to a registered theme observer; cancels on drop
pub struct Subscription {
    inner: Weak<Mutex<StoreInner>>,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(inner: Weak<Mutex<StoreInner>>, id: u64) -> Self {
        Self { inner, id }
    }

    /// Unregister the observer. Idempotent; also runs on drop.
    pub fn cancel(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().remove_subscriber(self.id);
        }
        self.inner = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Owns a group of subscriptions and cancels them together
#[derive(Default)]
pub struct SubscriptionSet {
    subs: SmallVec<[Subscription; 8]>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sub: Subscription) {
        self.subs.push(sub);
    }

    /// Cancel every held subscription (each handle cancels as it drops)
    pub fn cancel_all(&mut self) {
        self.subs.clear();
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}
