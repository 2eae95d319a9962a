//! Per-topic subscription table
//!
//! A `TopicSubscriptions` holds the callbacks registered under one topic,
//! keyed by `SubscriptionId`. Entries are kept in a `BTreeMap` so iteration
//! always yields ascending ids, which is also registration order.
//!
//! Concurrency note: callers must not hold a borrow of the table across a
//! callback invocation; `Subject::notify` works from a snapshot instead.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A callback invoked with a read-only view of the notification payload.
pub type Callback<V> = Rc<dyn Fn(&V)>;

/// Opaque handle identifying one (topic, callback) registration.
///
/// Ids are handed out by a single `Subject` in strictly increasing order and
/// are never reused by that `Subject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubscriptionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct TopicSubscriptions<V> {
    callbacks: BTreeMap<SubscriptionId, Callback<V>>,
}

impl<V> TopicSubscriptions<V> {
    /// Create an empty subscription set.
    pub fn new() -> Self {
        Self {
            callbacks: BTreeMap::new(),
        }
    }

    /// Register a callback under `id`.
    pub fn subscribe(&mut self, id: SubscriptionId, callback: Callback<V>) {
        self.callbacks.insert(id, callback);
    }

    /// Remove the callback registered under `id`, handing it back so the
    /// caller can drop it outside of any table borrow.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Option<Callback<V>> {
        self.callbacks.remove(&id)
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.callbacks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Clone out the callbacks in ascending id order.
    pub fn snapshot(&self) -> Vec<Callback<V>> {
        self.callbacks.values().cloned().collect()
    }
}

impl<V> Default for TopicSubscriptions<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for TopicSubscriptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicSubscriptions")
            .field("ids", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}
