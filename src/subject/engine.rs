//! Subject engine
//!
//! This module contains the in-process dispatch table responsible for:
//! - handing out unique, strictly increasing subscription ids
//! - mapping topics to the callbacks registered under them
//! - synchronously notifying every callback of a topic
//!
//! Concurrency and usage notes:
//! - The API takes `&self` and keeps its state behind `RefCell`/`Cell`, so a
//!   `Subject` is shared between subscribers through an `Rc`. It is not
//!   `Send`; cross-thread use needs an external lock around the owner.
//! - `notify` never holds the table borrow while a callback runs. Callbacks may
//!   subscribe, unsubscribe or notify on the same subject; structural changes
//!   take effect immediately but only the snapshot taken at the start of the
//!   dispatch is invoked.

use std::borrow::Borrow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use tracing::debug;

use crate::config::SubjectSettings;
use crate::subject::topic::{Callback, SubscriptionId, TopicSubscriptions};

/// Outcome of a `Subject::notify` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The topic is known; this many callbacks were invoked (possibly zero).
    Dispatched(usize),
    /// No entry exists for the topic; nothing was invoked.
    TopicNotFound,
}

impl DispatchResult {
    pub fn is_found(self) -> bool {
        matches!(self, DispatchResult::Dispatched(_))
    }

    /// Number of callbacks invoked, zero when the topic was not found.
    pub fn dispatched(self) -> usize {
        match self {
            DispatchResult::Dispatched(n) => n,
            DispatchResult::TopicNotFound => 0,
        }
    }
}

/// Central dispatch table for one independent set of topics.
///
/// `T` is the topic key and `V` the payload handed to callbacks by reference.
pub struct Subject<T, V> {
    topics: RefCell<HashMap<T, TopicSubscriptions<V>>>,
    next_id: Cell<u64>,
    settings: SubjectSettings,
}

/// The common specialization keyed by text topics.
pub type StringSubject<V> = Subject<String, V>;

impl<T, V> Default for Subject<T, V>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> Subject<T, V>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_settings(SubjectSettings::default())
    }

    pub fn with_settings(settings: SubjectSettings) -> Self {
        Self {
            topics: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
            settings,
        }
    }

    /// Wrap this subject in the shared handle `Subscriber`s bind to.
    pub fn into_shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Shorthand for `Subject::new().into_shared()`.
    pub fn shared() -> Rc<Self> {
        Self::new().into_shared()
    }

    pub fn settings(&self) -> &SubjectSettings {
        &self.settings
    }

    /// Registers `callback` under `topic`, creating the topic if needed.
    ///
    /// Always succeeds and returns the next unused id.
    pub fn subscribe<F>(&self, topic: impl Into<T>, callback: F) -> SubscriptionId
    where
        F: Fn(&V) + 'static,
    {
        self.subscribe_callback(topic.into(), Rc::new(callback))
    }

    pub(crate) fn subscribe_callback(&self, topic: T, callback: Callback<V>) -> SubscriptionId {
        let id = SubscriptionId::from(self.next_id.get());
        self.next_id.set(id.get() + 1);

        self.topics
            .borrow_mut()
            .entry(topic)
            .or_default()
            .subscribe(id, callback);

        debug!(%id, "subscription registered");
        id
    }

    /// Removes the subscription `id` from whichever topic holds it.
    ///
    /// Returns `false` for unknown or already removed ids; that is not an error.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut topics = self.topics.borrow_mut();
            let found = topics.iter_mut().find_map(|(topic, subscriptions)| {
                let callback = subscriptions.unsubscribe(id)?;
                let emptied = subscriptions.is_empty().then(|| topic.clone());
                Some((callback, emptied))
            });

            found.map(|(callback, emptied)| {
                if let Some(topic) = emptied.filter(|_| self.settings.prune_empty_topics) {
                    topics.remove(&topic);
                }
                callback
            })
        };

        // The callback may own a subscriber whose drop re-enters this subject,
        // so it is released only after the table borrow ends.
        match removed {
            Some(callback) => {
                drop(callback);
                debug!(%id, "subscription removed");
                true
            }
            None => {
                debug!(%id, "unsubscribe ignored, subscription not found");
                false
            }
        }
    }

    /// Invokes every callback registered under `topic` with `value`, in
    /// ascending id order.
    pub fn notify<Q>(&self, topic: &Q, value: &V) -> DispatchResult
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let snapshot = match self.topics.borrow().get(topic) {
            Some(subscriptions) => subscriptions.snapshot(),
            None => {
                debug!("notify skipped, topic not found");
                return DispatchResult::TopicNotFound;
            }
        };

        for callback in &snapshot {
            callback(value);
        }

        debug!(dispatched = snapshot.len(), "notify complete");
        DispatchResult::Dispatched(snapshot.len())
    }

    /// Whether `id` is currently registered under any topic.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.topics
            .borrow()
            .values()
            .any(|subscriptions| subscriptions.contains(id))
    }

    /// Number of live subscriptions under `topic`; `None` if the topic has no
    /// entry.
    pub fn subscription_count<Q>(&self, topic: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.topics.borrow().get(topic).map(TopicSubscriptions::len)
    }

    /// Number of topic entries, including emptied ones that were not pruned.
    pub fn topic_count(&self) -> usize {
        self.topics.borrow().len()
    }

    /// Whether no subscription is live under any topic.
    pub fn is_empty(&self) -> bool {
        self.topics
            .borrow()
            .values()
            .all(TopicSubscriptions::is_empty)
    }

    /// Removes every topic and subscription. The id counter keeps counting.
    pub fn clear(&self) {
        let topics = std::mem::take(&mut *self.topics.borrow_mut());
        debug!(topics = topics.len(), "subject cleared");
        drop(topics);
    }

    /// The topic `id` is registered under, if it is live.
    pub fn topic_of(&self, id: SubscriptionId) -> Option<T> {
        self.topics
            .borrow()
            .iter()
            .find(|(_, subscriptions)| subscriptions.contains(id))
            .map(|(topic, _)| topic.clone())
    }

    /// Snapshot of the topic keys currently in the table.
    pub fn topics(&self) -> Vec<T> {
        self.topics.borrow().keys().cloned().collect()
    }
}

impl<T, V> fmt::Debug for Subject<T, V>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.topics.try_borrow() {
            Ok(topics) => f
                .debug_struct("Subject")
                .field("topics", &*topics)
                .field("next_id", &self.next_id.get())
                .field("settings", &self.settings)
                .finish(),
            Err(_) => f
                .debug_struct("Subject")
                .field("topics", &"<borrowed>")
                .field("next_id", &self.next_id.get())
                .finish(),
        }
    }
}
