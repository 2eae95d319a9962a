use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::subject::{Subject, SubscriptionId};
use crate::utils::error::ObserverError;

/// Listener-side handle tracking the subscriptions it created on one `Subject`.
///
/// Embed it in a domain listener type. Every subscription made through it is
/// removed from the subject when the `Subscriber` is dropped, so a destroyed
/// listener is never invoked again.
///
/// The subject is held weakly: once it is gone every operation is a no-op.
pub struct Subscriber<T, V>
where
    T: Eq + Hash + Clone,
{
    subject: Weak<Subject<T, V>>,
    owned: BTreeSet<SubscriptionId>,
}

impl<T, V> Subscriber<T, V>
where
    T: Eq + Hash + Clone,
{
    /// Binds a new subscriber with no subscriptions to `subject`.
    pub fn new(subject: &Rc<Subject<T, V>>) -> Self {
        Self {
            subject: Rc::downgrade(subject),
            owned: BTreeSet::new(),
        }
    }

    /// A subscriber bound to no subject. `subscribe` fails and everything else
    /// does nothing.
    pub fn unbound() -> Self {
        Self {
            subject: Weak::new(),
            owned: BTreeSet::new(),
        }
    }

    /// Whether the bound subject is still alive.
    pub fn is_bound(&self) -> bool {
        self.subject.strong_count() > 0
    }

    /// Removes `id` from the subject and forgets it locally. Returns whether
    /// the subject still held it.
    ///
    /// The id space is global to the subject, so ids this subscriber did not
    /// create are removed too. An owned id already removed elsewhere is dropped
    /// from the local set even though the subject reports `false`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(subject) = self.subject.upgrade() else {
            return false;
        };
        let removed = subject.unsubscribe(id);
        self.owned.remove(&id);
        removed
    }

    /// Removes every owned subscription from the subject and clears the set.
    pub fn unsubscribe_all(&mut self) {
        let owned = std::mem::take(&mut self.owned);
        if owned.is_empty() {
            return;
        }

        let Some(subject) = self.subject.upgrade() else {
            return;
        };
        let removed = owned.iter().filter(|id| subject.unsubscribe(**id)).count();
        debug!(owned = owned.len(), removed, "subscriber released its subscriptions");
    }

    /// Snapshot of the ids this subscriber currently owns.
    pub fn subscriptions(&self) -> BTreeSet<SubscriptionId> {
        self.owned.clone()
    }

    pub fn len(&self) -> usize {
        self.owned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty()
    }
}

impl<T, V> Subscriber<T, V>
where
    T: Eq + Hash + Clone,
    V: 'static,
{
    /// Registers `callback` under `topic` on the bound subject and records the id.
    pub fn subscribe<F>(
        &mut self,
        topic: impl Into<T>,
        callback: F,
    ) -> Result<SubscriptionId, ObserverError>
    where
        F: Fn(&V) + 'static,
    {
        let subject = self
            .subject
            .upgrade()
            .ok_or(ObserverError::SubjectUnavailable)?;
        let id = subject.subscribe(topic, callback);
        self.owned.insert(id);
        Ok(id)
    }

    /// Registers `method` of `listener` under `topic`, so notifications call
    /// `method(&mut listener, value)`.
    ///
    /// The listener is captured weakly. A notification arriving after the
    /// listener was dropped, or while it is already mutably borrowed, is skipped.
    pub fn subscribe_method<L>(
        &mut self,
        topic: impl Into<T>,
        listener: &Rc<RefCell<L>>,
        method: fn(&mut L, &V),
    ) -> Result<SubscriptionId, ObserverError>
    where
        L: 'static,
    {
        let listener = Rc::downgrade(listener);
        self.subscribe(topic, move |value: &V| {
            let Some(listener) = listener.upgrade() else {
                warn!("listener dropped, notification skipped");
                return;
            };
            match listener.try_borrow_mut() {
                Ok(mut listener) => method(&mut listener, value),
                Err(_) => warn!("listener busy, notification skipped"),
            }
        })
    }
}

impl<T, V> Drop for Subscriber<T, V>
where
    T: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}

impl<T, V> fmt::Debug for Subscriber<T, V>
where
    T: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("bound", &self.is_bound())
            .field("owned", &self.owned)
            .finish()
    }
}
