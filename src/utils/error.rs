//! Errors surfaced by the observer.
//!
//! "Not found" outcomes are not errors here: `Subject::notify` reports them
//! through `DispatchResult` and `unsubscribe` returns `false`.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ObserverError {
    /// The subscriber is unbound, or the subject it was bound to was dropped.
    #[error("no subject is available to this subscriber")]
    SubjectUnavailable,
}
