//! The `subject` module owns the topic dispatch table.
//!
//! It provides the `Subject` engine, the per-topic `TopicSubscriptions` set and
//! the `SubscriptionId` handles handed out on every registration.

pub mod engine;
pub mod topic;

pub use engine::{DispatchResult, StringSubject, Subject};
pub use topic::{Callback, SubscriptionId};
