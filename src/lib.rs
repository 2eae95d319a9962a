//! # topic-observer
//!
//! `topic-observer` is a minimalist, in-process publish/subscribe primitive.
//! A `Subject` keeps a table of topic-keyed callbacks and notifies them
//! synchronously; a `Subscriber` tracks the subscriptions it created and
//! removes them all when it is dropped.
//!
//! ## Core Modules
//!
//! - `subject`: The dispatch table, subscription ids and `notify`.
//! - `subscriber`: The listener-side handle with automatic cleanup.
//! - `config`: Loads subject and logging settings.
//! - `utils`: Shared error type and logging setup.
//!
//! ## Example
//!
//! ```rust
//! use topic_observer::{DispatchResult, StringSubject, Subscriber};
//!
//! let subject = StringSubject::<String>::shared();
//! let mut reader = Subscriber::new(&subject);
//! reader.subscribe("TIME", |news: &String| println!("{news}")).unwrap();
//!
//! assert_eq!(subject.notify("TIME", &"noon".to_string()), DispatchResult::Dispatched(1));
//! drop(reader);
//! assert_eq!(subject.notify("TIME", &"one".to_string()), DispatchResult::Dispatched(0));
//! ```

pub mod config;
pub mod subject;
pub mod subscriber;
pub mod utils;

pub use subject::{DispatchResult, StringSubject, Subject, SubscriptionId};
pub use subscriber::Subscriber;
pub use utils::error::ObserverError;

#[cfg(test)]
mod tests;
