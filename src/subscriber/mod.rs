//! The `subscriber` module defines the listener side of the observer.
//!
//! A `Subscriber` is embedded in domain listener types. It remembers every
//! subscription it created on its `Subject` and removes them all when it is
//! dropped.

pub mod subscriber;
pub use subscriber::Subscriber;
