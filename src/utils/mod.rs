//! The `utils` module provides shared definitions used across the crate:
//! the error type returned by subscriber operations and the logging setup.

pub mod error;
pub mod logging;
