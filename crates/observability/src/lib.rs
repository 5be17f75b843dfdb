//! Tracing and logging setup.
//!
//! There is no process-wide logger here: callers build a [`Logger`] and hand it
//! to each component at construction time.

/// Logger construction (filters, formats).
pub mod tracing;

pub use crate::tracing::{LogFormat, Logger, LoggingConfig};
