//! Observability module
//!
//! Logging setup for load diagnostics.

pub mod logging;

pub use logging::{LogFormat, init_logging};
