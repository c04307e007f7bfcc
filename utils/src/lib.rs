//! Shared process utilities for cellgate binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
