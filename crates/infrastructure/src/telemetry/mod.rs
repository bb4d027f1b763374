//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus a human
//! readable or JSON formatter.

mod logging;

pub use logging::{LogFormat, LoggingConfig, LoggingError, init_logging};
