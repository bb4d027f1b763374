//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the TMAP adapter, configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, GeoLocationConfig, MapsConfig, NavigationAppConfig, TmapAppConfig};
pub use telemetry::{LogFormat, LoggingConfig, LoggingError, init_logging};
