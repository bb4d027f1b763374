//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `integrations`: TMAP and map provider credentials
//! - `navigation`: default search center and route preference
//!
//! Sources, later ones winning: built-in defaults, `pathpal.toml` (or an
//! explicit file), `PATHPAL__SECTION__KEY` environment variables, and the
//! bare `TMAP_APP_KEY` / `GOOGLE_MAPS_API_KEY` variables.

mod integrations;
mod navigation;

use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use integrations::{MapsConfig, TmapAppConfig};
pub use navigation::{GeoLocationConfig, NavigationAppConfig};

use crate::telemetry::LoggingConfig;

/// Base name of the optional configuration file in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pathpal";

/// Prefix of structured environment overrides
pub const ENV_PREFIX: &str = "PATHPAL";

/// Environment variable holding the TMAP application key
pub const TMAP_APP_KEY_VAR: &str = "TMAP_APP_KEY";

/// Environment variable holding the map SDK key
pub const GOOGLE_MAPS_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// TMAP configuration
    #[serde(default)]
    pub tmap: TmapAppConfig,

    /// Map provider configuration
    #[serde(default)]
    pub maps: MapsConfig,

    /// Navigation configuration
    #[serde(default)]
    pub navigation: NavigationAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and a file
    ///
    /// Without `path`, `pathpal.toml` in the working directory is used if
    /// present. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_from(path, None, |name| std::env::var(name).ok())
    }

    /// Load with an explicit environment
    ///
    /// `env` replaces the process environment for `PATHPAL__*` overrides
    /// when given; `lookup` resolves the bare credential variables.
    pub fn load_from(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let center = NavigationAppConfig::default().default_center;
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("navigation.default_center.latitude", center.latitude)?
            .set_default("navigation.default_center.longitude", center.longitude)?
            // Load from file
            .add_source(file)
            // Override with environment variables (e.g., PATHPAL__TMAP__TIMEOUT_SECS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_credential_vars(lookup);
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Take credentials from the bare environment variables when set
    fn apply_credential_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(TMAP_APP_KEY_VAR) {
            self.tmap.app_key = Some(SecretString::from(key));
        }
        if let Some(key) = non_empty(GOOGLE_MAPS_API_KEY_VAR) {
            self.maps.api_key = Some(SecretString::from(key));
        }
    }

    /// Check values the type system cannot
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.tmap
            .to_tmap_config()
            .validate()
            .map_err(|e| format!("tmap: {e}"))?;

        if self.navigation.to_navigation_config().is_none() {
            return Err("navigation.default_center is out of range".to_string());
        }

        Ok(())
    }

    /// Log which providers are usable
    pub fn log_summary(&self) {
        if self.maps.is_configured() {
            info!("Map provider key configured");
        } else {
            info!("Map API key not configured, skipping map provider initialization");
        }

        if !self.tmap.has_app_key() {
            warn!("TMAP app key not configured, requests will be rejected by the provider");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use application::ports::RoutePreference;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::telemetry::LogFormat;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_from(None, no_env(), |_| None).unwrap();

        assert_eq!(config.tmap.base_url, "https://apis.openapi.sk.com");
        assert_eq!(config.tmap.timeout_secs, 10);
        assert!(!config.tmap.has_app_key());
        assert!(!config.maps.is_configured());
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_file() {
        let file = write_config(
            r#"
            [tmap]
            app_key = "file-key"
            base_url = "http://localhost:8080"
            timeout_secs = 4

            [navigation]
            default_center = { latitude = 37.4979, longitude = 127.0276 }
            route_preference = "avoid_stairs"

            [logging]
            filter = "pathpal=debug"
            format = "json"
            "#,
        );

        let config = AppConfig::load_from(Some(file.path()), no_env(), |_| None).unwrap();

        assert_eq!(
            config.tmap.app_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("file-key".to_string())
        );
        assert_eq!(config.tmap.base_url, "http://localhost:8080");
        assert_eq!(config.tmap.timeout_secs, 4);
        assert!((config.navigation.default_center.latitude - 37.4979).abs() < 1e-9);
        assert_eq!(config.navigation.route_preference, RoutePreference::AvoidStairs);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(AppConfig::load_from(Some(&path), no_env(), |_| None).is_err());
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config("[tmap]\ntimeout_secs = 4\n");
        let mut env = config::Map::new();
        env.insert("PATHPAL__TMAP__TIMEOUT_SECS".to_string(), "7".to_string());
        env.insert(
            "PATHPAL__NAVIGATION__DEFAULT_CENTER__LATITUDE".to_string(),
            "35.1796".to_string(),
        );

        let config = AppConfig::load_from(Some(file.path()), Some(env), |_| None).unwrap();

        assert_eq!(config.tmap.timeout_secs, 7);
        assert!((config.navigation.default_center.latitude - 35.1796).abs() < 1e-9);
        // Longitude keeps its default
        assert!((config.navigation.default_center.longitude - 126.978).abs() < 1e-9);
    }

    #[test]
    fn credential_variables_win() {
        let file = write_config("[tmap]\napp_key = \"file-key\"\n");

        let config = AppConfig::load_from(Some(file.path()), no_env(), |name| match name {
            TMAP_APP_KEY_VAR => Some("env-key".to_string()),
            GOOGLE_MAPS_API_KEY_VAR => Some("maps-key".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(
            config.tmap.app_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("env-key".to_string())
        );
        assert!(config.maps.is_configured());
    }

    #[test]
    fn blank_credential_variable_ignored() {
        let file = write_config("[tmap]\napp_key = \"file-key\"\n");
        let config =
            AppConfig::load_from(Some(file.path()), no_env(), |_| Some("  ".to_string())).unwrap();

        assert!(config.tmap.has_app_key());
        assert!(!config.maps.is_configured());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.tmap.timeout_secs = 0;
        assert!(config.validate().unwrap_err().starts_with("tmap:"));

        let mut config = AppConfig::default();
        config.navigation.default_center.longitude = 500.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn serialization_skips_secrets() {
        let mut config = AppConfig::default();
        config.apply_credential_vars(|_| Some("secret-value".to_string()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-value"));
    }
}
