//! Provider configurations: TMAP routing/search and the map SDK key.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// TMAP Configuration
// ==============================

/// TMAP open API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TmapAppConfig {
    /// Application key sent with every request
    ///
    /// Also read from `TMAP_APP_KEY`. Missing means an empty credential,
    /// so requests are rejected by the provider.
    #[serde(default, skip_serializing)]
    pub app_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_tmap_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_tmap_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for TmapAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmapAppConfig")
            .field("app_key", &self.app_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_tmap_base_url() -> String {
    "https://apis.openapi.sk.com".to_string()
}

const fn default_tmap_timeout() -> u64 {
    10
}

impl Default for TmapAppConfig {
    fn default() -> Self {
        Self {
            app_key: None,
            base_url: default_tmap_base_url(),
            timeout_secs: default_tmap_timeout(),
        }
    }
}

impl TmapAppConfig {
    /// Whether a non-empty application key is configured
    #[must_use]
    pub fn has_app_key(&self) -> bool {
        self.app_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }

    /// Convert to `integration_tmap::TmapConfig`
    #[must_use]
    pub fn to_tmap_config(&self) -> integration_tmap::TmapConfig {
        let key = self
            .app_key
            .as_ref()
            .map(|key| key.expose_secret().to_string())
            .unwrap_or_default();

        integration_tmap::TmapConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            ..integration_tmap::TmapConfig::with_app_key(key)
        }
    }
}

// ==============================
// Map SDK Configuration
// ==============================

/// Map rendering provider configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Google Maps API key, also read from `GOOGLE_MAPS_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl MapsConfig {
    /// Whether the map provider can be initialized
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }
}
