//! TMAP service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the TMAP open API
#[derive(Clone, Serialize, Deserialize)]
pub struct TmapConfig {
    /// Base URL for the TMAP API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application key sent in the `appKey` header
    ///
    /// An empty key is accepted; the provider rejects the requests.
    #[serde(skip_serializing, default = "empty_app_key")]
    pub app_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://apis.openapi.sk.com".to_string()
}

fn empty_app_key() -> SecretString {
    SecretString::from(String::new())
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for TmapConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_key: empty_app_key(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for TmapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmapConfig")
            .field("base_url", &self.base_url)
            .field("app_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TmapConfig {
    /// Create a configuration with the given application key
    #[must_use]
    pub fn with_app_key(app_key: impl Into<String>) -> Self {
        Self {
            app_key: SecretString::from(app_key.into()),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            app_key: SecretString::from("test-app-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Whether an application key is configured
    #[must_use]
    pub fn has_app_key(&self) -> bool {
        !self.app_key.expose_secret().is_empty()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        let url = Url::parse(&self.base_url).map_err(|e| format!("base_url is invalid: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err("base_url must use http or https".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    pub(crate) fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
