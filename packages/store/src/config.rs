//! # Application configuration — `unicourse.toml`
//!
//! Tunables for the mock backend and for where persisted state lives. The
//! file is optional: every section and field has a default, so a missing or
//! empty file is equivalent to [`UniCourseConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [auth]
//! latency_ms = 1000          # simulated login/register round trip
//!
//! [catalog]
//! fetch_latency_ms = 1000    # simulated fetch round trip
//! search_latency_ms = 500    # simulated search round trip
//!
//! [storage]
//! namespace = "unicourse"    # IndexedDB name / data-dir subfolder
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`UniCourseConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`AuthConfig`] | Mock authentication latency. |
//! | [`CatalogConfig`] | Mock catalog fetch/search latency. |
//! | [`StorageConfig`] | Namespace used to name the on-device store. |

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `unicourse.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UniCourseConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Mock authentication settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_latency")]
    pub latency_ms: u64,
}

/// Mock catalog settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_fetch_latency")]
    pub fetch_latency_ms: u64,
    #[serde(default = "default_search_latency")]
    pub search_latency_ms: u64,
}

/// Persisted storage settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_auth_latency() -> u64 {
    1000
}

fn default_fetch_latency() -> u64 {
    1000
}

fn default_search_latency() -> u64 {
    500
}

fn default_namespace() -> String {
    "unicourse".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_auth_latency(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fetch_latency_ms: default_fetch_latency(),
            search_latency_ms: default_search_latency(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl AuthConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl CatalogConfig {
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }
}

impl UniCourseConfig {
    /// Config with every simulated delay set to zero. Used by tests.
    pub fn instant() -> Self {
        Self::default().with_latency_ms(0)
    }

    /// Builder method to set all simulated latencies at once.
    pub fn with_latency_ms(mut self, ms: u64) -> Self {
        self.auth.latency_ms = ms;
        self.catalog.fetch_latency_ms = ms;
        self.catalog.search_latency_ms = ms;
        self
    }

    /// Builder method to set the storage namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage.namespace = namespace.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "unicourse.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = UniCourseConfig::from_toml("").unwrap();
        assert_eq!(config, UniCourseConfig::default());
        assert_eq!(config.auth.latency_ms, 1000);
        assert_eq!(config.catalog.search_latency(), Duration::from_millis(500));
        assert_eq!(config.storage.namespace, "unicourse");
    }

    #[test]
    fn test_partial_sections() {
        let config = UniCourseConfig::from_toml(
            "[catalog]\nsearch_latency_ms = 50\n\n[storage]\nnamespace = \"uom\"\n",
        )
        .unwrap();
        assert_eq!(config.catalog.search_latency_ms, 50);
        assert_eq!(config.catalog.fetch_latency_ms, 1000);
        assert_eq!(config.auth.latency_ms, 1000);
        assert_eq!(config.storage.namespace, "uom");
    }

    #[test]
    fn test_toml_roundtrip_with_builders() {
        let config = UniCourseConfig::instant().with_namespace("test-ns");
        let text = config.to_toml().unwrap();
        assert_eq!(UniCourseConfig::from_toml(&text).unwrap(), config);
        assert_eq!(config.auth.latency(), Duration::ZERO);
    }
}
