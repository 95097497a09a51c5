//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// User configuration for Outrig.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutrigConfig {
    /// Plugin registry settings.
    pub registry: RegistryConfig,

    /// Local plugin settings.
    pub plugins: PluginsConfig,
}

/// Where registry-managed plugins are looked up.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the registry service. Managed plugins are off when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Set to false to ignore the registry even when a URL is configured.
    pub enabled: bool,

    /// Timeout for registry queries and downloads, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: None,
            enabled: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local plugin settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PluginsConfig {
    /// Directory registry-managed binaries are installed into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,
}

impl OutrigConfig {
    /// Whether plugin lookups should consult the registry.
    pub fn managed_plugins_enabled(&self) -> bool {
        self.registry.enabled
            && self
                .registry
                .url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
    }

    /// Timeout applied to registry traffic.
    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs)
    }

    /// Install directory, defaulting to `<cache dir>/outrig/plugins`.
    pub fn install_dir(&self) -> PathBuf {
        self.plugins.install_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from(".cache"))
                .join("outrig")
                .join("plugins")
        })
    }
}
