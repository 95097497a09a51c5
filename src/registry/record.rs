//! Plugin records served by the registry.

use serde::{Deserialize, Serialize};

/// A plugin installation tracked by the registry.
///
/// `command` is the executable name the plugin answers to (for example
/// `outrig-deploy-preview`), built with the same normalization the argument
/// folder uses.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PluginRecord {
    /// Name of the installation (unique per registry).
    pub name: String,

    /// Executable name this plugin provides.
    pub command: String,

    /// Plugin version; used to keep installs side by side.
    #[serde(default)]
    pub version: Option<String>,

    /// One-line description for listings.
    #[serde(default)]
    pub description: Option<String>,

    /// Downloadable binaries, one per platform.
    #[serde(default)]
    pub binaries: Vec<PluginBinary>,
}

/// A platform-specific plugin binary.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PluginBinary {
    /// Operating system (`linux`, `macos`/`darwin`, `windows`).
    pub os: String,

    /// CPU architecture (`x86_64`/`amd64`, `aarch64`/`arm64`).
    pub arch: String,

    /// Download location.
    pub url: String,

    /// Expected SHA-256 of the download, hex encoded.
    #[serde(default)]
    pub sha256: Option<String>,
}

impl PluginBinary {
    /// Whether this binary targets the given OS and architecture.
    pub fn matches(&self, os: &str, arch: &str) -> bool {
        canonical_os(&self.os) == canonical_os(os) && canonical_arch(&self.arch) == canonical_arch(arch)
    }
}

impl PluginRecord {
    /// Binary for an explicit platform.
    pub fn binary_for(&self, os: &str, arch: &str) -> Option<&PluginBinary> {
        self.binaries.iter().find(|b| b.matches(os, arch))
    }

    /// Binary for the platform this process runs on.
    pub fn binary_for_current_platform(&self) -> Option<&PluginBinary> {
        self.binary_for(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Version string used in install paths.
    pub fn version_or_latest(&self) -> &str {
        self.version.as_deref().unwrap_or("latest")
    }
}

fn canonical_os(os: &str) -> String {
    match os.to_ascii_lowercase().as_str() {
        "darwin" | "osx" => "macos".to_string(),
        other => other.to_string(),
    }
}

fn canonical_arch(arch: &str) -> String {
    match arch.to_ascii_lowercase().as_str() {
        "amd64" | "x64" => "x86_64".to_string(),
        "arm64" => "aarch64".to_string(),
        other => other.to_string(),
    }
}
