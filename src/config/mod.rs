//! Configuration loading for Outrig.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use outrig::config::{load_config_file, OutrigConfig};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "registry:\n  url: https://plugins.example.com\n").unwrap();
//!
//! let config: OutrigConfig = load_config_file(&path).unwrap();
//! assert!(config.managed_plugins_enabled());
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, default_config_path, load_config, load_config_file,
    load_config_with_env, parse_config, CONFIG_ENV, NO_REGISTRY_ENV, PLUGIN_DIR_ENV,
    REGISTRY_URL_ENV,
};
pub use schema::{OutrigConfig, PluginsConfig, RegistryConfig};
