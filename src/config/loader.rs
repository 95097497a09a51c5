//! Configuration file discovery and loading.
//!
//! Settings come from, in increasing priority:
//! 1. Built-in defaults
//! 2. The config file (`--config`, `OUTRIG_CONFIG`, or `~/.outrig/config.yml`)
//! 3. Environment overrides (`OUTRIG_REGISTRY_URL`, `OUTRIG_PLUGIN_DIR`,
//!    `OUTRIG_NO_REGISTRY`)

use crate::config::schema::OutrigConfig;
use crate::error::{OutrigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "OUTRIG_CONFIG";
/// Environment variable overriding `registry.url`.
pub const REGISTRY_URL_ENV: &str = "OUTRIG_REGISTRY_URL";
/// Environment variable overriding `plugins.install_dir`.
pub const PLUGIN_DIR_ENV: &str = "OUTRIG_PLUGIN_DIR";
/// Environment variable that disables registry lookups when set.
pub const NO_REGISTRY_ENV: &str = "OUTRIG_NO_REGISTRY";

/// User's global config: ~/.outrig/config.yml
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".outrig").join("config.yml"))
}

/// Load a single config file and parse it into [`OutrigConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<OutrigConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OutrigError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            OutrigError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`OutrigConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<OutrigConfig> {
    if content.trim().is_empty() {
        return Ok(OutrigConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| OutrigError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load configuration using the real process environment.
pub fn load_config(config_override: Option<&Path>) -> Result<OutrigConfig> {
    load_config_with_env(config_override, |key: &str| std::env::var(key))
}

/// Load configuration with a custom env var lookup function.
///
/// An explicit path (argument or `OUTRIG_CONFIG`) must exist; the default
/// location is optional.
pub fn load_config_with_env<F>(config_override: Option<&Path>, env_fn: F) -> Result<OutrigConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let explicit = config_override
        .map(Path::to_path_buf)
        .or_else(|| env_fn(CONFIG_ENV).ok().filter(|v| !v.is_empty()).map(PathBuf::from));

    let mut config = match explicit {
        Some(path) => load_config_file(&path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => load_config_file(&path)?,
            _ => OutrigConfig::default(),
        },
    };

    apply_env_overrides(&mut config, &env_fn);
    Ok(config)
}

/// Apply `OUTRIG_*` environment overrides on top of file settings.
pub fn apply_env_overrides<F>(config: &mut OutrigConfig, env_fn: &F)
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    if let Ok(url) = env_fn(REGISTRY_URL_ENV) {
        if !url.is_empty() {
            config.registry.url = Some(url);
        }
    }

    if let Ok(dir) = env_fn(PLUGIN_DIR_ENV) {
        if !dir.is_empty() {
            config.plugins.install_dir = Some(PathBuf::from(dir));
        }
    }

    if env_fn(NO_REGISTRY_ENV).is_ok() {
        config.registry.enabled = false;
    }
}
