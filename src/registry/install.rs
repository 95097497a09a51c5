//! On-demand installation of registry-managed plugins.
//!
//! Binaries live under the install directory as
//! `<install_dir>/<name>/<version>/<command><exe suffix>`, so several
//! versions of a plugin can coexist and a repeated lookup never touches
//! the network.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use super::http::http_client;
use super::record::PluginRecord;
use crate::error::{OutrigError, Result};
use crate::plugin::resolver::is_executable;

/// Downloads plugin binaries into a local directory.
pub struct PluginInstaller {
    install_dir: PathBuf,
    client: Client,
}

impl PluginInstaller {
    /// Create an installer rooted at `install_dir`.
    pub fn new(install_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            install_dir: install_dir.into(),
            client: http_client(timeout)?,
        })
    }

    /// Root directory for installed plugins.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Where the binary for `record` is (or will be) installed.
    pub fn install_path(&self, record: &PluginRecord) -> Result<PathBuf> {
        let name = path_component(&record.name, record)?;
        let version = path_component(record.version_or_latest(), record)?;
        let command = path_component(&record.command, record)?;
        Ok(self
            .install_dir
            .join(name)
            .join(version)
            .join(format!("{}{}", command, std::env::consts::EXE_SUFFIX)))
    }

    /// Return the local path of `record`'s binary, downloading it if needed.
    pub fn ensure_installed(&self, record: &PluginRecord) -> Result<PathBuf> {
        let path = self.install_path(record)?;
        if path.is_file() && is_executable(&path) {
            tracing::debug!("Plugin {} already installed at {}", record.name, path.display());
            return Ok(path);
        }

        tracing::info!(
            "Installing plugin {} ({})",
            record.name,
            record.version_or_latest()
        );
        self.install(record, &path)
            .map_err(|e| OutrigError::InstallFailed {
                plugin: record.name.clone(),
                message: format!("{:#}", e),
            })?;
        Ok(path)
    }

    fn install(&self, record: &PluginRecord, dest: &Path) -> anyhow::Result<()> {
        let binary = record.binary_for_current_platform().with_context(|| {
            format!(
                "No binary published for {}/{}",
                std::env::consts::OS,
                std::env::consts::ARCH
            )
        })?;

        let content = self.download(&binary.url)?;

        if let Some(expected) = &binary.sha256 {
            let actual = hex::encode(&Sha256::digest(&content)[..]);
            if !actual.eq_ignore_ascii_case(expected.trim()) {
                bail!(
                    "Checksum mismatch for {}: expected {}, got {}",
                    binary.url,
                    expected,
                    actual
                );
            }
        }

        write_executable(dest, &content)
    }

    fn download(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Download of {} failed", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// Reject record fields that would escape the install directory.
fn path_component<'a>(value: &'a str, record: &PluginRecord) -> Result<&'a str> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(OutrigError::InstallFailed {
            plugin: record.name.clone(),
            message: format!("Invalid path component {:?} in plugin record", value),
        });
    }
    Ok(value)
}

/// Sibling temp file for `dest`; the suffix is appended so dotted names
/// never collide.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    dest.with_file_name(name)
}

/// Write `content` to `dest` via a sibling temp file and mark it executable.
fn write_executable(dest: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = dest
        .parent()
        .context("Install path has no parent directory")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create plugin directory {:?}", dir))?;

    let partial = partial_path(dest);
    fs::write(&partial, content)
        .with_context(|| format!("Failed to write {:?}", partial))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&partial, fs::Permissions::from_mode(0o755))?;
    }

    fs::rename(&partial, dest)
        .with_context(|| format!("Failed to move plugin into place at {:?}", dest))?;
    Ok(())
}
