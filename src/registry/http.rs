//! HTTP plugin registry.
//!
//! Queries a registry service for plugin records:
//! - `GET {url}/plugins` lists every record
//! - `GET {url}/plugins?command=<name>` lists records for one command
//!
//! Both return a JSON array of [`PluginRecord`]s.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::blocking::Client;
use reqwest::Url;

use super::install::PluginInstaller;
use super::record::PluginRecord;
use super::PluginRegistry;
use crate::error::{OutrigError, Result};

/// Build the blocking HTTP client shared by registry queries and downloads.
pub fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(concat!("outrig/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Registry reached over HTTP/HTTPS.
pub struct HttpRegistry {
    client: Client,
    base_url: String,
    installer: PluginInstaller,
}

impl HttpRegistry {
    /// Create a registry client for `base_url`.
    pub fn new(base_url: &str, timeout: Duration, installer: PluginInstaller) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            installer,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The installer used to materialize binaries.
    pub fn installer(&self) -> &PluginInstaller {
        &self.installer
    }

    fn plugins_url(&self, command: Option<&str>) -> anyhow::Result<Url> {
        let endpoint = format!("{}/plugins", self.base_url);
        let url = match command {
            Some(command) => Url::parse_with_params(&endpoint, &[("command", command)]),
            None => Url::parse(&endpoint),
        };
        url.with_context(|| format!("Invalid registry URL {}", self.base_url))
    }

    fn fetch_records(&self, url: Url) -> anyhow::Result<Vec<PluginRecord>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Request to {} failed", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        response
            .json::<Vec<PluginRecord>>()
            .with_context(|| format!("Malformed plugin list from {}", url))
    }

    fn query(&self, command: Option<&str>) -> Result<Vec<PluginRecord>> {
        self.plugins_url(command)
            .and_then(|url| self.fetch_records(url))
            .map_err(|e| OutrigError::RegistryQuery {
                message: format!("{:#}", e),
            })
    }
}

impl PluginRegistry for HttpRegistry {
    fn find_by_command(&self, command: &str) -> Result<Vec<PluginRecord>> {
        let records = self.query(Some(command))?;
        // Registries are not required to filter server-side
        Ok(records
            .into_iter()
            .filter(|r| r.command == command)
            .collect())
    }

    fn list(&self) -> Result<Vec<PluginRecord>> {
        self.query(None)
    }

    fn ensure_installed(&self, record: &PluginRecord) -> Result<PathBuf> {
        self.installer.ensure_installed(record)
    }
}
