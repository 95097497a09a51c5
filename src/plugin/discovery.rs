//! Enumerating available plugins.
//!
//! Used by `outrig plugins list`. Local plugins are found by scanning the
//! search path for executables in the plugin namespace; managed plugins
//! come from registry records. Plugins that can never be reached are
//! flagged: a later PATH entry is shadowed by an earlier one with the same
//! name, and a plugin whose first token is a built-in command is never
//! dispatched to.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::plugin::name::command_tokens;
use crate::plugin::resolver::is_executable;
use crate::plugin::seen::SeenPlugins;
use crate::registry::PluginRecord;

/// Where a discovered plugin comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum PluginOrigin {
    /// Executable found on the search path.
    Local { path: PathBuf },
    /// Registry record, installed on first use.
    Managed {
        record: String,
        version: Option<String>,
    },
}

/// A plugin visible to the dispatcher.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredPlugin {
    /// Executable name, e.g. `outrig-foo-bar`.
    pub name: String,
    /// Command path that dispatches to it, e.g. `["foo", "bar"]`.
    pub command: Vec<String>,
    pub origin: PluginOrigin,
    pub description: Option<String>,
    /// Problems that make the plugin unreachable or ambiguous.
    pub warnings: Vec<String>,
}

impl DiscoveredPlugin {
    /// Command as typed by a user, e.g. `outrig foo bar`.
    pub fn usage(&self) -> String {
        let mut usage = String::from(crate::plugin::name::PLUGIN_NAMESPACE);
        for token in &self.command {
            usage.push(' ');
            usage.push_str(token);
        }
        usage
    }

    fn check_builtin(&mut self, builtins: &[String]) {
        if let Some(first) = self.command.first() {
            if builtins.iter().any(|b| b == first) {
                self.warnings.push(format!(
                    "{} is overwritten by the built-in command `{} {}`",
                    self.name,
                    crate::plugin::name::PLUGIN_NAMESPACE,
                    first
                ));
            }
        }
    }
}

/// Scan `path_entries` in order for plugin executables.
///
/// Unreadable directories are skipped. Entries within a directory are
/// reported in file-name order.
pub fn discover_local(
    path_entries: &[PathBuf],
    builtins: &[String],
    seen: &mut SeenPlugins,
) -> Vec<DiscoveredPlugin> {
    let mut plugins = Vec::new();

    for dir in path_entries {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Skipping unreadable PATH entry {:?}: {}", dir, e);
                continue;
            }
        };

        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        paths.sort();

        for path in paths {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(command) = command_tokens(file_name) else {
                continue;
            };
            if !path.is_file() || !is_executable(&path) {
                continue;
            }

            let name = crate::plugin::name::plugin_name(&command);
            let mut plugin = DiscoveredPlugin {
                name: name.clone(),
                command,
                origin: PluginOrigin::Local { path: path.clone() },
                description: None,
                warnings: Vec::new(),
            };

            let selection = path.display().to_string();
            if !seen.record(&name, &selection) {
                let winner = seen.selected(&name).unwrap_or_default();
                plugin
                    .warnings
                    .push(format!("{} is shadowed by {}", selection, winner));
            }
            plugin.check_builtin(builtins);
            plugins.push(plugin);
        }
    }

    plugins
}

/// Describe registry records as plugins.
///
/// Records are recorded in `seen` before local plugins are scanned so that
/// a managed plugin shadows a local one with the same command, matching
/// lookup order.
pub fn discover_managed(
    records: &[PluginRecord],
    builtins: &[String],
    seen: &mut SeenPlugins,
) -> Vec<DiscoveredPlugin> {
    let mut plugins = Vec::new();

    for record in records {
        let Some(command) = command_tokens(&record.command) else {
            tracing::debug!(
                "Ignoring registry record {} with foreign command {}",
                record.name,
                record.command
            );
            continue;
        };

        let mut plugin = DiscoveredPlugin {
            name: record.command.clone(),
            command,
            origin: PluginOrigin::Managed {
                record: record.name.clone(),
                version: record.version.clone(),
            },
            description: record.description.clone(),
            warnings: Vec::new(),
        };

        if !seen.record(&record.command, &record.name) {
            let winner = seen.selected(&record.command).unwrap_or_default();
            plugin.warnings.push(format!(
                "more than one plugin provides {}; {} is used",
                record.command, winner
            ));
        }
        plugin.check_builtin(builtins);
        plugins.push(plugin);
    }

    plugins
}
