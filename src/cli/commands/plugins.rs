//! Plugin inspection commands.
//!
//! - `outrig plugins list` shows every plugin reachable from the command line
//! - `outrig plugins path <command...>` shows which plugin a command runs

use std::io::Write;
use std::path::PathBuf;

use crate::cli::args::{PluginsListArgs, PluginsPathArgs};
use crate::cli::router::{build_registry, build_resolver, CommandRouter};
use crate::config::OutrigConfig;
use crate::error::Result;
use crate::plugin::{
    discover_local, discover_managed, fold, parse_system_path, DiscoveredPlugin, PluginOrigin,
    PluginResolver, SeenPlugins,
};
use crate::registry::PluginRegistry;

use super::dispatcher::{Command, CommandResult};

/// The `plugins list` command implementation.
pub struct ListCommand {
    args: PluginsListArgs,
    path_entries: Vec<PathBuf>,
    registry: Option<Box<dyn PluginRegistry>>,
    builtins: Vec<String>,
}

impl ListCommand {
    /// Create a list command over the process PATH and configured registry.
    pub fn new(config: &OutrigConfig, args: PluginsListArgs) -> Self {
        Self {
            args,
            path_entries: parse_system_path(),
            registry: build_registry(config),
            builtins: CommandRouter::new().builtin_names().to_vec(),
        }
    }

    /// Replace the directories scanned for local plugins.
    pub fn with_path(mut self, path_entries: Vec<PathBuf>) -> Self {
        self.path_entries = path_entries;
        self
    }

    /// Replace the registry consulted for managed plugins.
    pub fn with_registry(mut self, registry: Option<Box<dyn PluginRegistry>>) -> Self {
        self.registry = registry;
        self
    }

    fn collect(&self) -> Vec<DiscoveredPlugin> {
        let mut seen = SeenPlugins::new();
        let mut plugins = Vec::new();

        if let Some(registry) = &self.registry {
            match registry.list() {
                Ok(records) => plugins.extend(discover_managed(&records, &self.builtins, &mut seen)),
                Err(e) => tracing::warn!("{}; listing local plugins only", e),
            }
        }

        plugins.extend(discover_local(&self.path_entries, &self.builtins, &mut seen));
        plugins
    }

    fn write_human(&self, plugins: &[DiscoveredPlugin], out: &mut dyn Write) -> Result<()> {
        if plugins.is_empty() {
            writeln!(out, "No plugins found.")?;
            return Ok(());
        }

        writeln!(out, "The following plugins are available:")?;
        writeln!(out)?;
        for plugin in plugins {
            let location = match &plugin.origin {
                PluginOrigin::Local { path } => path.display().to_string(),
                PluginOrigin::Managed { record, version } => match version {
                    Some(version) => format!("managed: {} {}", record, version),
                    None => format!("managed: {}", record),
                },
            };
            write!(out, "  {:<30} {}", plugin.usage(), location)?;
            if let Some(description) = &plugin.description {
                write!(out, "  {}", description)?;
            }
            writeln!(out)?;
            for warning in &plugin.warnings {
                writeln!(out, "    - warning: {}", warning)?;
            }
        }
        Ok(())
    }
}

impl Command for ListCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let plugins = self.collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&plugins).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", json)?;
        } else {
            self.write_human(&plugins, out)?;
        }

        Ok(CommandResult::success())
    }
}

/// The `plugins path` command implementation.
pub struct PathCommand {
    args: PluginsPathArgs,
    resolver: Box<dyn PluginResolver>,
}

impl PathCommand {
    /// Create a path command resolving through the configured resolver.
    pub fn new(config: &OutrigConfig, args: PluginsPathArgs) -> Self {
        Self {
            args,
            resolver: build_resolver(config),
        }
    }

    /// Resolve through an explicit resolver.
    pub fn with_resolver(args: PluginsPathArgs, resolver: Box<dyn PluginResolver>) -> Self {
        Self { args, resolver }
    }
}

impl Command for PathCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        match fold(&self.args.command, self.resolver.as_ref())? {
            Some(found) => {
                writeln!(out, "{}", found.path.display())?;
                let remaining = found.remaining_args(&self.args.command);
                if !remaining.is_empty() {
                    writeln!(out, "arguments passed to plugin: {}", remaining.join(" "))?;
                }
                Ok(CommandResult::success())
            }
            None => {
                writeln!(
                    out,
                    "No plugin matches `{}`",
                    self.args.command.join(" ")
                )?;
                Ok(CommandResult::failure(1))
            }
        }
    }
}
