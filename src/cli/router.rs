//! Routing between built-in commands and external plugins.
//!
//! Plugin dispatch is attempted only when the first argument is a word
//! that no built-in subcommand claims. Flags before any command always go
//! to the built-in parser.

use std::ffi::OsStr;
use std::fmt::Debug;

use clap::CommandFactory;

use crate::cli::args::Cli;
use crate::config::OutrigConfig;
use crate::error::Result;
use crate::plugin::name::is_flag;
use crate::plugin::{
    handle_plugin_command, DispatchOutcome, Environment, LocalResolver, ManagedResolver,
    PluginResolver,
};
use crate::registry::{HttpRegistry, PluginInstaller, PluginRegistry};

/// Which side of the router handles an argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Parse with clap and run a built-in command.
    Builtin,
    /// Try an external plugin first.
    Plugin,
}

/// Decides whether a command line is handled by a built-in command or a plugin.
#[derive(Debug, Clone)]
pub struct CommandRouter {
    builtins: Vec<String>,
}

impl CommandRouter {
    /// Router over the subcommands of [`Cli`].
    pub fn new() -> Self {
        let cmd = Cli::command();
        let mut builtins: Vec<String> = cmd
            .get_subcommands()
            .flat_map(|sub| {
                std::iter::once(sub.get_name().to_string())
                    .chain(sub.get_all_aliases().map(String::from))
            })
            .collect();
        builtins.push("help".to_string());
        Self { builtins }
    }

    /// Names (and aliases) claimed by built-in commands.
    pub fn builtin_names(&self) -> &[String] {
        &self.builtins
    }

    /// Classify `args` (the command line without the program name).
    ///
    /// A first argument that is not valid UTF-8 can never name a plugin and
    /// is left to the built-in parser.
    pub fn classify<S: AsRef<OsStr>>(&self, args: &[S]) -> Route {
        match args.first().and_then(|first| first.as_ref().to_str()) {
            Some(first) if !first.is_empty() && !is_flag(first) && !self.is_builtin(first) => {
                Route::Plugin
            }
            _ => Route::Builtin,
        }
    }

    fn is_builtin(&self, name: &str) -> bool {
        self.builtins.iter().any(|b| b == name)
    }

    /// Attempt plugin dispatch for `args` if no built-in command claims them.
    ///
    /// Returns `NoMatch` for built-in commands and for unknown commands with
    /// no matching plugin.
    pub fn route<S: AsRef<OsStr> + Debug>(
        &self,
        args: &[S],
        resolver: &dyn PluginResolver,
        env: &Environment,
    ) -> Result<DispatchOutcome> {
        match self.classify(args) {
            Route::Builtin => Ok(DispatchOutcome::NoMatch),
            Route::Plugin => handle_plugin_command(resolver, args, env),
        }
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the registry client described by `config`, if managed plugins are on.
///
/// A client that cannot be constructed is logged and treated as absent.
pub fn build_registry(config: &OutrigConfig) -> Option<Box<dyn PluginRegistry>> {
    if !config.managed_plugins_enabled() {
        return None;
    }
    let url = config.registry.url.as_deref()?;

    let registry = PluginInstaller::new(config.install_dir(), config.registry_timeout())
        .and_then(|installer| HttpRegistry::new(url, config.registry_timeout(), installer));
    match registry {
        Ok(registry) => Some(Box::new(registry) as Box<dyn PluginRegistry>),
        Err(e) => {
            tracing::warn!("Plugin registry unavailable, using local plugins only: {}", e);
            None
        }
    }
}

/// Build the resolver for `config`: managed when a registry is configured,
/// local otherwise.
pub fn build_resolver(config: &OutrigConfig) -> Box<dyn PluginResolver> {
    let local = LocalResolver::new();
    match build_registry(config) {
        Some(registry) => Box::new(ManagedResolver::new(registry, local)),
        None => Box::new(local),
    }
}
