//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Outrig - extensible command-line tool.
#[derive(Debug, Parser)]
#[command(name = "outrig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(
    after_help = "Any other command is dispatched to an executable named `outrig-<command>` \
                  found on PATH or provided by the plugin registry."
)]
pub struct Cli {
    /// Path to config file (overrides ~/.outrig/config.yml)
    #[arg(short, long, global = true, env = "OUTRIG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect available plugins
    Plugins(PluginsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `plugins` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PluginsArgs {
    #[command(subcommand)]
    pub command: PluginsCommands,
}

/// `plugins` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum PluginsCommands {
    /// List plugins on PATH and in the registry
    List(PluginsListArgs),

    /// Show which plugin a command would run, without running it
    Path(PluginsPathArgs),
}

/// Arguments for `plugins list`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PluginsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `plugins path`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PluginsPathArgs {
    /// Command path as it would be typed after `outrig`
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
