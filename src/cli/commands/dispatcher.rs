//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use clap::CommandFactory;

use crate::cli::args::{Cli, Commands, PluginsCommands};
use crate::config::OutrigConfig;
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing user-facing output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: OutrigConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher with the loaded configuration.
    pub fn new(config: OutrigConfig) -> Self {
        Self { config }
    }

    /// The configuration commands run with.
    pub fn config(&self) -> &OutrigConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand the help text is printed.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Plugins(args)) => match &args.command {
                PluginsCommands::List(list_args) => {
                    let cmd = super::plugins::ListCommand::new(&self.config, list_args.clone());
                    cmd.execute(out)
                }
                PluginsCommands::Path(path_args) => {
                    let cmd = super::plugins::PathCommand::new(&self.config, path_args.clone());
                    cmd.execute(out)
                }
            },
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(out)
            }
            None => {
                write!(out, "{}", Cli::command().render_help())?;
                Ok(CommandResult::success())
            }
        }
    }
}
