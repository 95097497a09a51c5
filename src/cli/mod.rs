//! Command-line interface for Outrig.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`router`] - Chooses between built-in commands and plugin dispatch
//! - [`commands`] - Built-in command implementations

pub mod args;
pub mod commands;
pub mod router;

pub use args::{
    Cli, Commands, CompletionsArgs, PluginsArgs, PluginsCommands, PluginsListArgs,
    PluginsPathArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use router::{build_registry, build_resolver, CommandRouter, Route};
