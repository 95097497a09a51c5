//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Built-in commands are dispatched via [`CommandDispatcher`]. Anything
//! else is offered to external plugins by the
//! [`CommandRouter`](crate::cli::CommandRouter) before clap sees it.

pub mod completions;
pub mod dispatcher;
pub mod plugins;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
