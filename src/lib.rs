//! Outrig - extensible command-line tool.
//!
//! Built-in commands are parsed with clap. Any other command is offered to
//! external plugins: executables named `outrig-<tok1>-<tok2>-...` found on
//! `PATH` or provided by a plugin registry, git/kubectl style.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface, built-in commands and routing
//! - [`config`] - User configuration loading
//! - [`error`] - Error types and result aliases
//! - [`plugin`] - Plugin name folding, resolution and execution
//! - [`registry`] - Registry-managed plugins and on-demand installation
//!
//! # Example
//!
//! ```
//! use outrig::plugin::{plugin_name_for_command, fold_window};
//!
//! let args = vec!["deploy".to_string(), "pre-view".to_string(), "--now".to_string()];
//! let window = fold_window(&args);
//! assert_eq!(window, vec!["deploy", "pre_view"]);
//! assert_eq!(plugin_name_for_command(&window), "outrig-deploy-pre_view");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod plugin;
pub mod registry;

pub use error::{OutrigError, Result};
