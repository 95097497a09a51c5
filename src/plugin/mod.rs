//! External plugin resolution and dispatch.
//!
//! When a command does not match any built-in subcommand, Outrig looks for
//! an executable named after the command path and hands the process over
//! to it:
//!
//! - [`name`] - the `outrig-<tok>-<tok>` naming convention
//! - [`fold`] - longest-prefix search over the command path
//! - [`resolver`] - the [`PluginResolver`] trait and PATH-based [`LocalResolver`]
//! - [`managed`] - registry-backed [`ManagedResolver`] with local fallback
//! - [`exec`] - process replacement and its spawn-based emulation
//! - [`dispatch`] - fold + execute entry point used by the router
//! - [`discovery`] - plugin listing for `outrig plugins list`
//!
//! # Example
//!
//! ```
//! use outrig::plugin::{fold, LocalResolver};
//!
//! // An empty search path resolves nothing, which is not an error
//! let resolver = LocalResolver::with_path(Vec::new());
//! let args = vec!["deploy".to_string(), "--dry-run".to_string()];
//! assert!(fold(&args, &resolver).unwrap().is_none());
//! ```

pub mod discovery;
pub mod dispatch;
pub mod exec;
pub mod fold;
pub mod managed;
pub mod name;
pub mod resolver;
pub mod seen;

pub use discovery::{discover_local, discover_managed, DiscoveredPlugin, PluginOrigin};
pub use dispatch::{handle_plugin_command, plugin_argv, DispatchOutcome};
pub use exec::{
    current_environment, default_executor, Environment, ProcessExecutor, SpawnExecutor,
};
#[cfg(unix)]
pub use exec::ReplaceExecutor;
pub use fold::{fold, fold_window, FoldMatch};
pub use managed::ManagedResolver;
pub use name::{normalize_token, plugin_name, plugin_name_for_command, PLUGIN_NAMESPACE};
pub use resolver::{find_executable, is_executable, parse_system_path, LocalResolver, PluginResolver};
pub use seen::SeenPlugins;
