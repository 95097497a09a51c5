//! Plugin registry collaborator.
//!
//! A registry tracks plugin installations managed outside this machine
//! (for example by a team-wide plugin service). It answers two questions:
//! which plugins provide a given command, and where the binary for one of
//! them lives locally once installed.
//!
//! - [`PluginRegistry`] - the collaborator contract
//! - [`HttpRegistry`] - registry service reached over HTTP
//! - [`PluginInstaller`] - on-demand download into the local plugin directory

pub mod http;
pub mod install;
pub mod record;

use std::path::PathBuf;

use crate::error::Result;

pub use http::HttpRegistry;
pub use install::PluginInstaller;
pub use record::{PluginBinary, PluginRecord};

/// Source of registry-managed plugins.
pub trait PluginRegistry {
    /// Records whose command label equals `command`, in registry order.
    fn find_by_command(&self, command: &str) -> Result<Vec<PluginRecord>>;

    /// Every record known to the registry.
    fn list(&self) -> Result<Vec<PluginRecord>>;

    /// Make sure `record`'s binary exists locally and return its path.
    fn ensure_installed(&self, record: &PluginRecord) -> Result<PathBuf>;
}
