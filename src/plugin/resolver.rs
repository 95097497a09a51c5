//! Plugin resolvers.
//!
//! A [`PluginResolver`] maps a candidate executable name to a path and can
//! hand the process over to it. [`LocalResolver`] searches the executable
//! search path; [`ManagedResolver`](super::ManagedResolver) layers a plugin
//! registry on top of it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{OutrigError, Result};
use crate::plugin::exec::{default_executor, Environment, ProcessExecutor};

/// Lookup and execution of plugin executables.
///
/// The router and the argument folder only ever talk to this trait.
pub trait PluginResolver {
    /// Resolve a full plugin executable name (e.g. `outrig-foo-bar`).
    ///
    /// Returns [`OutrigError::PluginNotFound`] when nothing by that name exists.
    fn lookup(&self, name: &str) -> Result<PathBuf>;

    /// Hand the process over to `path` with the given argument vector and
    /// environment. Only returns on failure for real executors.
    fn execute(&self, path: &Path, args: &[OsString], env: &Environment) -> Result<()>;
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Find an executable by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Names containing
/// a path separator never match, so a token cannot escape the search path.
pub fn find_executable(name: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    if name.is_empty() || name.contains(std::path::is_separator) {
        return None;
    }

    for dir in path_entries {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(name);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Resolves plugins from the local executable search path.
pub struct LocalResolver {
    path_entries: Vec<PathBuf>,
    executor: Box<dyn ProcessExecutor>,
}

impl LocalResolver {
    /// Resolver over the process `PATH` with the platform executor.
    pub fn new() -> Self {
        Self::with_path(parse_system_path())
    }

    /// Resolver over an explicit list of search directories.
    pub fn with_path(path_entries: Vec<PathBuf>) -> Self {
        Self {
            path_entries,
            executor: default_executor(),
        }
    }

    /// Replace the executor used by [`PluginResolver::execute`].
    pub fn with_executor(mut self, executor: Box<dyn ProcessExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Directories searched, in order.
    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_entries
    }
}

impl Default for LocalResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginResolver for LocalResolver {
    fn lookup(&self, name: &str) -> Result<PathBuf> {
        let file_name = format!("{}{}", name, std::env::consts::EXE_SUFFIX);
        find_executable(&file_name, &self.path_entries).ok_or_else(|| {
            OutrigError::PluginNotFound {
                name: name.to_string(),
            }
        })
    }

    fn execute(&self, path: &Path, args: &[OsString], env: &Environment) -> Result<()> {
        self.executor.execute(path, args, env)
    }
}
