//! Handing the process over to a plugin.
//!
//! Two strategies implement [`ProcessExecutor`]:
//! - [`ReplaceExecutor`] replaces the current process image (unix `execve`)
//! - [`SpawnExecutor`] runs the plugin as a child with inherited stdio, waits,
//!   and exits with the child's status
//!
//! [`default_executor`] picks the right one for the platform, so call sites
//! never branch on `cfg`.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{OutrigError, Result};

/// Environment relayed to a plugin, as `(key, value)` pairs.
pub type Environment = Vec<(OsString, OsString)>;

/// Capture the invoking process's complete environment.
pub fn current_environment() -> Environment {
    std::env::vars_os().collect()
}

/// Capability to hand control to a plugin executable.
///
/// `args` is the full argument vector; by convention `args[0]` is the
/// executable path. `env` is the complete environment for the plugin.
/// Real implementations only return on failure.
pub trait ProcessExecutor {
    /// Run `path` in place of the current process.
    fn execute(&self, path: &Path, args: &[OsString], env: &Environment) -> Result<()>;
}

/// Builds the command shared by both strategies.
fn plugin_command(path: &Path, args: &[OsString], env: &Environment) -> Command {
    let mut cmd = Command::new(path);
    if let Some(rest) = args.get(1..) {
        cmd.args(rest);
    }
    cmd.env_clear();
    cmd.envs(env.iter().map(|(k, v)| (k, v)));
    cmd
}

/// Replaces the current process image with the plugin.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplaceExecutor;

#[cfg(unix)]
impl ProcessExecutor for ReplaceExecutor {
    fn execute(&self, path: &Path, args: &[OsString], env: &Environment) -> Result<()> {
        use std::os::unix::process::CommandExt;

        let mut cmd = plugin_command(path, args, env);
        if let Some(arg0) = args.first() {
            cmd.arg0(arg0);
        }

        tracing::debug!("Replacing process image with {}", path.display());
        // exec only returns if the image could not be replaced
        let source = cmd.exec();
        Err(OutrigError::ExecFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Emulates process replacement by spawning the plugin and mirroring its
/// exit status.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpawnExecutor;

impl SpawnExecutor {
    /// Run the plugin to completion and return the exit code to forward.
    pub fn run(&self, path: &Path, args: &[OsString], env: &Environment) -> Result<i32> {
        let status = plugin_command(path, args, env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| OutrigError::ExecFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(exit_code(status))
    }
}

impl ProcessExecutor for SpawnExecutor {
    fn execute(&self, path: &Path, args: &[OsString], env: &Environment) -> Result<()> {
        tracing::debug!("Spawning {} and forwarding its exit status", path.display());
        let code = self.run(path, args, env)?;
        std::process::exit(code);
    }
}

/// Map a child's exit status to the code this process should exit with.
///
/// A child killed by a signal maps to `128 + signal`, like a shell does.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// The executor native to this platform.
pub fn default_executor() -> Box<dyn ProcessExecutor> {
    #[cfg(unix)]
    {
        Box::new(ReplaceExecutor)
    }

    #[cfg(not(unix))]
    {
        Box::new(SpawnExecutor)
    }
}
