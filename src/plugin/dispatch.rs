//! Plugin dispatch for unknown commands.

use std::ffi::{OsStr, OsString};
use std::fmt::Debug;
use std::path::Path;

use crate::error::Result;
use crate::plugin::exec::Environment;
use crate::plugin::fold::fold;
use crate::plugin::resolver::PluginResolver;

/// What happened when dispatch was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No prefix of the command path names a plugin.
    NoMatch,
    /// The resolver's executor accepted the plugin.
    ///
    /// Real executors never return on success, so this is only observed
    /// with test doubles.
    Executed,
}

/// Build the argument vector handed to a plugin: the executable path
/// followed by every argument not folded into the plugin name.
pub fn plugin_argv<S: AsRef<OsStr>>(path: &Path, remaining: &[S]) -> Vec<OsString> {
    let mut argv = Vec::with_capacity(remaining.len() + 1);
    argv.push(path.as_os_str().to_os_string());
    argv.extend(remaining.iter().map(|arg| arg.as_ref().to_os_string()));
    argv
}

/// Try to run a plugin for `args` (the command path after the program name).
///
/// `NoMatch` is a normal outcome and lets the caller fall back to its own
/// unknown-command handling. Errors after a plugin was selected (install
/// or exec) are returned for the caller to report.
pub fn handle_plugin_command<S: AsRef<OsStr> + Debug>(
    resolver: &dyn PluginResolver,
    args: &[S],
    env: &Environment,
) -> Result<DispatchOutcome> {
    let Some(found) = fold(args, resolver)? else {
        tracing::debug!("No plugin matches {:?}", args);
        return Ok(DispatchOutcome::NoMatch);
    };

    let argv = plugin_argv(&found.path, found.remaining_args(args));
    tracing::debug!("Dispatching to plugin {}", found.path.display());
    resolver.execute(&found.path, &argv, env)?;
    Ok(DispatchOutcome::Executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutrigError;
    use crate::plugin::resolver::tests::{create_plugin, RecordingExecutor};
    use crate::plugin::resolver::LocalResolver;
    use crate::plugin::exec::ProcessExecutor;
    use tempfile::TempDir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn os_args(items: &[&str]) -> Vec<OsString> {
        items.iter().map(OsString::from).collect()
    }

    fn fixture_env() -> Environment {
        vec![
            (OsString::from("OUTRIG_FIXTURE"), OsString::from("yes")),
            (OsString::from("PATH"), OsString::from("/fixture/bin")),
        ]
    }

    #[test]
    fn executes_longest_match_with_trailing_args() {
        let dir = TempDir::new().unwrap();
        create_plugin(dir.path(), "outrig-foo");
        let plugin = create_plugin(dir.path(), "outrig-foo-bar");

        let recorder = RecordingExecutor::default();
        let resolver = LocalResolver::with_path(vec![dir.path().to_path_buf()])
            .with_executor(Box::new(recorder.clone()));

        let outcome =
            handle_plugin_command(&resolver, &args(&["foo", "bar", "-x", "baz"]), &fixture_env())
                .unwrap();
        assert_eq!(outcome, DispatchOutcome::Executed);

        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (path, argv, _) = &calls[0];
        assert_eq!(path, &plugin);
        let mut expected = vec![plugin.clone().into_os_string()];
        expected.extend(os_args(&["-x", "baz"]));
        assert_eq!(argv, &expected);
    }

    #[test]
    fn environment_is_relayed_unmodified() {
        let dir = TempDir::new().unwrap();
        create_plugin(dir.path(), "outrig-foo");

        let recorder = RecordingExecutor::default();
        let resolver = LocalResolver::with_path(vec![dir.path().to_path_buf()])
            .with_executor(Box::new(recorder.clone()));

        let env = fixture_env();
        handle_plugin_command(&resolver, &args(&["foo"]), &env).unwrap();
        assert_eq!(recorder.calls.borrow()[0].2, env);
    }

    #[test]
    fn no_match_does_not_execute() {
        let dir = TempDir::new().unwrap();
        let recorder = RecordingExecutor::default();
        let resolver = LocalResolver::with_path(vec![dir.path().to_path_buf()])
            .with_executor(Box::new(recorder.clone()));

        let outcome = handle_plugin_command(&resolver, &args(&["nope", "-v"]), &fixture_env())
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::NoMatch);
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn exec_failure_is_surfaced() {
        struct FailingExecutor;
        impl ProcessExecutor for FailingExecutor {
            fn execute(&self, path: &Path, _: &[OsString], _: &Environment) -> Result<()> {
                Err(OutrigError::ExecFailed {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                })
            }
        }

        let dir = TempDir::new().unwrap();
        create_plugin(dir.path(), "outrig-foo");
        let resolver = LocalResolver::with_path(vec![dir.path().to_path_buf()])
            .with_executor(Box::new(FailingExecutor));

        let err = handle_plugin_command(&resolver, &args(&["foo"]), &fixture_env()).unwrap_err();
        assert!(matches!(err, OutrigError::ExecFailed { .. }));
    }

    #[test]
    fn argv_starts_with_executable_path() {
        let argv = plugin_argv(Path::new("/bin/outrig-foo"), &args(&["a", "b"]));
        assert_eq!(argv, os_args(&["/bin/outrig-foo", "a", "b"]));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_reach_the_plugin_unchanged() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let plugin = create_plugin(dir.path(), "outrig-foo");

        let recorder = RecordingExecutor::default();
        let resolver = LocalResolver::with_path(vec![dir.path().to_path_buf()])
            .with_executor(Box::new(recorder.clone()));

        let raw = OsStr::from_bytes(b"file-\xff.txt").to_os_string();
        let input = vec![OsString::from("foo"), raw.clone()];
        let outcome = handle_plugin_command(&resolver, &input, &fixture_env()).unwrap();
        assert_eq!(outcome, DispatchOutcome::Executed);
        assert_eq!(
            recorder.calls.borrow()[0].1,
            vec![plugin.into_os_string(), raw]
        );
    }
}
