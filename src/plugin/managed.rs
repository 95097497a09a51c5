//! Registry-backed plugin resolution.

use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::plugin::exec::Environment;
use crate::plugin::resolver::{LocalResolver, PluginResolver};
use crate::plugin::seen::SeenPlugins;
use crate::registry::PluginRegistry;

/// Resolves plugins through a registry first, then the local search path.
///
/// When the registry has one or more records for a command, the first one
/// is installed on demand and its local path returned. When it has none,
/// or cannot be queried, the wrapped [`LocalResolver`] answers instead.
pub struct ManagedResolver {
    registry: Box<dyn PluginRegistry>,
    local: LocalResolver,
    seen: RefCell<SeenPlugins>,
    registry_warned: Cell<bool>,
}

impl ManagedResolver {
    pub fn new(registry: Box<dyn PluginRegistry>, local: LocalResolver) -> Self {
        Self::with_seen(registry, local, SeenPlugins::new())
    }

    /// Resolver that continues from an existing set of reported plugins.
    pub fn with_seen(
        registry: Box<dyn PluginRegistry>,
        local: LocalResolver,
        seen: SeenPlugins,
    ) -> Self {
        Self {
            registry,
            local,
            seen: RefCell::new(seen),
            registry_warned: Cell::new(false),
        }
    }

    /// The local fallback.
    pub fn local(&self) -> &LocalResolver {
        &self.local
    }

    /// Plugins selected so far, keyed by command name.
    pub fn into_seen(self) -> SeenPlugins {
        self.seen.into_inner()
    }
}

impl PluginResolver for ManagedResolver {
    fn lookup(&self, name: &str) -> Result<PathBuf> {
        let records = match self.registry.find_by_command(name) {
            Ok(records) => records,
            Err(e) => {
                if !self.registry_warned.replace(true) {
                    tracing::warn!("{}; falling back to local plugins", e);
                }
                Vec::new()
            }
        };

        let Some(found) = records.first() else {
            return self.local.lookup(name);
        };

        let first_seen = self.seen.borrow_mut().record(name, &found.name);
        if records.len() > 1 && first_seen {
            tracing::warn!(
                "More than one plugin installed for {}. Selecting the one installed as {}",
                name,
                found.name
            );
        }

        self.registry.ensure_installed(found)
    }

    fn execute(&self, path: &Path, args: &[OsString], env: &Environment) -> Result<()> {
        self.local.execute(path, args, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutrigError;
    use crate::plugin::resolver::tests::{create_plugin, RecordingExecutor};
    use crate::registry::PluginRecord;
    use std::io::Write;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Log sink shared between a test and its subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with warnings captured, returning its result and the log text.
    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (result, text)
    }

    /// In-memory registry that records queries and installs.
    #[derive(Default)]
    struct FakeRegistry {
        records: Vec<PluginRecord>,
        fail_queries: bool,
        fail_installs: bool,
        queries: Rc<RefCell<Vec<String>>>,
        installs: Rc<RefCell<Vec<String>>>,
    }

    impl PluginRegistry for FakeRegistry {
        fn find_by_command(&self, command: &str) -> Result<Vec<PluginRecord>> {
            self.queries.borrow_mut().push(command.to_string());
            if self.fail_queries {
                return Err(OutrigError::RegistryQuery {
                    message: "connection refused".into(),
                });
            }
            Ok(self
                .records
                .iter()
                .filter(|r| r.command == command)
                .cloned()
                .collect())
        }

        fn list(&self) -> Result<Vec<PluginRecord>> {
            Ok(self.records.clone())
        }

        fn ensure_installed(&self, record: &PluginRecord) -> Result<PathBuf> {
            self.installs.borrow_mut().push(record.name.clone());
            if self.fail_installs {
                return Err(OutrigError::InstallFailed {
                    plugin: record.name.clone(),
                    message: "download failed".into(),
                });
            }
            Ok(PathBuf::from("/managed").join(&record.name).join(&record.command))
        }
    }

    fn record(name: &str, command: &str) -> PluginRecord {
        PluginRecord {
            name: name.into(),
            command: command.into(),
            version: None,
            description: None,
            binaries: Vec::new(),
        }
    }

    fn local_with(names: &[&str]) -> (TempDir, LocalResolver) {
        let dir = TempDir::new().unwrap();
        for name in names {
            create_plugin(dir.path(), name);
        }
        let resolver = LocalResolver::with_path(vec![dir.path().to_path_buf()]);
        (dir, resolver)
    }

    #[test]
    fn registry_record_is_installed_and_returned() {
        let registry = FakeRegistry {
            records: vec![record("preview", "outrig-preview")],
            ..Default::default()
        };
        let installs = registry.installs.clone();
        let (_dir, local) = local_with(&["outrig-preview"]);

        let resolver = ManagedResolver::new(Box::new(registry), local);
        let path = resolver.lookup("outrig-preview").unwrap();

        assert_eq!(path, PathBuf::from("/managed/preview/outrig-preview"));
        assert_eq!(*installs.borrow(), vec!["preview".to_string()]);
    }

    #[test]
    fn first_of_several_records_wins() {
        let registry = FakeRegistry {
            records: vec![
                record("preview-a", "outrig-preview"),
                record("preview-b", "outrig-preview"),
            ],
            ..Default::default()
        };
        let (_dir, local) = local_with(&[]);

        let resolver = ManagedResolver::new(Box::new(registry), local);
        let path = resolver.lookup("outrig-preview").unwrap();
        assert!(path.starts_with("/managed/preview-a"));

        let seen = resolver.into_seen();
        assert_eq!(seen.selected("outrig-preview"), Some("preview-a"));
    }

    #[test]
    fn ambiguity_warning_names_selection_once_per_label() {
        let registry = FakeRegistry {
            records: vec![
                record("preview-a", "outrig-preview"),
                record("preview-b", "outrig-preview"),
            ],
            ..Default::default()
        };
        let (_dir, local) = local_with(&[]);
        let resolver = ManagedResolver::new(Box::new(registry), local);

        let (_, logs) = capture_warnings(|| {
            resolver.lookup("outrig-preview").unwrap();
            resolver.lookup("outrig-preview").unwrap();
        });

        assert_eq!(logs.matches("More than one plugin installed").count(), 1);
        assert!(logs.contains("outrig-preview"));
        assert!(logs.contains("preview-a"));
        assert!(!logs.contains("preview-b"));
    }

    #[test]
    fn single_record_does_not_warn() {
        let registry = FakeRegistry {
            records: vec![record("preview", "outrig-preview")],
            ..Default::default()
        };
        let (_dir, local) = local_with(&[]);
        let resolver = ManagedResolver::new(Box::new(registry), local);

        let (_, logs) = capture_warnings(|| resolver.lookup("outrig-preview").unwrap());
        assert!(logs.is_empty());
    }

    #[test]
    fn query_failure_warns_once_per_resolver() {
        let registry = FakeRegistry {
            fail_queries: true,
            ..Default::default()
        };
        let queries = registry.queries.clone();
        let (_dir, local) = local_with(&["outrig-foo"]);
        let resolver = ManagedResolver::new(Box::new(registry), local);

        let (_, logs) = capture_warnings(|| {
            assert!(resolver.lookup("outrig-foo-bar").unwrap_err().is_not_found());
            resolver.lookup("outrig-foo").unwrap();
        });

        assert_eq!(queries.borrow().len(), 2);
        assert_eq!(logs.matches("falling back to local plugins").count(), 1);
        assert!(logs.contains("connection refused"));
    }

    #[test]
    fn no_records_falls_back_to_local() {
        let registry = FakeRegistry::default();
        let queries = registry.queries.clone();
        let (dir, local) = local_with(&["outrig-foo"]);

        let resolver = ManagedResolver::new(Box::new(registry), local);
        let path = resolver.lookup("outrig-foo").unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(*queries.borrow(), vec!["outrig-foo".to_string()]);
    }

    #[test]
    fn query_failure_falls_back_to_local() {
        let registry = FakeRegistry {
            records: vec![record("foo", "outrig-foo")],
            fail_queries: true,
            ..Default::default()
        };
        let installs = registry.installs.clone();
        let (dir, local) = local_with(&["outrig-foo"]);

        let resolver = ManagedResolver::new(Box::new(registry), local);
        let path = resolver.lookup("outrig-foo").unwrap();

        assert!(path.starts_with(dir.path()));
        assert!(installs.borrow().is_empty());
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let (_dir, local) = local_with(&[]);
        let resolver = ManagedResolver::new(Box::new(FakeRegistry::default()), local);
        assert!(resolver.lookup("outrig-nope").unwrap_err().is_not_found());
    }

    #[test]
    fn install_failure_is_surfaced_not_masked() {
        let registry = FakeRegistry {
            records: vec![record("foo", "outrig-foo")],
            fail_installs: true,
            ..Default::default()
        };
        let (_dir, local) = local_with(&["outrig-foo"]);

        let resolver = ManagedResolver::new(Box::new(registry), local);
        let err = resolver.lookup("outrig-foo").unwrap_err();
        assert!(matches!(err, OutrigError::InstallFailed { .. }));
    }

    #[test]
    fn execute_delegates_to_local_resolver() {
        let recorder = RecordingExecutor::default();
        let local = LocalResolver::with_path(Vec::new()).with_executor(Box::new(recorder.clone()));
        let resolver = ManagedResolver::new(Box::new(FakeRegistry::default()), local);

        let env: Environment = vec![("OUTRIG_TEST".into(), "1".into())];
        resolver
            .execute(Path::new("/managed/foo"), &["/managed/foo".into()], &env)
            .unwrap();

        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].2, env);
    }
}
