//! Process-wide registry of named loggers

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::stamp;

/// Default file-output root, relative to the process working directory
pub const DEFAULT_LOG_DIR: &str = "data/logs";

/// State shared between registry handles and the loggers they created
///
/// Loggers hold a `Weak` reference back to this for `join_handler` lookups.
pub(crate) struct RegistryShared {
    base_dir: PathBuf,
    inner: Mutex<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    run_id: Option<String>,
    loggers: HashMap<String, Arc<Logger>>,
}

impl RegistryShared {
    pub(crate) fn lookup(&self, name: &str) -> Option<Arc<Logger>> {
        self.inner.lock().loggers.get(name).cloned()
    }
}

/// Registry of named [`Logger`] instances
///
/// Cheap to clone; clones share the same logger map, run identifier and
/// base directory. The run identifier is generated once, when the first
/// logger is created, and every logger snapshots it at creation time.
///
/// ```rust,ignore
/// let registry = LogRegistry::new();
/// let logger = registry.get_or_create("ingest");
/// logger.add_console_handler("term", Level::Info, Format::LoggerName);
/// logger.info("starting up");
/// ```
#[derive(Clone)]
pub struct LogRegistry {
    shared: Arc<RegistryShared>,
}

impl LogRegistry {
    /// Registry writing files under [`DEFAULT_LOG_DIR`]
    pub fn new() -> Self {
        Self::with_base_dir(DEFAULT_LOG_DIR)
    }

    /// Registry writing files under an explicit root
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            shared: Arc::new(RegistryShared {
                base_dir: base_dir.into(),
                inner: Mutex::new(RegistryInner::default()),
            }),
        }
    }

    /// File-output root for loggers this registry creates
    pub fn base_dir(&self) -> &Path {
        &self.shared.base_dir
    }

    /// Return the logger registered under `name`, creating it on first use
    ///
    /// The first creation in a registry's lifetime also generates the run
    /// identifier. Repeated calls with the same name return the identical
    /// `Arc` handle.
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        self.get_or_create_with_base(name, self.shared.base_dir.clone())
    }

    /// Like [`LogRegistry::get_or_create`], with a per-logger file-output root
    ///
    /// The directory applies only when the logger is created by this call;
    /// an existing logger keeps the root it was created with.
    pub fn get_or_create_in(&self, name: &str, base_dir: impl Into<PathBuf>) -> Arc<Logger> {
        self.get_or_create_with_base(name, base_dir.into())
    }

    fn get_or_create_with_base(&self, name: &str, base_dir: PathBuf) -> Arc<Logger> {
        let mut inner = self.shared.inner.lock();
        if let Some(existing) = inner.loggers.get(name) {
            return existing.clone();
        }

        // First logger in this registry's lifetime fixes the run identifier
        let run_id = inner
            .run_id
            .get_or_insert_with(stamp::datetime_stamp)
            .clone();

        let logger = Arc::new(Logger::new(
            name.to_string(),
            base_dir,
            run_id,
            Arc::downgrade(&self.shared),
        ));
        inner.loggers.insert(name.to_string(), logger.clone());
        logger
    }

    /// Return the logger registered under `name`, without creating one
    pub fn get_existing(&self, name: &str) -> Result<Arc<Logger>> {
        self.shared
            .lookup(name)
            .ok_or_else(|| Error::LoggerNotFound(name.to_string()))
    }

    /// Regenerate the run identifier as `<YYYY-MM-DD>_<HHMMSS>_<run_name>`
    ///
    /// Loggers created afterwards snapshot the new identifier; existing
    /// loggers and their open files keep the paths they were created with.
    pub fn set_run_name(&self, run_name: &str) {
        self.shared.inner.lock().run_id = Some(stamp::compose_run_id(run_name));
    }

    /// Current run identifier, once the first logger has been created
    pub fn run_id(&self) -> Option<String> {
        self.shared.inner.lock().run_id.clone()
    }

    /// Names of all registered loggers, order unspecified
    pub fn list_names(&self) -> Vec<String> {
        self.shared.inner.lock().loggers.keys().cloned().collect()
    }

    /// Flush and detach the named logger's handlers and unregister it
    ///
    /// Outstanding `Arc<Logger>` handles stay usable but hold no handlers.
    /// No-op when the name is not registered.
    pub fn delete(&self, name: &str) {
        let removed = self.shared.inner.lock().loggers.remove(name);
        // Handler teardown happens outside the registry lock
        if let Some(logger) = removed {
            logger.detach_all();
        }
    }

    /// Delete every logger and clear the run identifier
    ///
    /// The next `get_or_create` starts a fresh run.
    pub fn reset(&self) {
        let drained: Vec<Arc<Logger>> = {
            let mut inner = self.shared.inner.lock();
            inner.run_id = None;
            inner.loggers.drain().map(|(_, logger)| logger).collect()
        };
        for logger in drained {
            logger.detach_all();
        }
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("LogRegistry")
            .field("base_dir", &self.shared.base_dir)
            .field("run_id", &inner.run_id)
            .field("loggers", &inner.loggers.keys().collect::<Vec<_>>())
            .finish()
    }
}

static GLOBAL: Lazy<LogRegistry> = Lazy::new(LogRegistry::new);

/// [`LogRegistry::get_or_create`] on the process-wide default registry
pub fn get_or_create(name: &str) -> Arc<Logger> {
    GLOBAL.get_or_create(name)
}

/// [`LogRegistry::get_existing`] on the process-wide default registry
pub fn get_existing(name: &str) -> Result<Arc<Logger>> {
    GLOBAL.get_existing(name)
}

/// [`LogRegistry::set_run_name`] on the process-wide default registry
pub fn set_run_name(run_name: &str) {
    GLOBAL.set_run_name(run_name)
}

/// [`LogRegistry::run_id`] on the process-wide default registry
pub fn run_id() -> Option<String> {
    GLOBAL.run_id()
}

/// [`LogRegistry::list_names`] on the process-wide default registry
pub fn list_names() -> Vec<String> {
    GLOBAL.list_names()
}

/// [`LogRegistry::delete`] on the process-wide default registry
pub fn delete(name: &str) {
    GLOBAL.delete(name)
}

/// [`LogRegistry::reset`] on the process-wide default registry
pub fn reset() {
    GLOBAL.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use crate::level::Level;

    fn registry_in_tempdir() -> (tempfile::TempDir, LogRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = LogRegistry::with_base_dir(dir.path());
        (dir, registry)
    }

    #[test]
    fn test_get_or_create_returns_same_instance() {
        let (_dir, registry) = registry_in_tempdir();

        let first = registry.get_or_create("svc");
        let second = registry.get_or_create("svc");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "svc");
    }

    #[test]
    fn test_run_id_generated_once() {
        let (_dir, registry) = registry_in_tempdir();
        assert_eq!(registry.run_id(), None);

        let a = registry.get_or_create("a");
        let run_id = registry.run_id().unwrap();
        assert_eq!(a.run_id(), run_id);

        // Later loggers see the identifier the first creation fixed
        let b = registry.get_or_create("b");
        assert_eq!(b.run_id(), run_id);
    }

    #[test]
    fn test_set_run_name_applies_to_later_loggers() {
        let (_dir, registry) = registry_in_tempdir();
        let a = registry.get_or_create("a");

        registry.set_run_name("experiment");
        let b = registry.get_or_create("b");

        assert!(b.run_id().ends_with("_experiment"));
        assert!(b.run_id().starts_with(&stamp::datestamp()));
        assert!(!a.run_id().ends_with("_experiment"));
        assert_eq!(registry.run_id().as_deref(), Some(b.run_id()));
    }

    #[test]
    fn test_get_existing() {
        let (_dir, registry) = registry_in_tempdir();
        let created = registry.get_or_create("svc");

        let found = registry.get_existing("svc").unwrap();
        assert!(Arc::ptr_eq(&created, &found));

        assert!(matches!(
            registry.get_existing("ghost"),
            Err(Error::LoggerNotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_list_names() {
        let (_dir, registry) = registry_in_tempdir();
        registry.get_or_create("a");
        registry.get_or_create("b");

        let mut names = registry.list_names();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_delete_detaches_and_unregisters() {
        let (_dir, registry) = registry_in_tempdir();
        let old = registry.get_or_create("svc");
        old.add_memory_handler("m", Level::Debug, Format::Basic);

        registry.delete("svc");

        assert!(registry.list_names().is_empty());
        assert!(old.handler_names().is_empty());

        // Recreation yields a brand-new logger with no handlers
        let fresh = registry.get_or_create("svc");
        assert!(!Arc::ptr_eq(&old, &fresh));
        assert!(fresh.handler_names().is_empty());

        // Deleting an unknown name is a no-op
        registry.delete("ghost");
    }

    #[test]
    fn test_deleted_logger_cannot_be_joined() {
        let (_dir, registry) = registry_in_tempdir();
        let a = registry.get_or_create("a");
        let b = registry.get_or_create("b");
        a.add_memory_handler("m", Level::Debug, Format::Basic);

        registry.delete("a");

        assert!(matches!(
            b.join_handler("a", "m"),
            Err(Error::LoggerNotFound(name)) if name == "a"
        ));
    }

    #[test]
    fn test_join_after_registry_dropped() {
        let (_dir, registry) = registry_in_tempdir();
        let a = registry.get_or_create("a");
        let b = registry.get_or_create("b");
        a.add_memory_handler("m", Level::Debug, Format::Basic);

        drop(registry);

        // Loggers stay usable, but cross-logger lookups have nowhere to go
        assert!(matches!(
            b.join_handler("a", "m"),
            Err(Error::LoggerNotFound(_))
        ));
    }

    #[test]
    fn test_reset_clears_loggers_and_run_id() {
        let (_dir, registry) = registry_in_tempdir();
        let old = registry.get_or_create("a");
        old.add_memory_handler("m", Level::Debug, Format::Basic);
        registry.get_or_create("b");
        assert!(registry.run_id().is_some());

        registry.reset();

        assert!(registry.list_names().is_empty());
        assert_eq!(registry.run_id(), None);
        assert!(old.handler_names().is_empty());

        registry.get_or_create("c");
        assert!(registry.run_id().is_some());
    }

    #[test]
    fn test_per_logger_base_dir() {
        let (dir, registry) = registry_in_tempdir();
        let other_root = dir.path().join("elsewhere");

        let default_based = registry.get_or_create("default");
        assert_eq!(default_based.base_dir(), dir.path());

        let custom = registry.get_or_create_in("custom", &other_root);
        assert_eq!(custom.base_dir(), other_root.as_path());

        // The directory argument only applies on creation
        let again = registry.get_or_create_in("custom", dir.path().join("third"));
        assert!(Arc::ptr_eq(&custom, &again));
        assert_eq!(again.base_dir(), other_root.as_path());
    }

    #[test]
    fn test_default_base_dir() {
        assert_eq!(LogRegistry::new().base_dir(), Path::new(DEFAULT_LOG_DIR));
        assert_eq!(
            LogRegistry::default().base_dir(),
            Path::new(DEFAULT_LOG_DIR)
        );
    }

    #[test]
    fn test_clones_share_state() {
        let (_dir, registry) = registry_in_tempdir();
        let clone = registry.clone();

        let a = registry.get_or_create("shared");
        let b = clone.get_or_create("shared");
        assert!(Arc::ptr_eq(&a, &b));

        clone.set_run_name("tagged");
        assert!(registry.run_id().unwrap().ends_with("_tagged"));
    }

    #[test]
    fn test_global_free_functions() {
        // Only this test touches the process-wide default registry
        let logger = get_or_create("global_smoke");
        let again = get_or_create("global_smoke");
        assert!(Arc::ptr_eq(&logger, &again));

        let buffer = logger.add_memory_handler("m", Level::Debug, Format::LoggerName);
        logger.info("through the default registry");
        assert!(buffer.lines()[0].contains("global_smoke - INFO"));

        assert!(list_names().contains(&"global_smoke".to_string()));
        assert!(run_id().is_some());

        delete("global_smoke");
        assert!(get_existing("global_smoke").is_err());

        reset();
        assert!(list_names().is_empty());
        assert_eq!(run_id(), None);
    }
}
