//! Named logger instances and their handler lifecycle

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use chrono::Local;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::format::{Format, Record};
use crate::handlers::{Handler, MemoryBuffer};
use crate::level::Level;
use crate::registry::RegistryShared;
use crate::stamp;

/// One named logger
///
/// Loggers are created through [`LogRegistry::get_or_create`] and shared as
/// `Arc<Logger>`; looking the same name up again returns the same instance.
/// Each logger owns a map from handler name to shared [`Handler`], and a
/// handler may be attached to several loggers at once (see
/// [`Logger::join_handler`]).
///
/// File handlers write under
/// `<base_dir>/<YYYY-MM-DD>/<run_id>/<run_id>_<handler_name>.log`, where
/// `run_id` was snapshotted from the registry when the logger was created.
///
/// [`LogRegistry::get_or_create`]: crate::registry::LogRegistry::get_or_create
pub struct Logger {
    name: String,
    base_dir: PathBuf,
    run_id: String,
    level: RwLock<Level>,
    handlers: RwLock<HashMap<String, Arc<Handler>>>,
    registry: Weak<RegistryShared>,
}

impl Logger {
    /// Severity constants, so callers do not need a separate import
    pub const DEBUG: Level = Level::Debug;
    pub const INFO: Level = Level::Info;
    pub const WARNING: Level = Level::Warning;
    /// Alias for [`Logger::WARNING`]
    pub const WARN: Level = Level::Warning;
    pub const ERROR: Level = Level::Error;
    pub const CRITICAL: Level = Level::Critical;

    pub(crate) fn new(
        name: String,
        base_dir: PathBuf,
        run_id: String,
        registry: Weak<RegistryShared>,
    ) -> Self {
        Self {
            name,
            base_dir,
            run_id,
            // Most permissive, so handler thresholds decide what is kept
            level: RwLock::new(Level::Debug),
            handlers: RwLock::new(HashMap::new()),
            registry,
        }
    }

    /// This logger's registry key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run identifier snapshotted at creation
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Root directory for this logger's file handlers
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<base_dir>/<YYYY-MM-DD>` for the current date
    pub fn date_dir(&self) -> PathBuf {
        self.base_dir.join(stamp::datestamp())
    }

    /// `<base_dir>/<YYYY-MM-DD>/<run_id>` for the current date
    pub fn run_dir(&self) -> PathBuf {
        self.date_dir().join(&self.run_id)
    }

    /// The logger's own minimum capture level
    ///
    /// Gates record production before per-handler thresholds apply.
    pub fn level(&self) -> Level {
        *self.level.read()
    }

    /// Update the logger's own minimum capture level
    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    // ---- handler lifecycle -------------------------------------------------

    /// Attach a console (stderr) handler under `handler_name`
    ///
    /// If a handler with that name is already attached, the existing handler
    /// is kept untouched and a warning is logged through this logger.
    pub fn add_console_handler(&self, handler_name: &str, level: Level, format: Format) {
        self.try_attach(handler_name, Arc::new(Handler::console(level, format)));
    }

    /// Attach a file handler under `handler_name`
    ///
    /// The target file is
    /// `<base_dir>/<YYYY-MM-DD>/<run_id>/<run_id>_<handler_name>.log`, opened
    /// in append mode; the date and run directories are created if missing.
    /// Once attached, a debug record announcing the handler and its path is
    /// emitted through this logger.
    ///
    /// A duplicate name keeps the existing handler untouched and logs a
    /// warning instead.
    pub fn add_file_handler(&self, handler_name: &str, level: Level, format: Format) -> Result<()> {
        if self.has_handler(handler_name) {
            self.warn_duplicate(handler_name);
            return Ok(());
        }

        let run_dir = self.create_run_dir()?;
        let path = run_dir.join(format!("{}_{}.log", self.run_id, handler_name));
        let handler = Arc::new(Handler::file(&path, level, format)?);

        if self.try_attach(handler_name, handler) {
            self.debug(&format!(
                "file handler \"{}\" added to logger \"{}\" at {}",
                handler_name,
                self.name,
                path.display()
            ));
        }
        Ok(())
    }

    /// Attach an in-memory handler under `handler_name` and return the
    /// shared buffer of captured lines
    ///
    /// A duplicate name logs a warning and returns the buffer already
    /// attached under that name when it is memory-backed, or a detached
    /// empty buffer otherwise.
    pub fn add_memory_handler(
        &self,
        handler_name: &str,
        level: Level,
        format: Format,
    ) -> MemoryBuffer {
        if let Some(existing) = self.handler(handler_name) {
            self.warn_duplicate(handler_name);
            return existing.buffer().unwrap_or_default();
        }

        let (handler, buffer) = Handler::memory(level, format);
        self.try_attach(handler_name, Arc::new(handler));
        buffer
    }

    /// Attach a handler owned by another logger, sharing the same sink
    ///
    /// Looks up `logger_name` in the registry this logger came from and
    /// attaches its handler named `handler_name` to this logger under the
    /// same name. Records from both loggers then interleave in the shared
    /// sink in emission order.
    ///
    /// Fails with [`Error::LoggerNotFound`] or [`Error::HandlerNotFound`]
    /// when either lookup misses. A duplicate name on this logger keeps the
    /// existing handler and logs a warning, like the other add operations.
    pub fn join_handler(&self, logger_name: &str, handler_name: &str) -> Result<()> {
        // All registry handles gone means the source cannot be looked up
        let registry = self
            .registry
            .upgrade()
            .ok_or_else(|| Error::LoggerNotFound(logger_name.to_string()))?;
        let source = registry
            .lookup(logger_name)
            .ok_or_else(|| Error::LoggerNotFound(logger_name.to_string()))?;
        let handler = source
            .handler(handler_name)
            .ok_or_else(|| Error::handler_not_found(logger_name, handler_name))?;

        self.try_attach(handler_name, handler);
        Ok(())
    }

    /// Detach the handler under `handler_name`, flushing it first
    ///
    /// Logs a warning through this logger when no such handler is attached.
    pub fn remove_handler(&self, handler_name: &str) {
        let removed = self.handlers.write().remove(handler_name);
        match removed {
            Some(handler) => handler.flush(),
            None => self.warning(&format!(
                "cannot remove handler \"{}\": not attached to logger \"{}\"",
                handler_name, self.name
            )),
        }
    }

    /// Update the severity threshold of an attached handler
    ///
    /// The change is visible to every logger sharing the handler. Logs a
    /// warning through this logger when no such handler is attached.
    pub fn set_handler_level(&self, handler_name: &str, level: Level) {
        match self.handler(handler_name) {
            Some(handler) => handler.set_level(level),
            None => self.warning(&format!(
                "cannot set level for handler \"{}\": not attached to logger \"{}\"",
                handler_name, self.name
            )),
        }
    }

    /// The handler attached under `handler_name`, if any
    pub fn handler(&self, handler_name: &str) -> Option<Arc<Handler>> {
        self.handlers.read().get(handler_name).cloned()
    }

    /// Whether a handler is attached under `handler_name`
    pub fn has_handler(&self, handler_name: &str) -> bool {
        self.handlers.read().contains_key(handler_name)
    }

    /// Names of all attached handlers, order unspecified
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers.read().keys().cloned().collect()
    }

    /// Flush and detach every handler
    pub(crate) fn detach_all(&self) {
        let mut handlers = self.handlers.write();
        for handler in handlers.values() {
            handler.flush();
        }
        handlers.clear();
    }

    // ---- log directory maintenance -----------------------------------------

    /// Recursively delete today's date directory, if it exists
    pub fn clear_todays_logs(&self) -> Result<()> {
        let date_dir = self.date_dir();
        if date_dir.exists() {
            std::fs::remove_dir_all(&date_dir)?;
        }
        Ok(())
    }

    /// Delete every entry directly under the base directory
    ///
    /// Directories are removed recursively; the base directory itself stays.
    pub fn clear_all_logs(&self) -> Result<()> {
        if !self.base_dir.exists() {
            return Ok(());
        }
        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                std::fs::remove_dir_all(entry.path())?;
            } else {
                std::fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    // ---- emission ----------------------------------------------------------

    /// Log a debug message
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Log an info message
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Log a warning message; alias for [`Logger::warning`]
    pub fn warn(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    /// Log a warning message
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    /// Log an error message
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Log a critical message
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }

    /// Log a message at an explicit level, with no source information
    pub fn log(&self, level: Level, message: &str) {
        self.log_with(level, None, None, None, message);
    }

    /// Structured entry point behind the `log_*!` macros
    ///
    /// Produces a record when `level` passes this logger's own minimum and
    /// hands it to every attached handler, each filtering by its own
    /// threshold.
    pub fn log_with(
        &self,
        level: Level,
        module: Option<&str>,
        function: Option<&str>,
        line: Option<u32>,
        message: &str,
    ) {
        if level < self.level() {
            return;
        }

        let record = Record {
            timestamp: Local::now(),
            logger: self.name.as_str(),
            level,
            module,
            function,
            line,
            message,
        };

        let handlers = self.handlers.read();
        for handler in handlers.values() {
            handler.emit(&record);
        }
    }

    // ---- internals ---------------------------------------------------------

    /// Insert `handler` under `name` unless the slot is taken
    ///
    /// The warning is emitted after the map guard is dropped, so a logger
    /// can always log through itself.
    fn try_attach(&self, name: &str, handler: Arc<Handler>) -> bool {
        let inserted = {
            let mut handlers = self.handlers.write();
            if handlers.contains_key(name) {
                false
            } else {
                handlers.insert(name.to_string(), handler);
                true
            }
        };
        if !inserted {
            self.warn_duplicate(name);
        }
        inserted
    }

    fn warn_duplicate(&self, handler_name: &str) {
        self.warning(&format!(
            "handler \"{}\" already exists on logger \"{}\"",
            handler_name, self.name
        ));
    }

    fn create_run_dir(&self) -> Result<PathBuf> {
        let run_dir = self.run_dir();
        // Racing creators and pre-existing directories are both fine
        std::fs::create_dir_all(&run_dir)?;
        Ok(run_dir)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("run_id", &self.run_id)
            .field("level", &self.level())
            .field("handlers", &self.handler_names())
            .finish()
    }
}

/// Log a debug message with call-site module and line captured
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log_with(
            $crate::Level::Debug,
            Some(module_path!()),
            None,
            Some(line!()),
            &format!($($arg)*),
        )
    };
}

/// Log an info message with call-site module and line captured
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log_with(
            $crate::Level::Info,
            Some(module_path!()),
            None,
            Some(line!()),
            &format!($($arg)*),
        )
    };
}

/// Log a warning with call-site module and line captured
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log_with(
            $crate::Level::Warning,
            Some(module_path!()),
            None,
            Some(line!()),
            &format!($($arg)*),
        )
    };
}

/// Log an error with call-site module and line captured
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log_with(
            $crate::Level::Error,
            Some(module_path!()),
            None,
            Some(line!()),
            &format!($($arg)*),
        )
    };
}

/// Log a critical message with call-site module and line captured
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log_with(
            $crate::Level::Critical,
            Some(module_path!()),
            None,
            Some(line!()),
            &format!($($arg)*),
        )
    };
}
