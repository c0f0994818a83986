//! Runlog Core
//!
//! Named logger instances with per-run, per-day file output.
//! A registry hands out loggers by name; each logger carries its own set of
//! named handlers (console, file, in-memory) with independent severity
//! levels and line formats. File handlers write under
//! `<base_dir>/<YYYY-MM-DD>/<run_id>/<run_id>_<handler_name>.log`.
//!
//! ## Getting a logger
//!
//! ```rust,ignore
//! use runlog_core::{get_or_create, Format, Level};
//!
//! let logger = get_or_create("ingest");
//! logger.add_console_handler("term", Level::Info, Format::LoggerName);
//! logger.add_file_handler("main", Level::Debug, Format::Basic)?;
//!
//! logger.info("starting up");
//! log_warn!(logger, "queue depth {}", depth);
//! ```

pub mod error;
pub mod format;
pub mod handlers;
pub mod level;
pub mod logger;
pub mod registry;
pub mod stamp;

// Re-export commonly used types
pub use error::{Error, Result};

pub use format::{Format, Record};

pub use handlers::{ConsoleSink, FileSink, Handler, MemoryBuffer, MemorySink, Sink};

pub use level::{Level, ParseLevelError};

pub use logger::Logger;

pub use registry::{
    LogRegistry, DEFAULT_LOG_DIR,
    delete, get_existing, get_or_create, list_names, reset, run_id, set_run_name,
};
