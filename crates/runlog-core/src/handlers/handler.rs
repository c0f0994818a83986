//! Handler: a sink plus the severity threshold and line format applied to it

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::console::ConsoleSink;
use super::file::FileSink;
use super::memory::{MemoryBuffer, MemorySink};
use super::traits::Sink;
use crate::format::{Format, Record};
use crate::level::Level;

/// A configured output destination
///
/// Handlers are shared between loggers by `Arc`; the severity threshold is
/// behind a lock so `set_handler_level` on any owning logger is visible to
/// all of them. The format is fixed at construction.
pub struct Handler {
    level: RwLock<Level>,
    format: Format,
    sink: Box<dyn Sink>,
    buffer: Option<MemoryBuffer>,
}

impl Handler {
    /// Handler writing to stderr
    pub fn console(level: Level, format: Format) -> Self {
        Self::new(level, format, Box::new(ConsoleSink::new()), None)
    }

    /// Handler appending to the file at `path`
    pub fn file(path: impl Into<PathBuf>, level: Level, format: Format) -> std::io::Result<Self> {
        let sink = FileSink::open(path)?;
        Ok(Self::new(level, format, Box::new(sink), None))
    }

    /// Handler capturing lines in memory, with the shared buffer to assert
    /// against
    pub fn memory(level: Level, format: Format) -> (Self, MemoryBuffer) {
        let sink = MemorySink::new();
        let buffer = sink.buffer();
        let handler = Self::new(level, format, Box::new(sink), Some(buffer.clone()));
        (handler, buffer)
    }

    fn new(
        level: Level,
        format: Format,
        sink: Box<dyn Sink>,
        buffer: Option<MemoryBuffer>,
    ) -> Self {
        Self {
            level: RwLock::new(level),
            format,
            sink,
            buffer,
        }
    }

    /// Current severity threshold
    pub fn level(&self) -> Level {
        *self.level.read()
    }

    /// Update the severity threshold
    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    /// The line format records are rendered with
    pub fn format(&self) -> Format {
        self.format
    }

    /// Target path for file-backed handlers
    pub fn path(&self) -> Option<&Path> {
        self.sink.path()
    }

    /// The capture buffer of a memory-backed handler
    pub fn buffer(&self) -> Option<MemoryBuffer> {
        self.buffer.clone()
    }

    /// Write one record if it passes this handler's threshold
    pub fn emit(&self, record: &Record<'_>) {
        if record.level < self.level() {
            return;
        }
        self.sink.write_line(&self.format.render(record));
    }

    /// Flush buffered sink output
    pub fn flush(&self) {
        self.sink.flush();
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("level", &self.level())
            .field("format", &self.format)
            .field("path", &self.path())
            .finish()
    }
}
