//! Sink trait shared by handler targets

use std::path::Path;

/// Destination for rendered log lines
///
/// Implementations:
/// - `ConsoleSink`: the process stderr stream
/// - `FileSink`: an append-mode log file
/// - `MemorySink`: an in-memory buffer for tests
pub trait Sink: Send + Sync {
    /// Write one rendered line
    ///
    /// Write failures are swallowed rather than propagated.
    fn write_line(&self, line: &str);

    /// Flush buffered output to the underlying target
    fn flush(&self);

    /// Target path for file-backed sinks
    fn path(&self) -> Option<&Path> {
        None
    }
}
