//! Console sink

use std::io::Write;

use super::traits::Sink;

/// Sink writing lines to the process stderr stream
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Create a new console sink
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, line: &str) {
        let stderr = std::io::stderr();
        let mut guard = stderr.lock();
        let _ = writeln!(guard, "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
