//! In-memory sink for tests

use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::Sink;

/// Shared handle to the lines captured by a [`MemorySink`]
///
/// Cloning shares the underlying buffer, so a handle returned at handler
/// creation keeps observing lines written later.
#[derive(Debug, Clone, Default)]
pub struct MemoryBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of captured lines
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether no lines have been captured
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drop all captured lines
    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn push(&self, line: String) {
        self.lines.lock().push(line);
    }
}

/// Sink capturing rendered lines in memory
///
/// The test-facing counterpart of the console and file sinks; assertions go
/// through the shared [`MemoryBuffer`].
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: MemoryBuffer,
}

impl MemorySink {
    /// Create a new memory sink with an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared buffer this sink appends to
    pub fn buffer(&self) -> MemoryBuffer {
        self.buffer.clone()
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) {
        self.buffer.push(line.to_string());
    }

    fn flush(&self) {}
}
