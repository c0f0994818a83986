//! Output handlers: severity-filtered, format-carrying sinks

mod console;
mod file;
mod handler;
mod memory;
mod traits;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use handler::Handler;
pub use memory::{MemoryBuffer, MemorySink};
pub use traits::Sink;
