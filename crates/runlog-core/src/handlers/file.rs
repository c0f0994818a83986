//! Append-mode file sink

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::traits::Sink;

/// Sink appending UTF-8 lines to a log file
///
/// The file is opened in append mode and flushed after every line. Writes
/// take an internal lock, so concurrent writers through a shared handler
/// interleave whole lines.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating it and any missing parent
    /// directories as needed
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let mut options = OpenOptions::new();
        options.create(true).append(true);

        let file = match options.open(&path) {
            Ok(file) => file,
            Err(err) => match path.parent() {
                Some(parent) => {
                    std::fs::create_dir_all(parent)?;
                    options.open(&path)?
                }
                None => return Err(err),
            },
        };

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
}

impl Sink for FileSink {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        let _ = writeln!(file, "{}", line);
        let _ = file.flush();
    }

    fn flush(&self) {
        let _ = self.file.lock().flush();
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
