//! Log sink setup
//!
//! In MCP mode stdout carries the protocol, so logs go to
//! `~/.linear-kanban/<log file>` and fall back to stderr when that file
//! cannot be opened. Every other command logs to stderr.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;

/// Directory under the home directory that holds MCP-mode logs
pub const LOG_DIR_NAME: &str = ".linear-kanban";

/// A thread-safe writer that flushes and syncs every write
///
/// Log lines written while serving must be on disk before the client
/// tears the process down.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use std::io::Write;
/// use std::sync::{Arc, Mutex};
/// use linear_kanban_cli::logging::FileWriterGuard;
///
/// let file = File::create("log.txt").unwrap();
/// let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
/// guard.write_all(b"Log message\n").unwrap();
/// ```
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Wrap a shared file
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file mutex was poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Level selected by the global flags; `--quiet` wins over `--debug`,
/// which wins over `--verbose`
pub fn log_level(quiet: bool, debug: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// Where MCP-mode logs are written
pub fn mcp_log_path(log_file: &str) -> PathBuf {
    let log_dir = dirs::home_dir()
        .map(|home| home.join(LOG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_DIR_NAME));
    log_dir.join(log_file)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global tracing subscriber
pub fn init(is_mcp_mode: bool, level: Level, log_file: &str) {
    if is_mcp_mode {
        let path = mcp_log_path(log_file);
        match open_log_file(&path) {
            Ok(file) => {
                let guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
                tracing_subscriber::fmt()
                    .with_writer(move || guard.clone())
                    .with_max_level(Level::DEBUG)
                    .with_ansi(false)
                    .init();
                return;
            }
            Err(e) => {
                eprintln!("Failed to open log file {}, using stderr: {e}", path.display());
            }
        }
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_log_level_precedence() {
        assert_eq!(log_level(true, true, true), Level::ERROR);
        assert_eq!(log_level(false, true, true), Level::DEBUG);
        assert_eq!(log_level(false, false, true), Level::TRACE);
        assert_eq!(log_level(false, false, false), Level::INFO);
    }

    #[test]
    fn test_mcp_log_path_uses_file_name() {
        let path = mcp_log_path("custom.log");
        assert!(path.ends_with(PathBuf::from(LOG_DIR_NAME).join("custom.log")));
    }

    #[test]
    fn test_file_writer_guard_writes_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("mcp.log");
        let file = open_log_file(&path).unwrap();

        let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
        guard.write_all(b"first line\n").unwrap();
        guard.clone().write_all(b"second line\n").unwrap();
        guard.flush().unwrap();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first line\nsecond line\n");
    }
}
