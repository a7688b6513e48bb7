//! Rolling Logger
//!
//! `tracing` subscriber writing to `<log_dir>/<app>.log`. The file is rotated
//! to `<app>.1.log` once it passes a size cap, and the most recent lines are
//! kept in memory so the app can show them in a diagnostics view.
//!
//! `log` records are bridged into `tracing`, so library crates using the
//! `log` facade end up in the same file.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the active file reaches this size
pub const DEFAULT_MAX_BYTES: u64 = 2 * 1024 * 1024;

/// Lines kept in memory
pub const DEFAULT_BUFFER_LINES: usize = 500;

static LOGGER: OnceLock<Arc<Shared>> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Size-capped log file with a single backup
struct RollingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
}

impl RollingFile {
    fn open(path: PathBuf, max_bytes: u64) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self { path, file, written, max_bytes })
    }

    fn backup_path(path: &Path) -> PathBuf {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("app");
        path.with_file_name(format!("{}.1.log", stem))
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.written + bytes.len() as u64 > self.max_bytes && self.written > 0 {
            self.rotate()?;
        }
        self.file.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        fs::rename(&self.path, Self::backup_path(&self.path))?;
        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

struct Shared {
    file: Mutex<RollingFile>,
    recent: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Shared {
    fn new(file: RollingFile, capacity: usize) -> Self {
        Self {
            file: Mutex::new(file),
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn record(&self, bytes: &[u8]) -> io::Result<()> {
        if let Ok(mut file) = self.file.lock() {
            file.write_all(bytes)?;
        }
        if let Ok(mut recent) = self.recent.lock() {
            for line in String::from_utf8_lossy(bytes).lines().filter(|l| !l.trim().is_empty()) {
                if recent.len() == self.capacity {
                    recent.pop_front();
                }
                recent.push_back(line.to_string());
            }
        }
        Ok(())
    }

    fn recent(&self) -> Vec<String> {
        self.recent
            .lock()
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// `MakeWriter` handing out writers onto the shared rolling file
#[derive(Clone)]
struct RollingWriter(Arc<Shared>);

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.file.lock() {
            Ok(mut file) => file.file.flush(),
            Err(_) => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Initialize the global logger. Call once at app startup.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    fs::create_dir_all(&log_dir)?;
    let file = RollingFile::open(log_dir.join(format!("{}.log", app_name)), DEFAULT_MAX_BYTES)?;
    let shared = Arc::new(Shared::new(file, DEFAULT_BUFFER_LINES));
    LOGGER.set(shared.clone()).map_err(|_| LoggerError::AlreadyInitialized)?;

    let builder = tracing_subscriber::fmt()
        .with_writer(RollingWriter(shared))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG);

    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag(app_name),
        );
        // `log` already goes to logcat; only install the tracing side
        tracing::subscriber::set_global_default(builder.finish()).map_err(|_| LoggerError::AlreadyInitialized)?;
    }

    #[cfg(not(target_os = "android"))]
    builder.try_init().map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(
        "{} logging started at {}",
        app_name,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent log lines, oldest first
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|shared| shared.recent()).unwrap_or_default()
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        Ok(())
    } else {
        Err(LoggerError::NotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_past_size_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut file = RollingFile::open(path.clone(), 16).unwrap();

        file.write_all(b"0123456789\n").unwrap();
        file.write_all(b"abcdefghij\n").unwrap();

        let backup = fs::read_to_string(dir.path().join("app.1.log")).unwrap();
        let active = fs::read_to_string(&path).unwrap();
        assert_eq!(backup, "0123456789\n");
        assert_eq!(active, "abcdefghij\n");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        RollingFile::open(path.clone(), 1024).unwrap().write_all(b"first\n").unwrap();
        let mut file = RollingFile::open(path.clone(), 1024).unwrap();
        assert_eq!(file.written, 6);
        file.write_all(b"second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_recent_buffer_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::open(dir.path().join("app.log"), DEFAULT_MAX_BYTES).unwrap();
        let shared = Shared::new(file, 3);

        shared.record(b"one\ntwo\n").unwrap();
        shared.record(b"three\n\nfour\n").unwrap();

        assert_eq!(shared.recent(), vec!["two", "three", "four"]);
    }

    #[test]
    fn test_helpers_require_init() {
        if LOGGER.get().is_none() {
            assert!(matches!(info("hello"), Err(LoggerError::NotInitialized)));
        }
    }
}
