//! Console logger with an optional rotating log file.
//!
//! Every accepted line goes to stderr. When `logging.file` is enabled the
//! same line is appended to `~/.config/glaze/logs/glaze.log`; once that
//! file exceeds the configured size it is rotated to `glaze.log.1` (one
//! backup kept). Nothing is logged before [`init`] is called.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "glaze.log";
const BACKUP_FILE_NAME: &str = "glaze.log.1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether to also write the rotating log file. Defaults to `false`.
    pub file: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parses a level name. Unknown names fall back to `Info`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct FileSink {
    file: File,
    path: PathBuf,
    max_bytes: u64,
    written: u64,
}

struct Logger {
    min_level: Level,
    sink: Option<FileSink>,
}

/// Initialises the global logger. Call once at daemon startup.
///
/// A file that cannot be opened disables the file sink only; console
/// output keeps working.
pub fn init(config: &LogConfig) {
    let logger = Logger {
        min_level: Level::parse(&config.level),
        sink: config.file.then(|| open_sink(config.max_file_mb)).flatten(),
    };
    let _ = LOGGER.set(Mutex::new(logger));
}

/// Returns the log file path: `~/.config/glaze/logs/glaze.log`.
pub fn log_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|d| d.join("logs").join(LOG_FILE_NAME))
}

fn open_sink(max_file_mb: u64) -> Option<FileSink> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: cannot open {}: {e}", path.display());
            return None;
        }
    };
    let written = file.metadata().map(|m| m.len()).unwrap_or(0);

    Some(FileSink {
        file,
        path,
        max_bytes: max_file_mb * 1024 * 1024,
        written,
    })
}

/// Writes a log line if the level is at or above the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    if level < logger.min_level {
        return;
    }

    let line = format_line(&timestamp(), level, args);
    eprint!("{line}");

    if let Some(sink) = logger.sink.as_mut() {
        sink.append(&line);
    }
}

fn format_line(time: &str, level: Level, args: fmt::Arguments<'_>) -> String {
    format!("{time} [{lvl}] {args}\n", lvl = level.as_str())
}

impl FileSink {
    fn append(&mut self, line: &str) {
        let _ = self.file.write_all(line.as_bytes());
        self.written += line.len() as u64;

        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let backup = self.path.with_file_name(BACKUP_FILE_NAME);
        let _ = fs::rename(&self.path, &backup);
        if let Ok(f) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            self.file = f;
        }
        self.written = 0;
    }
}

fn timestamp() -> String {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
