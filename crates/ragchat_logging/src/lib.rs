#![deny(missing_docs)]
//! Shared logging utilities for the ragchat workspace.
//!
//! This crate provides the `rc_*` logging macros used across the codebase,
//! the file logger setup used by the terminal app and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! rc_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! rc_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! rc_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! rc_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! rc_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Why the file logger could not be installed.
#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    /// The log file could not be created.
    #[error("could not create log file {}: {source}", path.display())]
    CreateFile {
        /// Requested log file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Another global logger was installed first.
    #[error("a global logger is already installed")]
    AlreadyInstalled,
}

/// Installs the global logger, writing to `log_file` (truncated on startup).
///
/// The terminal UI owns stdout while it runs, so the app logs to a file only.
pub fn initialize(log_file: &Path, level: LevelFilter) -> Result<(), LogInitError> {
    let loggers: Vec<Box<dyn SharedLogger>> =
        vec![create_file_logger(log_file, level, build_config())?];
    CombinedLogger::init(loggers).map_err(|_| LogInitError::AlreadyInstalled)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Result<Box<WriteLogger<File>>, LogInitError> {
    let file = File::create(path).map_err(|source| LogInitError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteLogger::new(level, config, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logger_is_not_created_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ragchat.log");
        let err = create_file_logger(&path, LevelFilter::Info, build_config())
            .err()
            .expect("missing directory");
        assert!(matches!(err, LogInitError::CreateFile { .. }));
        assert!(err.to_string().contains("ragchat.log"));
    }

    #[test]
    fn file_logger_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragchat.log");
        assert!(create_file_logger(&path, LevelFilter::Info, build_config()).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn initialize_reports_unwritable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ragchat.log");
        let result = initialize(&path, LevelFilter::Info);
        assert!(matches!(result, Err(LogInitError::CreateFile { .. })));
    }
}
