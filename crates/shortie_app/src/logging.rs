//! Global logger setup for Shortie hosts.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use thiserror::Error;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "shortie.log";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogDestination {
    File,
    #[default]
    Terminal,
    Both,
    /// No logger is installed; the `shortie_*` macros become no-ops.
    Off,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Installs the global logger for `destination`.
///
/// Returns `Ok(false)` when nothing was installed, either because the
/// destination is [`LogDestination::Off`] or because a logger already exists.
/// The log file is appended to, never truncated.
pub fn initialize(
    destination: LogDestination,
    level: LevelFilter,
    log_file: &Path,
) -> Result<bool, LoggingError> {
    let loggers = build_loggers(destination, level, log_file)?;
    if loggers.is_empty() {
        return Ok(false);
    }
    Ok(CombinedLogger::init(loggers).is_ok())
}

fn build_loggers(
    destination: LogDestination,
    level: LevelFilter,
    log_file: &Path,
) -> Result<Vec<Box<dyn SharedLogger>>, LoggingError> {
    let config = record_format();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        let file = open_append(log_file).map_err(|source| LoggingError::OpenFile {
            path: log_file.to_path_buf(),
            source,
        })?;
        loggers.push(WriteLogger::new(level, config, file));
    }

    Ok(loggers)
}

fn record_format() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
