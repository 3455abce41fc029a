//! Engine logging.
//!
//! Everything funnels through a process-wide [`Logger`] behind an
//! `RwLock`, so an application can swap in its own sink (file, network,
//! test capture) with [`set_logger`]. The stock sink prints colored
//! lines to stdout. Errors carry file:line, the other severities do not.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use colored::*;

/// Sink for log entries. Implementations must be callable from any
/// thread.
///
/// ```no_run
/// use rampart_3d::rampart3d::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log record, as handed to the [`Logger`]
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Originating component, e.g. "rampart3d::TacticalView"
    pub source: String,
    pub message: String,
    /// Call site, present on Error entries only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Severity, ordered from chattiest to most serious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Stdout sink with per-severity colors.
///
/// Lines look like `[timestamp] [SEVERITY] [source] message`, with a
/// trailing `(file:line)` on errors.
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let local: DateTime<Local> = entry.timestamp.into();
        let stamp = local.format("%Y-%m-%d %H:%M:%S%.3f");

        let severity = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let head = format!(
            "[{}] [{}] [{}] {}",
            stamp,
            severity,
            entry.source.bright_blue(),
            entry.message
        );
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => println!("{} ({}:{})", head, file, line),
            _ => println!("{}", head),
        }
    }
}

// ===== GLOBAL LOGGER =====

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Install a custom sink for all subsequent engine logs
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut slot) = logger_slot().write() {
        *slot = Box::new(logger);
    }
}

/// Put the stock stdout sink back
pub fn reset_logger() {
    if let Ok(mut slot) = logger_slot().write() {
        *slot = Box::new(DefaultLogger);
    }
}

/// Macro plumbing: route a plain entry to the installed sink
pub fn dispatch(severity: LogSeverity, source: &str, message: String) {
    if let Ok(slot) = logger_slot().read() {
        slot.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }
}

/// Macro plumbing: route an entry that carries its call site
pub fn dispatch_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    if let Ok(slot) = logger_slot().read() {
        slot.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }
}

// ===== LOGGING MACROS =====

/// Trace-severity log, for very chatty diagnostics
///
/// ```ignore
/// engine_trace!("rampart3d::TacticalView", "Entering build_transform()");
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $crate::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Debug-severity log
///
/// ```ignore
/// engine_debug!("rampart3d::Display", "Reflowed {} views", count);
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $crate::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Info-severity log, for notable state changes
///
/// ```ignore
/// engine_info!("rampart3d::Display", "Display mode set to {}x{}", w, h);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $crate::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Warn-severity log
///
/// ```ignore
/// engine_warn!("rampart3d::Display", "Movie '{}' could not be opened", name);
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::dispatch(
            $crate::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Error-severity log; records the call site alongside the message
///
/// ```ignore
/// engine_error!("rampart3d::Display", "Failed to present: {}", error);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::dispatch_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
