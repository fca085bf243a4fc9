//! Log level resolution.
//!
//! Maps a level string from configuration to a minimum-severity threshold.
//! Anything outside the four recognized spellings falls back to `Info`;
//! the caller is told via the `recognized` flag, never via an error.

use std::fmt;

/// Minimum-severity threshold, ordered Debug < Info < Warn < Error
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The configuration spelling of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Outcome of resolving a level string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelResolution {
    pub level: LogLevel,
    pub recognized: bool,
}

/// Resolve a level string to a threshold.
///
/// Matching is exact and case-sensitive: `"debug"`, `"info"`, `"warn"` or
/// `"error"`. Any other input (empty string, different case, typos) resolves
/// to `Info` with `recognized = false`.
pub fn resolve(input: &str) -> LevelResolution {
    let (level, recognized) = match input {
        "debug" => (LogLevel::Debug, true),
        "info" => (LogLevel::Info, true),
        "warn" => (LogLevel::Warn, true),
        "error" => (LogLevel::Error, true),
        _ => (LogLevel::Info, false),
    };
    LevelResolution { level, recognized }
}
