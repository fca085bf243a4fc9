//! Logger construction and the leveled-write handle.
//!
//! `init` wires the level filter, encoder and sinks into a private `tracing`
//! subscriber held as a per-handle `Dispatch`. There is no global logger:
//! callers own the handle and pass it explicitly.

use crate::caller::CallSite;
use crate::config::{Encoding, LogConfig};
use crate::error::Result;
use crate::format::{ConsoleFormatter, JsonFormatter};
use crate::level::{resolve, LogLevel};
use crate::sink::FileSink;
use std::fmt;
use std::io::{self, Write};
use std::panic::panic_any;
use std::path::Path;
use std::process;
use tracing::{dispatcher, Dispatch, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::layer::SubscriberExt;

/// Leveled logging handle.
///
/// Owns its subscriber for its whole lifetime and is safe for concurrent
/// use: the only mutable state is the file sink behind a mutex. Buffered
/// output is flushed on [`close`](Logger::close), on drop, and before
/// [`fatal`](Logger::fatal) terminates the process.
#[derive(Debug)]
pub struct Logger {
    name: String,
    threshold: LogLevel,
    dispatch: Dispatch,
    sink: FileSink,
}

/// Initialize a logger writing every entry to stdout and `file_path`.
///
/// An unrecognized `level` falls back to `"info"` and is reported through
/// the returned warning; the handle itself is usable and may be used to log
/// the warning. An unopenable log file is an unrecoverable setup error.
pub fn init(file_path: impl AsRef<Path>, level: &str) -> Result<(Logger, Option<String>)> {
    let config = LogConfig {
        file: file_path.as_ref().to_path_buf(),
        level: level.to_string(),
        ..LogConfig::default()
    };
    init_with(&config)
}

/// Initialize a logger from a full configuration
pub fn init_with(config: &LogConfig) -> Result<(Logger, Option<String>)> {
    let resolution = resolve(&config.level);
    let warning = if resolution.recognized {
        None
    } else {
        Some(format!(
            "invalid value {:?} provided for log level, defaulting to 'info'",
            config.level
        ))
    };

    let sink = FileSink::open(&config.file)?;
    let dispatch = build_dispatch(config.encoding, resolution.level, sink.clone());

    let logger = Logger {
        name: config.name.clone(),
        threshold: resolution.level,
        dispatch,
        sink,
    };
    Ok((logger, warning))
}

fn build_dispatch(encoding: Encoding, threshold: LogLevel, sink: FileSink) -> Dispatch {
    let filter = LevelFilter::from_level(Level::from(threshold));
    let writer = sink.and(io::stdout);
    match encoding {
        Encoding::Console => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(ConsoleFormatter)
                    .with_writer(writer),
            ),
        ),
        Encoding::Json => Dispatch::new(
            tracing_subscriber::registry().with(filter).with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(JsonFormatter)
                    .with_writer(writer),
            ),
        ),
    }
}

impl Logger {
    /// Write a log entry at `level`, attributed to `site`.
    ///
    /// Entries below the handle's threshold are dropped without I/O.
    pub fn log(&self, level: LogLevel, site: &CallSite<'_>, args: fmt::Arguments<'_>) {
        if level < self.threshold {
            return;
        }
        self.emit(level, site, args);
    }

    /// Log at Error severity, flush, then unwind with the formatted message
    /// as the panic payload. Recoverable by an enclosing `catch_unwind`.
    pub fn panic(&self, site: &CallSite<'_>, args: fmt::Arguments<'_>) -> ! {
        self.emit(LogLevel::Error, site, args);
        let _ = self.flush();
        panic_any(args.to_string())
    }

    /// Log at Error severity, flush both destinations, then terminate the
    /// process with a non-zero status. Never returns.
    pub fn fatal(&self, site: &CallSite<'_>, args: fmt::Arguments<'_>) -> ! {
        self.emit(LogLevel::Error, site, args);
        let _ = self.flush();
        process::exit(1)
    }

    /// Run `f` with this logger's subscriber as the thread-default
    /// dispatcher, so native `tracing` events (including structured
    /// key-value fields) land in the same sinks and level filter.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Flush buffered output on both destinations
    pub fn flush(&self) -> Result<()> {
        self.sink.flush()?;
        io::stdout().flush()?;
        Ok(())
    }

    /// Flush and release the handle
    pub fn close(self) -> Result<()> {
        self.flush()
    }

    /// Effective minimum severity
    pub fn level(&self) -> LogLevel {
        self.threshold
    }

    /// Configured logger name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, level: LogLevel, site: &CallSite<'_>, args: fmt::Arguments<'_>) {
        let name = self.name.as_str();
        // The event! level must be const, hence one arm per severity.
        macro_rules! emit_at {
            ($lvl:expr) => {
                tracing::event!(
                    target: "glint",
                    $lvl,
                    logger = name,
                    caller.file = site.file,
                    caller.line = u64::from(site.line),
                    caller.function = site.function,
                    "{}",
                    args
                )
            };
        }
        dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Debug => emit_at!(Level::DEBUG),
            LogLevel::Info => emit_at!(Level::INFO),
            LogLevel::Warn => emit_at!(Level::WARN),
            LogLevel::Error => emit_at!(Level::ERROR),
        });
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Flush on every exit path, including early returns after init
        let _ = self.sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::panic::AssertUnwindSafe;
    use std::path::PathBuf;

    fn temp_log() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        (dir, path)
    }

    #[test]
    fn test_info_line_schema() {
        let (_dir, path) = temp_log();
        let (logger, warning) = init(&path, "debug").unwrap();
        assert!(warning.is_none());

        crate::info!(logger, "hello {}", "world");
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        assert!(line.contains(" - INFO - "), "line: {:?}", line);
        assert!(line.contains(" - glint - "), "line: {:?}", line);
        assert!(line.contains("src/logger.rs:"), "line: {:?}", line);
        assert!(line.contains("glint_core::logger::tests"), "line: {:?}", line);
        assert!(line.ends_with("hello world"), "line: {:?}", line);
    }

    #[test]
    fn test_threshold_suppresses_below() {
        let (_dir, path) = temp_log();
        let (logger, _) = init(&path, "warn").unwrap();

        crate::debug!(logger, "below threshold");
        crate::info!(logger, "also below");
        crate::error!(logger, "above threshold");
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("above threshold"));
    }

    #[test]
    fn test_invalid_level_defaults_to_info() {
        let (_dir, path) = temp_log();
        let (logger, warning) = init(&path, "verbose").unwrap();

        let warning = warning.expect("invalid level must produce a warning");
        assert!(warning.contains("info"));

        crate::debug!(logger, "suppressed at info");
        crate::info!(logger, "emitted at info");
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("suppressed at info"));
        assert!(contents.contains("emitted at info"));
    }

    #[test]
    fn test_structured_fields_round_trip() {
        let (_dir, path) = temp_log();
        let (logger, _) = init(&path, "debug").unwrap();

        logger.in_scope(|| {
            tracing::info!(user = "alice", attempts = 3, "login accepted");
        });
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("login accepted"));
        assert!(contents.contains("user=alice"));
        assert!(contents.contains("attempts=3"));
    }

    #[test]
    fn test_in_scope_respects_threshold() {
        let (_dir, path) = temp_log();
        let (logger, _) = init(&path, "warn").unwrap();

        logger.in_scope(|| {
            tracing::info!("filtered out");
            tracing::warn!("kept");
        });
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("filtered out"));
        assert!(contents.contains("kept"));
    }

    #[test]
    fn test_panic_unwinds_with_message() {
        let (_dir, path) = temp_log();
        let (logger, _) = init(&path, "info").unwrap();

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            crate::panic!(logger, "boom {}", 7);
        }));

        let payload = result.unwrap_err();
        let message = payload.downcast::<String>().unwrap();
        assert_eq!(*message, "boom 7");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("boom 7"));
        assert!(contents.contains(" - ERROR - "));
    }

    #[test]
    fn test_json_encoding_schema() {
        let (_dir, path) = temp_log();
        let config = LogConfig {
            file: path.clone(),
            level: "info".into(),
            name: "svc".into(),
            encoding: Encoding::Json,
        };
        let (logger, _) = init_with(&config).unwrap();

        crate::info!(logger, "structured");
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(value["msg"], "structured");
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["logger"], "svc");
        assert_eq!(value["function"], "glint_core::logger::tests");
        assert!(value["caller"].as_str().unwrap().contains("src/logger.rs:"));
        assert!(value["time"].as_str().is_some());
    }

    #[test]
    fn test_drop_flushes() {
        let (_dir, path) = temp_log();
        {
            let (logger, _) = init(&path, "info").unwrap();
            crate::info!(logger, "written before drop");
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("written before drop"));
    }

    #[test]
    fn test_unopenable_path_is_init_error() {
        let dir = tempfile::tempdir().unwrap();

        // The directory itself is not a valid log file
        let err = init(dir.path(), "info").unwrap_err();
        assert!(matches!(err, crate::Error::Init(_)));
    }

    #[test]
    fn test_concurrent_logging_is_line_atomic() {
        let (_dir, path) = temp_log();
        let (logger, _) = init(&path, "debug").unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let logger = &logger;
                scope.spawn(move || {
                    for i in 0..25 {
                        crate::info!(logger, "thread entry {}", i);
                    }
                });
            }
        });
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 100);
        for line in lines {
            assert!(line.contains("thread entry"), "mangled line: {:?}", line);
        }
    }
}
