//! Leveled logging macros.
//!
//! Each macro captures the application call site (`file!`, `line!`,
//! `module_path!`) and forwards `format_args!`-formatted arguments to the
//! handle, so the reported caller is the log call itself rather than an
//! adapter frame.

/// Capture the current call site
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::CallSite {
            file: file!(),
            line: line!(),
            function: module_path!(),
        }
    };
}

/// Log at Debug severity
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::LogLevel::Debug, &$crate::callsite!(), format_args!($($arg)+))
    };
}

/// Log at Info severity
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::LogLevel::Info, &$crate::callsite!(), format_args!($($arg)+))
    };
}

/// Log at Warn severity
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::LogLevel::Warn, &$crate::callsite!(), format_args!($($arg)+))
    };
}

/// Log at Error severity
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log($crate::LogLevel::Error, &$crate::callsite!(), format_args!($($arg)+))
    };
}

/// Log at Error severity, then unwind with the formatted message as the
/// panic payload
#[macro_export]
macro_rules! panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic(&$crate::callsite!(), format_args!($($arg)+))
    };
}

/// Log at Error severity, flush both destinations, then terminate the
/// process with a non-zero status
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(&$crate::callsite!(), format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::init;
    use std::fs;

    #[test]
    fn test_macros_capture_call_site() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let (logger, _) = init(&path, "debug").unwrap();

        crate::debug!(logger, "first {}", 1);
        crate::warn!(logger, "second {}", 2);
        logger.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first 1"));
        assert!(contents.contains("second 2"));
        // Caller is this module, not the adapter internals
        assert!(contents.contains("src/macros.rs:"));
        assert!(contents.contains("glint_core::macros::tests"));
        assert!(!contents.contains("src/logger.rs:"));
    }
}
