//! Call-site formatting.
//!
//! Fully-qualified function names carry a long module or package prefix that
//! is noise in console output. The formatter keeps only the final segment
//! while preserving file:line context for navigation.

/// Source location of a log call, captured by the logging macros
#[derive(Clone, Copy, Debug)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
}

/// Format a call site as a single caller token: `src/server.rs:42 - handle`.
///
/// The token never contains embedded newlines; with an empty function name
/// the trailing segment is omitted.
pub fn format_caller(site: &CallSite<'_>) -> String {
    let function = function_segment(site.function);
    let path = trimmed_path(site.file);
    if function.is_empty() {
        format!("{}:{}", path, site.line)
    } else {
        format!("{}:{} - {}", path, site.line, function)
    }
}

/// Strip any `/`-delimited package prefix from a qualified function name.
///
/// A name without a `/` separator (e.g. a Rust `module::path`) is returned
/// unchanged.
pub fn function_segment(function: &str) -> &str {
    match function.rfind('/') {
        Some(idx) => &function[idx + 1..],
        None => function,
    }
}

/// Trim a source path to its final two components
pub fn trimmed_path(file: &str) -> &str {
    match file.rfind('/') {
        Some(last) => match file[..last].rfind('/') {
            Some(second) => &file[second + 1..],
            None => file,
        },
        None => file,
    }
}
