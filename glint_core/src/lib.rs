#![forbid(unsafe_code)]

//! Leveled logging adapter over the `tracing` stack.
//!
//! This crate provides:
//! - Level resolution with a soft fallback ("debug"/"info"/"warn"/"error")
//! - Call-site formatting (trimmed source path, final function-name segment)
//! - Console and JSON encoders sharing a fixed field-key schema
//! - Dual sinks (stdout + file) behind an owned, thread-safe handle
//! - Six leveled write operations: [`debug!`], [`info!`], [`warn!`],
//!   [`error!`], [`panic!`] and [`fatal!`]
//!
//! There is no global logger. [`init`] returns a [`Logger`] the caller owns
//! and passes explicitly; dropping or closing the handle flushes buffered
//! output.

pub mod caller;
pub mod config;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod sink;

mod macros;

// Re-export commonly used types
pub use caller::{format_caller, CallSite};
pub use config::{Encoding, LogConfig};
pub use error::{Error, Result};
pub use level::{resolve, LevelResolution, LogLevel};
pub use logger::{init, init_with, Logger};
