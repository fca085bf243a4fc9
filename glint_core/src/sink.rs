//! Shared file sink.
//!
//! A `MakeWriter` over a single buffered file handle, shared between the
//! format layer and the owning `Logger` so the handle can flush explicitly.
//! Write failures are reported to stderr; they never reach the code issuing
//! the log call.

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Append-mode log file behind a mutex, cloneable across layers
#[derive(Clone, Debug)]
pub struct FileSink {
    path: Arc<PathBuf>,
    inner: Arc<Mutex<BufWriter<File>>>,
}

impl FileSink {
    /// Open (or create) the log file in append mode, creating parent
    /// directories as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Init(format!(
                        "cannot create log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                Error::Init(format!("cannot open log file {}: {}", path.display(), e))
            })?;

        Ok(Self {
            path: Arc::new(path.to_path_buf()),
            inner: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    /// Flush buffered output to disk
    pub fn flush(&self) -> Result<()> {
        self.lock().flush()?;
        Ok(())
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BufWriter<File>> {
        // A poisoned lock still holds a usable writer
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl io::Write for &FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.lock().write(buf) {
            Ok(written) => Ok(written),
            Err(e) => {
                // Sink failures are routed to stderr, not to the log caller
                eprintln!(
                    "glint: failed to write log file {}: {}",
                    self.path.display(),
                    e
                );
                Err(e)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<'a> MakeWriter<'a> for FileSink {
    type Writer = &'a FileSink;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}
