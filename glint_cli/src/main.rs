use clap::{Parser, Subcommand};
use glint_core::{Encoding, LogConfig, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Leveled logging demo for the glint adapter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Load logger configuration from a TOML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the log file path
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Override the minimum severity (debug, info, warn, error)
    #[arg(long, global = true)]
    level: Option<String>,

    /// Write JSON entries instead of console lines
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one entry at each severity (default)
    Demo,

    /// Log a message at Error severity, flush, and exit non-zero
    Fatal {
        /// Message to log before terminating
        #[arg(long, default_value = "fatal error requested")]
        message: String,
    },

    /// Log a message at Error severity, then unwind
    Panic {
        /// Message carried as the unwind payload
        #[arg(long, default_value = "panic requested")]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LogConfig::load_from(path)?,
        None => LogConfig::default(),
    };
    if let Some(file) = cli.log_file {
        config.file = file;
    }
    if let Some(level) = cli.level {
        config.level = level;
    }
    if cli.json {
        config.encoding = Encoding::Json;
    }

    let (logger, warning) = glint_core::init_with(&config)?;
    if let Some(message) = warning {
        glint_core::warn!(logger, "{}", message);
    }

    match cli.command {
        Some(Commands::Fatal { message }) => glint_core::fatal!(logger, "{}", message),
        Some(Commands::Panic { message }) => glint_core::panic!(logger, "{}", message),
        Some(Commands::Demo) | None => {
            glint_core::debug!(logger, "debug entry from the demo command");
            glint_core::info!(logger, "info entry from the demo command");
            glint_core::warn!(logger, "warn entry from the demo command");
            glint_core::error!(logger, "error entry from the demo command");
            logger.in_scope(|| {
                tracing::info!(user = "demo", attempts = 1, "structured demo entry");
            });
            logger.close()
        }
    }
}
