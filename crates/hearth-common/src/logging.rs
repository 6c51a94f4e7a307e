//! Structured logging infrastructure for Hearth

use std::io;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace")
    pub level: String,
    /// Whether to enable pretty formatting with colors
    pub pretty_format: bool,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty_format: true,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(file_path) = config.file_path {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let layer = fmt::layer()
            .with_ansi(false)
            .with_target(config.include_targets)
            .with_writer(file);
        registry.with(layer).init();
    } else if config.pretty_format {
        let layer = fmt::layer()
            .pretty()
            .with_target(config.include_targets)
            .with_writer(io::stdout);
        registry.with(layer).init();
    } else {
        let layer = fmt::layer()
            .compact()
            .with_target(config.include_targets)
            .with_writer(io::stdout);
        registry.with(layer).init();
    }

    Ok(())
}

/// Initialize logging for tests
///
/// Safe to call from multiple tests; subsequent calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_new("debug").unwrap())
        .with(fmt::layer().compact().with_test_writer())
        .try_init();
}
