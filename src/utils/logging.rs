//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level or filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Logging system manager
pub struct LoggingSystem {
    config: LoggingConfig,
}

impl LoggingSystem {
    /// Create a new logging system with configuration
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// Filter from `RUST_LOG`, falling back to the configured level
    pub fn env_filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.config.level),
        }
    }

    /// Install the global subscriber; logs go to stderr so stdout carries only reports
    pub fn initialize(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = self.env_filter()?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        match self.config.format {
            LogFormat::Text => builder.with_target(false).try_init()?,
            LogFormat::Json => builder.json().try_init()?,
        }
        Ok(())
    }

    /// Log system information
    pub fn log_system_info(&self) {
        tracing::debug!("=== ClipSplit ===");
        tracing::debug!("Version: {}", env!("CARGO_PKG_VERSION"));

        #[cfg(target_os = "macos")]
        tracing::debug!("Platform: macOS");
        #[cfg(target_os = "linux")]
        tracing::debug!("Platform: Linux");
        #[cfg(target_os = "windows")]
        tracing::debug!("Platform: Windows");

        tracing::debug!("Logging level: {}", self.config.level);
        tracing::debug!("Output format: {:?}", self.config.format);
    }
}
