//! ClipSplit video splitter
//!
//! Splits a video into fixed-length clips, one starting at every whole second,
//! re-encoding each clip with FFmpeg.
//!
//! # Usage
//!
//! ```bash
//! clipsplit cut holiday.mp4 --clip-length 3
//! clipsplit inspect holiday.mp4 --status
//! clipsplit preview holiday.mp4 --frame 30
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use clipsplit::app::container::DefaultAppContainer;
use clipsplit::cli::{commands, Cli, Commands};
use clipsplit::config_initialization::initialize_configuration_hierarchy;
use clipsplit::utils::logging::{LoggingConfig, LoggingSystem};

/// Main entry point for the ClipSplit CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let logging = LoggingSystem::new(LoggingConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
    });
    logging
        .initialize()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    logging.log_system_info();

    let config = initialize_configuration_hierarchy(&cli).context("Invalid configuration")?;
    let container =
        DefaultAppContainer::new(&config).context("Failed to initialize media libraries")?;

    // Execute the requested command
    match cli.command {
        Commands::Cut(args) => {
            info!("Executing cut command");
            commands::cut(&container, &config, args, cli.log_format).await?;
        }
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(&container, args).await?;
        }
        Commands::Preview(args) => {
            info!("Executing preview command");
            commands::preview(&container, args).await?;
        }
    }

    Ok(())
}
