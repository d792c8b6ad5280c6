//! Configuration initialization and hierarchy management

use tracing::info;

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::error::ClipperResult;

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> ClipperResult<AppConfig> {
    resolve_configuration(cli, &TomlConfigAdapter::new(), |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration_hierarchy`] with an injected file lookup and
/// environment
pub fn resolve_configuration<F>(
    cli: &Cli,
    adapter: &TomlConfigAdapter,
    env: F,
) -> ClipperResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    info!("Initializing configuration hierarchy");

    // Steps 1 and 2: defaults, then the config file when there is one
    let (mut config, source) = adapter.load(cli.config.as_deref())?;
    match source {
        Some(path) => info!("Configuration file: {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }

    // Step 3: environment
    config.apply_env_with(env)?;

    // Step 4: command line
    let overrides = apply_cli_configuration_overrides(&mut config, cli);
    if overrides > 0 {
        info!("Applied {} CLI configuration overrides", overrides);
    }

    config.validate()?;
    Ok(config)
}

fn apply_cli_configuration_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut cli_overrides = 0;

    if let Some(path) = &cli.ffmpeg {
        info!("CLI override: ffmpeg_path = {}", path.display());
        config.encoder.ffmpeg_path = Some(path.clone());
        cli_overrides += 1;
    }
    if let Some(dir) = &cli.output_dir {
        info!("CLI override: base_dir = {}", dir.display());
        config.output.base_dir = dir.clone();
        cli_overrides += 1;
    }
    if let Commands::Cut(args) = &cli.command {
        if let Some(clip_length) = args.clip_length {
            info!("CLI override: clip_length = {}", clip_length);
            config.cut.clip_length = f64::from(clip_length);
            cli_overrides += 1;
        }
    }

    cli_overrides
}
