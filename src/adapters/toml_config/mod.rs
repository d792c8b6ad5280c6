// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::rules::{is_clip_length_in_range, MAX_CLIP_LENGTH, MIN_CLIP_LENGTH};
use crate::error::{ClipperError, ClipperResult};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "clipsplit.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CLIPSPLIT_";

const VALID_PRESETS: &[&str] = &[
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
];

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputSettings,
    pub cut: CutSettings,
    pub encoder: EncoderSettings,
}

/// Where clips are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Base directory holding one subdirectory per cut
    pub base_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("CLIP_VIDEO"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutSettings {
    /// Clip length in seconds used when the command line does not give one
    pub clip_length: f64,
}

impl Default for CutSettings {
    fn default() -> Self {
        Self { clip_length: 3.0 }
    }
}

/// External encoder settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    /// Explicit FFmpeg executable; searched on `PATH` when unset
    pub ffmpeg_path: Option<PathBuf>,
    /// x264 preset
    pub preset: String,
    /// Constant Rate Factor (0-51)
    pub crf: u8,
    /// AAC bitrate, e.g. `128k`
    pub audio_bitrate: String,
    /// Encoder thread count; derived from the CPU count when unset
    pub threads: Option<usize>,
    /// Kill a single clip's encoder after this many seconds
    pub timeout_secs: Option<u64>,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            preset: "medium".to_string(),
            crf: 23,
            audio_bitrate: "128k".to_string(),
            threads: None,
            timeout_secs: None,
        }
    }
}

impl EncoderSettings {
    /// Thread count handed to the encoder
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(default_thread_count)
    }
}

/// Use 75% of CPU cores to leave room for the rest of the system, between 1 and 16
pub fn default_thread_count() -> usize {
    let cpu_count = num_cpus::get();
    let optimal_threads = (cpu_count as f64 * 0.75).ceil() as usize;
    optimal_threads.clamp(1, 16)
}

impl AppConfig {
    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> ClipperResult<Self> {
        toml::from_str(content).map_err(|e| ClipperError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> ClipperResult<String> {
        toml::to_string_pretty(self).map_err(|e| ClipperError::Config {
            message: format!("Failed to serialize config: {}", e),
        })
    }

    /// Apply `CLIPSPLIT_*` overrides from a key lookup; returns the number applied
    pub fn apply_env_with<F>(&mut self, lookup: F) -> ClipperResult<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let mut applied = 0;

        if let Some(value) = var("FFMPEG_PATH") {
            self.encoder.ffmpeg_path = Some(PathBuf::from(value));
            applied += 1;
        }
        if let Some(value) = var("OUTPUT_DIR") {
            self.output.base_dir = PathBuf::from(value);
            applied += 1;
        }
        if let Some(value) = var("CLIP_LENGTH") {
            self.cut.clip_length = parse_env("CLIP_LENGTH", &value)?;
            applied += 1;
        }
        if let Some(value) = var("PRESET") {
            self.encoder.preset = value;
            applied += 1;
        }
        if let Some(value) = var("CRF") {
            self.encoder.crf = parse_env("CRF", &value)?;
            applied += 1;
        }
        if let Some(value) = var("AUDIO_BITRATE") {
            self.encoder.audio_bitrate = value;
            applied += 1;
        }
        if let Some(value) = var("THREADS") {
            self.encoder.threads = Some(parse_env("THREADS", &value)?);
            applied += 1;
        }
        if let Some(value) = var("TIMEOUT_SECS") {
            self.encoder.timeout_secs = Some(parse_env("TIMEOUT_SECS", &value)?);
            applied += 1;
        }

        if applied > 0 {
            info!("Applied {} environment variable overrides", applied);
        }
        Ok(applied)
    }

    /// Validate configuration
    pub fn validate(&self) -> ClipperResult<()> {
        if !is_clip_length_in_range(self.cut.clip_length) {
            return Err(config_error(format!(
                "clip_length must be between {} and {} seconds, got {}",
                MIN_CLIP_LENGTH, MAX_CLIP_LENGTH, self.cut.clip_length
            )));
        }
        if self.encoder.crf > 51 {
            return Err(config_error(format!(
                "CRF value cannot exceed 51, got {}",
                self.encoder.crf
            )));
        }
        if !VALID_PRESETS.contains(&self.encoder.preset.as_str()) {
            return Err(config_error(format!(
                "Invalid preset: {}. Valid presets: {}",
                self.encoder.preset,
                VALID_PRESETS.join(", ")
            )));
        }
        if self.encoder.audio_bitrate.trim().is_empty() {
            return Err(config_error("audio_bitrate cannot be empty".to_string()));
        }
        if self.encoder.threads == Some(0) {
            return Err(config_error("threads must be at least 1".to_string()));
        }
        if self.encoder.timeout_secs == Some(0) {
            return Err(config_error("timeout_secs must be at least 1".to_string()));
        }
        if self.output.base_dir.as_os_str().is_empty() {
            return Err(config_error("output base_dir cannot be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> ClipperResult<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        config_error(format!(
            "Invalid value for {}{}: {} ({})",
            ENV_PREFIX, name, value, e
        ))
    })
}

fn config_error(message: String) -> ClipperError {
    ClipperError::Config { message }
}

/// TOML configuration adapter
///
/// Locates and reads the config file. An explicitly requested file must exist;
/// otherwise the first existing candidate wins and no file at all means defaults.
pub struct TomlConfigAdapter {
    candidates: Vec<PathBuf>,
}

impl TomlConfigAdapter {
    /// Create adapter with the standard lookup locations
    pub fn new() -> Self {
        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::get_default_config_path() {
            candidates.push(path);
        }
        Self { candidates }
    }

    /// Create adapter that only looks at the given locations
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Platform config file path
    pub fn get_default_config_path() -> Option<PathBuf> {
        // On Windows, use %APPDATA%/clipsplit/config.toml
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("clipsplit").join("config.toml"));
        }
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("clipsplit").join("config.toml"));
        }
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("clipsplit")
                .join("config.toml")
        })
    }

    /// Load configuration, returning it with the file it came from
    pub fn load(&self, explicit: Option<&Path>) -> ClipperResult<(AppConfig, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(config_error(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            let config = Self::load_file(path)?;
            return Ok((config, Some(path.to_path_buf())));
        }

        for candidate in &self.candidates {
            if candidate.is_file() {
                let config = Self::load_file(candidate)?;
                return Ok((config, Some(candidate.clone())));
            }
            debug!("No config file at {}", candidate.display());
        }

        Ok((AppConfig::default(), None))
    }

    fn load_file(path: &Path) -> ClipperResult<AppConfig> {
        info!("Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        AppConfig::from_toml_str(&content)
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}
