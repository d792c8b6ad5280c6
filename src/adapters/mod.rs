// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod probe_libav;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::{FFmpegAdapter, FFmpegLocator};
pub use probe_libav::ProbeLibavAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter};
