//! Core clipping engine module

use serde::{Deserialize, Serialize};

use crate::adapters::toml_config::EncoderSettings;

pub mod clipper;
pub mod command;
pub mod progress;

pub use clipper::ClipEncoder;
pub use progress::ProgressCallback;

/// Encoding parameters shared by every clip of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Video codec
    pub video_codec: String,
    /// Audio codec
    pub audio_codec: String,
    /// Encoding preset
    pub preset: String,
    /// CRF quality setting
    pub crf: u8,
    /// Audio bitrate
    pub audio_bitrate: String,
    /// Encoder threads, left to FFmpeg when unset
    pub threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_settings(&EncoderSettings::default())
    }
}

impl EngineConfig {
    /// H.264 video and AAC audio with the configured quality knobs
    pub fn from_settings(settings: &EncoderSettings) -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: settings.preset.clone(),
            crf: settings.crf,
            audio_bitrate: settings.audio_bitrate.clone(),
            threads: Some(settings.effective_threads()),
        }
    }
}
