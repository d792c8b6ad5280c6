//! Error handling module for ClipSplit

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::{PlanError, ProbeError, ToolError};

/// Main error type for ClipSplit operations
#[derive(Error, Debug)]
pub enum ClipperError {
    /// Input file not found or inaccessible
    #[error("Input file not found or not accessible: {path}")]
    InputNotFound { path: String },

    /// Clip length is below one millisecond or not a number
    #[error("Invalid clip length: {value}. Expected at least 0.001 seconds")]
    InvalidClipLength { value: f64 },

    /// Media probe error
    #[error("Failed to probe media file: {0}")]
    Probe(#[from] ProbeError),

    /// Segment planning error
    #[error("Cannot plan clips: {0}")]
    Plan(#[from] PlanError),

    /// Encoder executable missing; aborts the whole batch
    #[error(
        "{0}. Install FFmpeg or point ClipSplit at it with --ffmpeg, the CLIPSPLIT_FFMPEG_PATH environment variable, or `ffmpeg_path` in the [encoder] section of the config file"
    )]
    ToolNotFound(#[from] ToolError),

    /// Output directory could not be prepared
    #[error("Failed to prepare output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preview frame extraction failed
    #[error("Failed to extract preview frame: {message}")]
    Preview { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// FFmpeg initialization error
    #[error("Failed to initialize FFmpeg: {message}")]
    FFmpegInit { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("Failed to serialize output: {message}")]
    Serialization { message: String },
}

/// Result type alias for ClipSplit operations
pub type ClipperResult<T> = std::result::Result<T, ClipperError>;
