// Domain errors - Failures raised by probing, planning and encoder invocation

use thiserror::Error;

/// Media probing failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// Path does not reference an existing, readable file
    #[error("video file does not exist or is not accessible: {path}")]
    NotFound { path: String },

    /// The media library could not open the file or reported unusable values
    #[error("cannot read video file {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Segment planning failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("clip length must be at least 0.001 seconds, got {clip_length}")]
    InvalidClipLength { clip_length: f64 },

    #[error("video duration must be positive, got {duration}")]
    InvalidDuration { duration: f64 },

    /// Not even one full-length window fits into the video
    #[error(
        "video is too short to cut {required:.2}s clips: requires at least {required:.2}s, actual duration is {actual:.2}s"
    )]
    TooShort { required: f64, actual: f64 },
}

/// Encoder tool failures that abort a whole batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    /// The executable is missing or cannot be started at all
    #[error("encoder tool could not be started ({program}): {reason}")]
    NotFound { program: String, reason: String },
}

/// Per-invocation failures that are recovered into a failed clip
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvokeError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("encoder did not finish within {seconds}s and was killed")]
    TimedOut { seconds: u64 },

    #[error("lost track of encoder process: {0}")]
    Wait(String),
}
