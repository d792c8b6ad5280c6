// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Snapshot of a probed video file
///
/// Recomputed on every probe call; nothing about a file is cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Frames per second of the primary video stream
    pub fps: f64,
    /// Number of frames in the primary video stream
    pub frame_count: u64,
    /// Duration in seconds, derived as `frame_count / fps`
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl MediaInfo {
    /// Create media info, deriving the duration from frame count and frame rate
    pub fn new(fps: f64, frame_count: u64, width: u32, height: u32) -> Self {
        let duration = if fps > 0.0 {
            frame_count as f64 / fps
        } else {
            0.0
        };

        Self {
            fps,
            frame_count,
            duration,
            width,
            height,
        }
    }

    /// Resolution formatted as `WIDTHxHEIGHT`
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Timestamp in seconds of the given frame number
    pub fn frame_time(&self, frame: u64) -> f64 {
        if self.fps > 0.0 {
            frame as f64 / self.fps
        } else {
            0.0
        }
    }
}

/// A candidate `[start, end)` interval considered for one output clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    /// False when the video ends before the full clip length
    pub eligible: bool,
}

impl ClipWindow {
    pub fn planned_duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for ClipWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:03} {:.1}s - {:.1}s",
            self.index, self.start, self.end
        )
    }
}

/// Result of encoding a single window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipStatus {
    Success,
    Failure,
}

/// Outcome of one window, created once and never modified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipOutcome {
    pub window: ClipWindow,
    pub status: ClipStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ClipOutcome {
    /// Window was written to `output_path`
    pub fn success(window: ClipWindow, output_path: impl Into<PathBuf>) -> Self {
        Self {
            window,
            status: ClipStatus::Success,
            output_path: Some(output_path.into()),
            error_message: None,
        }
    }

    /// Window could not be encoded; `error_message` carries the encoder diagnostics
    pub fn failure(window: ClipWindow, error_message: impl Into<String>) -> Self {
        Self {
            window,
            status: ClipStatus::Failure,
            output_path: None,
            error_message: Some(error_message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ClipStatus::Success
    }

    /// File name of the written clip, if any
    pub fn file_name(&self) -> Option<String> {
        self.output_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
    }
}

/// Aggregated result of one cut invocation
///
/// Built once by [`crate::output::report::summarize`] after every window has been
/// processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutReport {
    /// Every window produced by the planner, eligible or not
    pub total_windows_attempted: usize,
    /// Windows that were long enough to be encoded
    pub total_eligible: usize,
    pub total_saved: usize,
    pub output_directory: PathBuf,
    pub clip_length: f64,
    /// Clips were re-encoded rather than stream-copied
    pub reencoded: bool,
    pub outcomes: Vec<ClipOutcome>,
}

impl CutReport {
    pub fn total_failed(&self) -> usize {
        self.outcomes.len() - self.total_saved
    }

    pub fn failures(&self) -> impl Iterator<Item = &ClipOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}
