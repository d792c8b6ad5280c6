//! Output directory layout and cut reporting

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ClipperError, ClipperResult};

pub mod report;

/// Container extension of every written clip
pub const CLIP_EXTENSION: &str = "mp4";

/// Prefix shared by invocation directories and clip files
const CLIP_PREFIX: &str = "clip";

/// How a finished cut is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// File name of the clip produced for window `index`
///
/// Zero-padded so a plain directory listing sorts clips by time.
pub fn clip_file_name(index: usize) -> String {
    format!("{}_{:03}.{}", CLIP_PREFIX, index, CLIP_EXTENSION)
}

/// Where invocations of the splitter write their files
#[derive(Debug, Clone)]
pub struct OutputLayout {
    base_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `clip_YYYYMMDD_HHMMSS` for the given local time
    pub fn invocation_dir_name(timestamp: NaiveDateTime) -> String {
        format!("{}_{}", CLIP_PREFIX, timestamp.format("%Y%m%d_%H%M%S"))
    }

    /// Default location for extracted preview frames
    pub fn preview_dir(&self) -> PathBuf {
        self.base_dir.join("preview")
    }

    /// Create a fresh directory for one cut invocation
    ///
    /// The base directory is created when missing. A directory that already exists
    /// for the same second is never reused; `_1`, `_2`, ... is appended instead.
    pub fn create_invocation_dir(&self, timestamp: NaiveDateTime) -> ClipperResult<PathBuf> {
        std::fs::create_dir_all(&self.base_dir).map_err(|source| {
            ClipperError::OutputDirectory {
                path: self.base_dir.clone(),
                source,
            }
        })?;

        let name = Self::invocation_dir_name(timestamp);
        let mut suffix = 0usize;
        loop {
            let candidate = if suffix == 0 {
                self.base_dir.join(&name)
            } else {
                self.base_dir.join(format!("{}_{}", name, suffix))
            };

            match std::fs::create_dir(&candidate) {
                Ok(()) => {
                    info!("Created output directory {}", candidate.display());
                    return Ok(candidate);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} already exists", candidate.display());
                    suffix += 1;
                }
                Err(source) => {
                    return Err(ClipperError::OutputDirectory {
                        path: candidate,
                        source,
                    })
                }
            }
        }
    }
}
