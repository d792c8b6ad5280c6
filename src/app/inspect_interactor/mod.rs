// Inspect interactor - Media information, status line and preview frames

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::cut_interactor::ensure_input_file;
use crate::domain::errors::InvokeError;
use crate::domain::model::*;
use crate::engine::command::FrameCommand;
use crate::error::{ClipperError, ClipperResult};
use crate::output::{OutputLayout, ReportFormat};
use crate::ports::*;
use crate::utils::Utils;

/// Probed file together with what the filesystem says about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectResponse {
    pub path: PathBuf,
    pub file_size: u64,
    pub media: MediaInfo,
}

impl InspectResponse {
    pub fn render(&self, format: ReportFormat) -> ClipperResult<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ClipperError::Serialization {
                    message: e.to_string(),
                })
            }
            ReportFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ClipperError::Serialization {
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn render_text(&self) -> String {
        let media = &self.media;
        let mut out = String::new();
        let _ = writeln!(out, "Video information");
        let _ = writeln!(out, "  File:        {}", self.path.display());
        let _ = writeln!(out, "  Size:        {}", Utils::format_file_size(self.file_size));
        let _ = writeln!(
            out,
            "  Duration:    {} ({:.2}s)",
            Utils::format_seconds(media.duration),
            media.duration
        );
        let _ = writeln!(out, "  Frame rate:  {:.2} fps", media.fps);
        let _ = writeln!(out, "  Resolution:  {}", media.resolution());
        let _ = writeln!(out, "  Frames:      {}", media.frame_count);
        out
    }
}

/// Interactor for inspection and preview use cases
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    encoders: Arc<dyn EncoderProvider>,
    layout: OutputLayout,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encoders: Arc<dyn EncoderProvider>,
        layout: OutputLayout,
    ) -> Self {
        Self {
            probe_port,
            encoders,
            layout,
        }
    }

    /// Probe the input and collect its metadata
    pub async fn inspect(&self, input: &Path) -> ClipperResult<InspectResponse> {
        ensure_input_file(input)?;
        let media = self.probe_port.probe_media(&input.to_string_lossy()).await?;
        let file_size = std::fs::metadata(input)?.len();
        info!("Inspected {}: {}", input.display(), Self::summary(&media));

        Ok(InspectResponse {
            path: input.to_path_buf(),
            file_size,
            media,
        })
    }

    /// Single-line readiness summary, never fails
    pub async fn status_line(&self, input: &Path) -> String {
        match self.inspect(input).await {
            Ok(response) => format!("ready: {}", Self::summary(&response.media)),
            Err(ClipperError::Probe(e)) => format!("unreadable: {}", e),
            Err(e) => format!("unavailable: {}", e),
        }
    }

    fn summary(media: &MediaInfo) -> String {
        format!(
            "{:.1}s | {} | {:.1}fps",
            media.duration,
            media.resolution(),
            media.fps
        )
    }

    /// Default location of the image for `frame` of `input`
    pub fn default_preview_path(&self, input: &Path, frame: u64) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());
        self.layout
            .preview_dir()
            .join(format!("{}_frame_{}.png", stem, frame))
    }

    /// Extract one frame as an image and return where it was written
    pub async fn preview(
        &self,
        input: &Path,
        frame: u64,
        output: Option<PathBuf>,
    ) -> ClipperResult<PathBuf> {
        let response = self.inspect(input).await?;
        let media = &response.media;
        if media.frame_count > 0 && frame >= media.frame_count {
            return Err(ClipperError::Preview {
                message: format!(
                    "frame {} is out of range, the video has {} frames",
                    frame, media.frame_count
                ),
            });
        }

        let encoder = self.encoders.acquire()?;
        let output = output.unwrap_or_else(|| self.default_preview_path(input, frame));
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ClipperError::OutputDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let timestamp = media.frame_time(frame);
        debug!("Extracting frame {} at {:.3}s", frame, timestamp);
        let args = FrameCommand::new(input, &output, timestamp).build();
        let result = match encoder.invoke(&args).await {
            Ok(result) => result,
            Err(InvokeError::Tool(e)) => return Err(e.into()),
            Err(e) => {
                return Err(ClipperError::Preview {
                    message: e.to_string(),
                })
            }
        };

        if !result.success() {
            return Err(ClipperError::Preview {
                message: result.diagnostic(),
            });
        }
        if !output.is_file() {
            return Err(ClipperError::Preview {
                message: format!("encoder did not write {}", output.display()),
            });
        }

        info!("Preview frame written to {}", output.display());
        Ok(output)
    }
}
