// Probe LibAV adapter - Media file analysis using libav

use std::path::Path;

use async_trait::async_trait;
use ffmpeg_next as ffmpeg;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::MediaValidator;
use crate::error::{ClipperError, ClipperResult};
use crate::ports::*;

/// LibAV-based media probing adapter
///
/// Opens a demuxer per call and drops it before returning; nothing is retained
/// between probes.
pub struct ProbeLibavAdapter;

impl ProbeLibavAdapter {
    /// Create new LibAV probing adapter
    pub fn new() -> ClipperResult<Self> {
        ffmpeg::init().map_err(|e| ClipperError::FFmpegInit {
            message: e.to_string(),
        })?;
        Ok(Self)
    }

    /// Blocking probe, run on the blocking thread pool by [`ProbePort::probe_media`]
    pub fn probe_blocking(file_path: &str) -> Result<MediaInfo, ProbeError> {
        let path = Path::new(file_path);
        if !path.is_file() || std::fs::File::open(path).is_err() {
            return Err(ProbeError::NotFound {
                path: file_path.to_string(),
            });
        }

        let unreadable = |reason: String| ProbeError::Unreadable {
            path: file_path.to_string(),
            reason,
        };

        let ictx = ffmpeg::format::input(path)
            .map_err(|e| unreadable(format!("failed to open media: {}", e)))?;

        let stream = ictx
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or_else(|| unreadable("no video stream found".to_string()))?;

        let fps = rational_to_f64(stream.avg_frame_rate())
            .or_else(|| rational_to_f64(stream.rate()))
            .unwrap_or(0.0);

        let decoder = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
            .and_then(|context| context.decoder().video())
            .map_err(|e| unreadable(format!("failed to read video parameters: {}", e)))?;
        let (width, height) = (decoder.width(), decoder.height());

        let frame_count = if stream.frames() > 0 {
            stream.frames() as u64
        } else {
            // Container does not store a frame count, estimate it from the duration
            let duration = stream_duration_seconds(&stream)
                .or_else(|| container_duration_seconds(&ictx))
                .unwrap_or(0.0);
            (duration * fps).round().max(0.0) as u64
        };

        let info = MediaInfo::new(fps, frame_count, width, height);
        debug!(
            fps = info.fps,
            frame_count = info.frame_count,
            duration = info.duration,
            "probed {}",
            file_path
        );

        MediaValidator::validate(file_path, &info)?;
        Ok(info)
    }
}

fn rational_to_f64(rate: ffmpeg::Rational) -> Option<f64> {
    if rate.numerator() > 0 && rate.denominator() > 0 {
        Some(f64::from(rate))
    } else {
        None
    }
}

fn stream_duration_seconds(stream: &ffmpeg::format::stream::Stream) -> Option<f64> {
    let duration = stream.duration();
    if duration <= 0 {
        return None;
    }
    rational_to_f64(stream.time_base()).map(|tb| duration as f64 * tb)
}

fn container_duration_seconds(ictx: &ffmpeg::format::context::Input) -> Option<f64> {
    let duration = ictx.duration();
    if duration <= 0 {
        return None;
    }
    Some(duration as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE))
}

#[async_trait]
impl ProbePort for ProbeLibavAdapter {
    async fn probe_media(&self, file_path: &str) -> Result<MediaInfo, ProbeError> {
        info!("Probing video file: {}", file_path);
        let owned = file_path.to_string();
        tokio::task::spawn_blocking(move || Self::probe_blocking(&owned))
            .await
            .map_err(|e| ProbeError::Unreadable {
                path: file_path.to_string(),
                reason: format!("probe task failed: {}", e),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ProbeLibavAdapter::probe_blocking("/no/such/video.mp4").unwrap_err();
        assert_eq!(
            err,
            ProbeError::NotFound {
                path: "/no/such/video.mp4".to_string()
            }
        );
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        assert!(matches!(
            ProbeLibavAdapter::probe_blocking(&path),
            Err(ProbeError::NotFound { .. })
        ));
    }

    #[test]
    fn test_zero_byte_file_is_unreadable() {
        let _ = ffmpeg::init();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.mp4");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            ProbeLibavAdapter::probe_blocking(&path.to_string_lossy()),
            Err(ProbeError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_text_file_is_unreadable() {
        let _ = ffmpeg::init();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.mp4");
        std::fs::write(&path, b"this is not a video, just some text").unwrap();
        assert!(matches!(
            ProbeLibavAdapter::probe_blocking(&path.to_string_lossy()),
            Err(ProbeError::Unreadable { .. })
        ));
    }
}
