// Domain rules - Validation policies applied before any planning happens

use crate::domain::errors::ProbeError;
use crate::domain::model::MediaInfo;

/// Business rules for probed media
pub struct MediaValidator;

impl MediaValidator {
    /// Reject probe results that cannot be segmented
    ///
    /// A file that opens but reports a non-positive frame rate, duration or
    /// resolution is treated the same as one that does not open at all.
    pub fn validate(path: &str, info: &MediaInfo) -> Result<(), ProbeError> {
        let unreadable = |reason: String| ProbeError::Unreadable {
            path: path.to_string(),
            reason,
        };

        if !info.fps.is_finite() || info.fps <= 0.0 {
            return Err(unreadable(format!(
                "invalid frame rate {:.3}, the file is corrupt or not a video",
                info.fps
            )));
        }
        if !info.duration.is_finite() || info.duration <= 0.0 {
            return Err(unreadable(format!(
                "invalid duration {:.3}s, the file is corrupt or not a video",
                info.duration
            )));
        }
        if info.width == 0 || info.height == 0 {
            return Err(unreadable(format!(
                "invalid dimensions {}",
                info.resolution()
            )));
        }

        Ok(())
    }
}

/// Smallest clip length the encoder arguments can express
///
/// Offsets and durations are written with millisecond precision, so anything
/// shorter would reach FFmpeg as `-t 0.000`.
pub const MIN_CLIP_LENGTH_SECS: f64 = 0.001;

/// Clip length bounds for user-supplied settings, in whole seconds
pub const MIN_CLIP_LENGTH: u32 = 1;
pub const MAX_CLIP_LENGTH: u32 = 300;

/// Clip length must be finite and at least [`MIN_CLIP_LENGTH_SECS`]
pub fn is_valid_clip_length(clip_length: f64) -> bool {
    clip_length.is_finite() && clip_length >= MIN_CLIP_LENGTH_SECS
}

/// Whether a clip length taken from the command line, config file or environment
/// lies within `[MIN_CLIP_LENGTH, MAX_CLIP_LENGTH]`
pub fn is_clip_length_in_range(clip_length: f64) -> bool {
    clip_length >= f64::from(MIN_CLIP_LENGTH) && clip_length <= f64::from(MAX_CLIP_LENGTH)
}
