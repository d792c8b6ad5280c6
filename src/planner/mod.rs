//! Segment planning
//!
//! Maps a video duration and a requested clip length onto the sequence of candidate
//! windows. Windows start at successive whole seconds regardless of the clip length,
//! so consecutive windows overlap whenever the clip length exceeds one second. A
//! window that would run past the end of the video is kept in the plan (it counts as
//! attempted) but is marked ineligible and never encoded.

use tracing::debug;

use crate::domain::errors::PlanError;
use crate::domain::model::ClipWindow;
use crate::domain::rules::is_valid_clip_length;

/// Distance between consecutive window starts, in seconds
pub const WINDOW_STRIDE: f64 = 1.0;

/// Tolerance applied when deciding whether a window reaches its full clip length
///
/// Probed durations are `frame_count / fps`, so a nominal 10 s video can come out as
/// 9.999999999999998. One microsecond absorbs that rounding while staying far below
/// a single frame at any real frame rate.
pub const ELIGIBILITY_EPSILON: f64 = 1e-6;

/// Pure, deterministic planner
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentPlanner;

impl SegmentPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Plan every candidate window for a video of `duration` seconds
    pub fn plan(&self, duration: f64, clip_length: f64) -> Result<Vec<ClipWindow>, PlanError> {
        plan(duration, clip_length)
    }
}

/// Plan every candidate window for a video of `duration` seconds
///
/// Returns `floor(duration)` windows with `start = i` and
/// `end = min(i + clip_length, duration)`; `eligible` is set when
/// `i + clip_length <= duration` (within [`ELIGIBILITY_EPSILON`]).
pub fn plan(duration: f64, clip_length: f64) -> Result<Vec<ClipWindow>, PlanError> {
    if !is_valid_clip_length(clip_length) {
        return Err(PlanError::InvalidClipLength { clip_length });
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(PlanError::InvalidDuration { duration });
    }
    if clip_length > duration + ELIGIBILITY_EPSILON {
        return Err(PlanError::TooShort {
            required: clip_length,
            actual: duration,
        });
    }

    let total_starts = duration.floor() as usize;
    let windows: Vec<ClipWindow> = (0..total_starts)
        .map(|index| {
            let start = index as f64 * WINDOW_STRIDE;
            let end = (start + clip_length).min(duration);
            ClipWindow {
                index,
                start,
                end,
                eligible: start + clip_length <= duration + ELIGIBILITY_EPSILON,
            }
        })
        .collect();

    debug!(
        duration,
        clip_length,
        windows = windows.len(),
        eligible = eligible_count(&windows),
        "planned clip windows"
    );

    Ok(windows)
}

/// Windows that will actually be handed to the encoder, in index order
pub fn eligible(windows: &[ClipWindow]) -> impl Iterator<Item = &ClipWindow> {
    windows.iter().filter(|w| w.eligible)
}

pub fn eligible_count(windows: &[ClipWindow]) -> usize {
    eligible(windows).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::format_seconds;

    #[test]
    fn test_ten_seconds_three_second_clips() {
        let windows = plan(10.0, 3.0).unwrap();
        assert_eq!(windows.len(), 10);
        assert_eq!(eligible_count(&windows), 8);

        let eligible_indices: Vec<usize> = eligible(&windows).map(|w| w.index).collect();
        assert_eq!(eligible_indices, (0..=7).collect::<Vec<_>>());

        let last_eligible = &windows[7];
        assert_eq!(last_eligible.start, 7.0);
        assert_eq!(last_eligible.end, 10.0);

        let truncated = &windows[8];
        assert!(!truncated.eligible);
        assert_eq!(truncated.end, 10.0);
        assert_eq!(truncated.planned_duration(), 2.0);
    }

    #[test]
    fn test_windows_follow_one_second_stride() {
        let windows = plan(12.4, 5.0).unwrap();
        assert_eq!(windows.len(), 12);
        for (i, w) in windows.iter().enumerate() {
            assert_eq!(w.index, i);
            assert_eq!(w.start, i as f64);
            assert_eq!(w.end, (i as f64 + 5.0).min(12.4));
            assert_eq!(w.eligible, i as f64 + 5.0 <= 12.4);
        }
    }

    #[test]
    fn test_clip_longer_than_video_is_too_short() {
        let err = plan(2.5, 3.0).unwrap_err();
        assert_eq!(
            err,
            PlanError::TooShort {
                required: 3.0,
                actual: 2.5
            }
        );
        let message = err.to_string();
        assert!(message.contains("3.00"));
        assert!(message.contains("2.50"));
    }

    #[test]
    fn test_clip_equal_to_duration() {
        let windows = plan(3.0, 3.0).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(eligible_count(&windows), 1);
        assert!(windows[0].eligible);
    }

    #[test]
    fn test_fractional_duration_rounding_is_tolerated() {
        // 299 frames at 29.9 fps, the quotient is not exactly 10.0
        let duration = 299.0 / 29.9;
        let windows = plan(duration, 3.0).unwrap();
        assert_eq!(windows.len(), duration.floor() as usize);
        assert_eq!(eligible_count(&windows), 8);
    }

    #[test]
    fn test_non_positive_clip_length_rejected() {
        assert!(matches!(
            plan(10.0, 0.0),
            Err(PlanError::InvalidClipLength { .. })
        ));
        assert!(matches!(
            plan(10.0, -2.0),
            Err(PlanError::InvalidClipLength { .. })
        ));
    }

    #[test]
    fn test_clip_length_below_argument_precision_rejected() {
        assert!(matches!(
            plan(10.0, 0.0004),
            Err(PlanError::InvalidClipLength { .. })
        ));

        let windows = plan(10.0, 0.001).unwrap();
        assert_eq!(windows.len(), 10);
        assert!(windows.iter().all(|w| w.eligible));
        assert_eq!(format_seconds(windows[0].planned_duration()), "0.001");
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        assert!(matches!(
            plan(0.0, 1.0),
            Err(PlanError::InvalidDuration { .. })
        ));
        assert!(matches!(
            plan(f64::NAN, 1.0),
            Err(PlanError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let planner = SegmentPlanner::new();
        assert_eq!(planner.plan(37.7, 4.0), planner.plan(37.7, 4.0));
    }

    #[test]
    fn test_sub_second_clip_length() {
        let windows = plan(4.2, 0.5).unwrap();
        assert_eq!(windows.len(), 4);
        assert!(windows.iter().all(|w| w.eligible));
        assert_eq!(windows[3].end, 3.5);
    }
}
