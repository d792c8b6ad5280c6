// Cut interactor - Orchestrates the video splitting use case

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::domain::model::*;
use crate::domain::rules::is_valid_clip_length;
use crate::engine::{ClipEncoder, EngineConfig, ProgressCallback};
use crate::error::{ClipperError, ClipperResult};
use crate::output::report::summarize;
use crate::output::OutputLayout;
use crate::planner::{eligible_count, SegmentPlanner};
use crate::ports::*;

/// One cut invocation
#[derive(Debug, Clone)]
pub struct CutRequest {
    pub input: PathBuf,
    /// Clip length in seconds
    pub clip_length: f64,
    /// Names the output directory; the current local time when unset
    pub started_at: Option<NaiveDateTime>,
}

impl CutRequest {
    pub fn new(input: impl Into<PathBuf>, clip_length: f64) -> Self {
        Self {
            input: input.into(),
            clip_length,
            started_at: None,
        }
    }

    pub fn started_at(mut self, timestamp: NaiveDateTime) -> Self {
        self.started_at = Some(timestamp);
        self
    }
}

/// Interactor for the cut use case
pub struct CutInteractor {
    probe_port: Arc<dyn ProbePort>,
    encoders: Arc<dyn EncoderProvider>,
    layout: OutputLayout,
    engine: EngineConfig,
    planner: SegmentPlanner,
}

impl CutInteractor {
    /// Create new cut interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encoders: Arc<dyn EncoderProvider>,
        layout: OutputLayout,
        engine: EngineConfig,
    ) -> Self {
        Self {
            probe_port,
            encoders,
            layout,
            engine,
            planner: SegmentPlanner::new(),
        }
    }

    /// Split the input into clips and report on every window
    ///
    /// Input, probe, planning and tool errors are returned before anything is
    /// written. Once encoding has started only a vanished encoder aborts the batch.
    pub async fn execute(
        &self,
        request: CutRequest,
        progress: &dyn ProgressCallback,
    ) -> ClipperResult<CutReport> {
        info!(
            "Starting cut of {} into {}s clips",
            request.input.display(),
            request.clip_length
        );

        ensure_input_file(&request.input)?;
        if !is_valid_clip_length(request.clip_length) {
            return Err(ClipperError::InvalidClipLength {
                value: request.clip_length,
            });
        }

        let media_info = self
            .probe_port
            .probe_media(&request.input.to_string_lossy())
            .await?;
        info!(
            "Probed {}: {:.3}s, {:.2} fps, {}",
            request.input.display(),
            media_info.duration,
            media_info.fps,
            media_info.resolution()
        );

        let windows = self.planner.plan(media_info.duration, request.clip_length)?;
        info!(
            "Planned {} windows, {} eligible",
            windows.len(),
            eligible_count(&windows)
        );

        // Resolved before the output directory exists so a missing tool leaves nothing behind
        let encoder = self.encoders.acquire()?;

        let started_at = request
            .started_at
            .unwrap_or_else(|| Local::now().naive_local());
        let output_dir = self.layout.create_invocation_dir(started_at)?;

        let clipper = ClipEncoder::new(encoder, self.engine.clone());
        let outcomes = clipper
            .encode_all(&request.input, &windows, &output_dir, progress)
            .await?;

        let report = summarize(&windows, outcomes, &output_dir, request.clip_length);
        info!(
            "Saved {} of {} eligible clips to {}",
            report.total_saved,
            report.total_eligible,
            output_dir.display()
        );
        Ok(report)
    }
}

/// Input must be an existing regular file
pub(crate) fn ensure_input_file(path: &Path) -> ClipperResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ClipperError::InputNotFound {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FixedProbe(Result<MediaInfo, ProbeError>);

    #[async_trait]
    impl ProbePort for FixedProbe {
        async fn probe_media(&self, _file_path: &str) -> Result<MediaInfo, ProbeError> {
            self.0.clone()
        }
    }

    /// Fails every invocation whose `-ss` value is listed, otherwise writes the output
    #[derive(Default)]
    struct FakeEncoder {
        fail_at: Vec<&'static str>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl EncodePort for FakeEncoder {
        async fn invoke(&self, args: &[String]) -> Result<ProcessOutput, InvokeError> {
            *self.calls.lock().unwrap() += 1;
            let ss = args.iter().position(|a| a == "-ss").unwrap();
            if self.fail_at.contains(&args[ss + 1].as_str()) {
                return Ok(ProcessOutput {
                    exit_code: Some(1),
                    stdout: String::new(),
                    stderr: "codec error".to_string(),
                });
            }
            std::fs::write(args.last().unwrap(), b"mp4").unwrap();
            Ok(ProcessOutput {
                exit_code: Some(0),
                ..Default::default()
            })
        }

        fn program(&self) -> String {
            "fake-ffmpeg".to_string()
        }
    }

    struct Provider(Result<Arc<FakeEncoder>, ToolError>);

    impl EncoderProvider for Provider {
        fn acquire(&self) -> Result<Arc<dyn EncodePort>, ToolError> {
            self.0
                .clone()
                .map(|encoder| encoder as Arc<dyn EncodePort>)
        }
    }

    struct Fixture {
        _temp: TempDir,
        input: PathBuf,
        base: PathBuf,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("input.mp4");
        std::fs::write(&input, b"not really a video").unwrap();
        let base = temp.path().join("CLIP_VIDEO");
        Fixture {
            _temp: temp,
            input,
            base,
        }
    }

    fn ten_seconds() -> MediaInfo {
        MediaInfo::new(30.0, 300, 1920, 1080)
    }

    fn interactor(
        probe: Result<MediaInfo, ProbeError>,
        encoders: Result<Arc<FakeEncoder>, ToolError>,
        base: &Path,
    ) -> CutInteractor {
        CutInteractor::new(
            Arc::new(FixedProbe(probe)),
            Arc::new(Provider(encoders)),
            OutputLayout::new(base),
            EngineConfig::default(),
        )
    }

    fn at_noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn quiet() -> impl ProgressCallback {
        |_: f64, _: &str| {}
    }

    #[tokio::test]
    async fn test_cut_ten_second_video() {
        let fx = fixture();
        let encoder = Arc::new(FakeEncoder::default());
        let cut = interactor(Ok(ten_seconds()), Ok(encoder.clone()), &fx.base);

        let report = cut
            .execute(CutRequest::new(&fx.input, 3.0).started_at(at_noon()), &quiet())
            .await
            .unwrap();

        assert_eq!(report.total_windows_attempted, 10);
        assert_eq!(report.total_eligible, 8);
        assert_eq!(report.total_saved, 8);
        assert_eq!(*encoder.calls.lock().unwrap(), 8);
        assert_eq!(report.output_directory, fx.base.join("clip_20240501_120000"));
        assert!(report.output_directory.join("clip_007.mp4").is_file());
        assert!(!report.output_directory.join("clip_008.mp4").exists());
    }

    #[tokio::test]
    async fn test_one_failing_window_does_not_stop_the_batch() {
        let fx = fixture();
        let encoder = Arc::new(FakeEncoder {
            fail_at: vec!["4.000"],
            ..Default::default()
        });
        let cut = interactor(Ok(ten_seconds()), Ok(encoder.clone()), &fx.base);

        let report = cut
            .execute(CutRequest::new(&fx.input, 3.0).started_at(at_noon()), &quiet())
            .await
            .unwrap();

        assert_eq!(*encoder.calls.lock().unwrap(), 8);
        assert_eq!(report.total_saved, report.total_eligible - 1);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.window.index, 4);
        assert_eq!(failure.error_message.as_deref(), Some("codec error"));
    }

    #[tokio::test]
    async fn test_too_short_video_plans_nothing() {
        let fx = fixture();
        let cut = interactor(
            Ok(MediaInfo::new(30.0, 75, 640, 360)),
            Ok(Arc::new(FakeEncoder::default())),
            &fx.base,
        );

        let err = cut
            .execute(CutRequest::new(&fx.input, 3.0), &quiet())
            .await
            .unwrap_err();

        match err {
            ClipperError::Plan(PlanError::TooShort { required, actual }) => {
                assert_eq!(required, 3.0);
                assert_eq!(actual, 2.5);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!fx.base.exists());
    }

    #[tokio::test]
    async fn test_missing_tool_creates_no_directory() {
        let fx = fixture();
        let cut = interactor(
            Ok(ten_seconds()),
            Err(ToolError::NotFound {
                program: "/opt/ffmpeg/bin/ffmpeg".to_string(),
                reason: "the configured encoder path does not exist".to_string(),
            }),
            &fx.base,
        );

        let err = cut
            .execute(CutRequest::new(&fx.input, 3.0), &quiet())
            .await
            .unwrap_err();

        assert!(matches!(err, ClipperError::ToolNotFound(_)));
        assert!(err.to_string().contains("--ffmpeg"));
        assert!(!fx.base.exists());
    }

    #[tokio::test]
    async fn test_unreadable_media_is_reported() {
        let fx = fixture();
        let cut = interactor(
            Err(ProbeError::Unreadable {
                path: fx.input.display().to_string(),
                reason: "Invalid data found when processing input".to_string(),
            }),
            Ok(Arc::new(FakeEncoder::default())),
            &fx.base,
        );

        let err = cut
            .execute(CutRequest::new(&fx.input, 3.0), &quiet())
            .await
            .unwrap_err();
        assert!(matches!(err, ClipperError::Probe(ProbeError::Unreadable { .. })));
        assert!(!fx.base.exists());
    }

    #[tokio::test]
    async fn test_input_validation_happens_first() {
        let fx = fixture();
        let encoder = Arc::new(FakeEncoder::default());
        let cut = interactor(Ok(ten_seconds()), Ok(encoder.clone()), &fx.base);

        let missing = cut
            .execute(CutRequest::new(fx.base.join("nope.mp4"), 3.0), &quiet())
            .await
            .unwrap_err();
        assert!(matches!(missing, ClipperError::InputNotFound { .. }));

        for bad in [0.0, -1.0, f64::NAN] {
            let err = cut
                .execute(CutRequest::new(&fx.input, bad), &quiet())
                .await
                .unwrap_err();
            assert!(matches!(err, ClipperError::InvalidClipLength { .. }));
        }
        assert_eq!(*encoder.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repeated_cuts_get_separate_directories() {
        let fx = fixture();
        let cut = interactor(
            Ok(ten_seconds()),
            Ok(Arc::new(FakeEncoder::default())),
            &fx.base,
        );

        let first = cut
            .execute(CutRequest::new(&fx.input, 5.0).started_at(at_noon()), &quiet())
            .await
            .unwrap();
        let second = cut
            .execute(CutRequest::new(&fx.input, 5.0).started_at(at_noon()), &quiet())
            .await
            .unwrap();

        assert_ne!(first.output_directory, second.output_directory);
        assert_eq!(first.total_saved, 6);
        assert_eq!(second.total_saved, 6);
    }
}
