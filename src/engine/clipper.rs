//! Per-window clip encoding
//!
//! Windows are encoded strictly one after another in index order. A failing clip is
//! recorded and the batch moves on; only an encoder that cannot be started at all
//! stops the batch.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::domain::errors::{InvokeError, ToolError};
use crate::domain::model::{ClipOutcome, ClipWindow};
use crate::engine::command::CutCommand;
use crate::engine::progress::ProgressCallback;
use crate::engine::EngineConfig;
use crate::output::clip_file_name;
use crate::ports::EncodePort;

/// Re-encoding clip encoder driving an [`EncodePort`]
pub struct ClipEncoder {
    encoder: Arc<dyn EncodePort>,
    config: EngineConfig,
}

impl ClipEncoder {
    pub fn new(encoder: Arc<dyn EncodePort>, config: EngineConfig) -> Self {
        Self { encoder, config }
    }

    /// Encode a single window into `output_dir`
    ///
    /// Returns `Err` only when the encoder cannot be started; every other failure
    /// becomes a failed [`ClipOutcome`].
    pub async fn encode(
        &self,
        source: &Path,
        window: &ClipWindow,
        output_dir: &Path,
    ) -> Result<ClipOutcome, ToolError> {
        let output_path = output_dir.join(clip_file_name(window.index));
        let args = CutCommand::new(
            source,
            &output_path,
            window.start,
            window.planned_duration(),
            &self.config,
        )
        .build();

        let started = Instant::now();
        let outcome = match self.encoder.invoke(&args).await {
            Ok(output) if output.success() => {
                if let Some(text) = output.warnings() {
                    warn!("Encoder reported problems for {}: {}", window, text);
                }
                if output_written(&output_path) {
                    ClipOutcome::success(window.clone(), output_path)
                } else {
                    ClipOutcome::failure(
                        window.clone(),
                        format!(
                            "encoder reported success but {} is missing or empty",
                            output_path.display()
                        ),
                    )
                }
            }
            Ok(output) => ClipOutcome::failure(window.clone(), output.diagnostic()),
            Err(InvokeError::Tool(e)) => return Err(e),
            Err(e) => ClipOutcome::failure(window.clone(), e.to_string()),
        };

        let elapsed = started.elapsed().as_secs_f64();
        match &outcome.error_message {
            None => debug!("Encoded {} in {:.2}s", window, elapsed),
            Some(message) => warn!("Clip {} failed after {:.2}s: {}", window, elapsed, message),
        }
        Ok(outcome)
    }

    /// Encode every eligible window, reporting progress after each one
    ///
    /// `windows` is the full plan; ineligible windows are skipped but still count
    /// towards the progress total.
    pub async fn encode_all(
        &self,
        source: &Path,
        windows: &[ClipWindow],
        output_dir: &Path,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<ClipOutcome>, ToolError> {
        let total = windows.len();
        let eligible_total = windows.iter().filter(|w| w.eligible).count();
        info!(
            "Encoding {} of {} windows with {}",
            eligible_total,
            total,
            self.encoder.program()
        );
        progress.on_progress(0.0, "Starting video cut");

        let mut outcomes = Vec::with_capacity(eligible_total);
        let mut reported = 0.0;
        for (position, window) in windows.iter().enumerate() {
            if !window.eligible {
                debug!("Skipping truncated window {}", window);
                continue;
            }

            let outcome = match self.encode(source, window, output_dir).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Aborting batch at window {}: {}", window.index, e);
                    return Err(e);
                }
            };
            let status = if outcome.is_success() { "saved" } else { "failed" };
            outcomes.push(outcome);

            reported = (position + 1) as f64 / total as f64;
            progress.on_progress(
                reported,
                &format!(
                    "Clip {}/{} {}",
                    outcomes.len(),
                    eligible_total,
                    status
                ),
            );
        }

        // Trailing skipped windows still have to move the indicator to the end
        if reported < 1.0 {
            progress.on_progress(1.0, "Video cut finished");
        }
        Ok(outcomes)
    }
}

fn output_written(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}
