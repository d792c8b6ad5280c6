//! Cut report aggregation and rendering

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::model::{ClipOutcome, ClipWindow, CutReport};
use crate::error::{ClipperError, ClipperResult};
use crate::output::ReportFormat;

/// Aggregate per-window outcomes into a report
///
/// `attempted` is the full plan, including windows that were never encoded.
/// Outcomes are ordered by window index regardless of the order they arrive in.
pub fn summarize(
    attempted: &[ClipWindow],
    mut outcomes: Vec<ClipOutcome>,
    output_dir: &Path,
    clip_length: f64,
) -> CutReport {
    outcomes.sort_by_key(|o| o.window.index);
    let total_saved = outcomes.iter().filter(|o| o.is_success()).count();

    CutReport {
        total_windows_attempted: attempted.len(),
        total_eligible: attempted.iter().filter(|w| w.eligible).count(),
        total_saved,
        output_directory: output_dir.to_path_buf(),
        clip_length,
        reencoded: true,
        outcomes,
    }
}

/// Render the report in the requested format
pub fn render(report: &CutReport, format: ReportFormat) -> ClipperResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(report)),
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).map_err(|e| ClipperError::Serialization {
                message: e.to_string(),
            })
        }
        ReportFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| ClipperError::Serialization {
                message: e.to_string(),
            })
        }
    }
}

/// Human-readable multi-line report
pub fn render_text(report: &CutReport) -> String {
    let mut out = String::new();
    let headline = if report.total_failed() == 0 {
        "Video cut finished"
    } else {
        "Video cut finished with errors"
    };

    let _ = writeln!(out, "{}", headline);
    let _ = writeln!(out);
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Windows attempted: {}", report.total_windows_attempted);
    let _ = writeln!(out, "  Eligible windows:  {}", report.total_eligible);
    let _ = writeln!(out, "  Clips saved:       {}", report.total_saved);
    let _ = writeln!(out, "  Clips failed:      {}", report.total_failed());
    let _ = writeln!(out, "  Clip length:       {}s", format_length(report.clip_length));
    let _ = writeln!(out, "  Output directory:  {}", report.output_directory.display());

    if !report.outcomes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Clips:");
    }
    for outcome in &report.outcomes {
        let window = &outcome.window;
        match (&outcome.error_message, outcome.file_name()) {
            (None, name) => {
                let _ = writeln!(
                    out,
                    "  [ok]     {} {:.1}s - {:.1}s",
                    name.unwrap_or_default(),
                    window.start,
                    window.end
                );
            }
            (Some(message), _) => {
                let _ = writeln!(
                    out,
                    "  [FAILED] #{:03} {:.1}s - {:.1}s",
                    window.index, window.start, window.end
                );
                for line in message.lines() {
                    let _ = writeln!(out, "           {}", line);
                }
            }
        }
    }

    let skipped = report.total_windows_attempted - report.total_eligible;
    if skipped > 0 {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} trailing window(s) shorter than {}s were skipped.",
            skipped,
            format_length(report.clip_length)
        );
    }
    if report.reencoded {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Clips were re-encoded (H.264/AAC) so every cut starts exactly at its window."
        );
    }
    out
}

/// `3` rather than `3.0`, but keeps fractions
fn format_length(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{:.0}", seconds)
    } else {
        format!("{}", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;
    use std::path::PathBuf;

    fn outcomes_for(windows: &[ClipWindow], failed: &[usize]) -> Vec<ClipOutcome> {
        windows
            .iter()
            .filter(|w| w.eligible)
            .map(|w| {
                if failed.contains(&w.index) {
                    ClipOutcome::failure(w.clone(), "codec error")
                } else {
                    ClipOutcome::success(
                        w.clone(),
                        PathBuf::from("out").join(crate::output::clip_file_name(w.index)),
                    )
                }
            })
            .collect()
    }

    #[test]
    fn test_summarize_counts() {
        let windows = plan(10.0, 3.0).unwrap();
        let report = summarize(
            &windows,
            outcomes_for(&windows, &[2]),
            Path::new("out"),
            3.0,
        );

        assert_eq!(report.total_windows_attempted, 10);
        assert_eq!(report.total_eligible, 8);
        assert_eq!(report.total_saved, 7);
        assert_eq!(report.total_failed(), 1);
        assert!(report.total_saved <= report.total_windows_attempted);
        assert_eq!(report.failures().next().unwrap().window.index, 2);
    }

    #[test]
    fn test_summarize_orders_by_index() {
        let windows = plan(5.0, 2.0).unwrap();
        let mut outcomes = outcomes_for(&windows, &[]);
        outcomes.reverse();

        let report = summarize(&windows, outcomes, Path::new("out"), 2.0);
        let indices: Vec<usize> = report.outcomes.iter().map(|o| o.window.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_summarize_synthetic_failures_only() {
        let windows = plan(3.0, 3.0).unwrap();
        let report = summarize(
            &windows,
            outcomes_for(&windows, &[0]),
            Path::new("out"),
            3.0,
        );
        assert_eq!(report.total_saved, 0);
        assert_eq!(report.total_windows_attempted, 3);
    }

    #[test]
    fn test_render_text_marks_failures() {
        let windows = plan(10.0, 3.0).unwrap();
        let report = summarize(
            &windows,
            outcomes_for(&windows, &[2]),
            Path::new("out"),
            3.0,
        );
        let text = render_text(&report);

        assert!(text.starts_with("Video cut finished with errors\n"));
        assert!(text.contains("Windows attempted: 10"));
        assert!(text.contains("Clips saved:       7"));
        assert!(text.contains("Clip length:       3s"));
        assert!(text.contains("  [ok]     clip_000.mp4 0.0s - 3.0s"));
        assert!(text.contains("  [FAILED] #002 2.0s - 5.0s\n           codec error"));
        assert!(text.contains("2 trailing window(s) shorter than 3s were skipped."));
        assert!(text.contains("re-encoded"));

        let ok = text.find("clip_001.mp4").unwrap();
        let failed = text.find("#002").unwrap();
        let after = text.find("clip_003.mp4").unwrap();
        assert!(ok < failed && failed < after);
    }

    #[test]
    fn test_render_text_is_deterministic() {
        let windows = plan(4.5, 1.5).unwrap();
        let report = summarize(&windows, outcomes_for(&windows, &[]), Path::new("out"), 1.5);
        assert_eq!(render_text(&report), render_text(&report));
        assert!(render_text(&report).starts_with("Video cut finished\n"));
        assert!(render_text(&report).contains("Clip length:       1.5s"));
    }

    #[test]
    fn test_render_json_and_yaml() {
        let windows = plan(4.0, 3.0).unwrap();
        let report = summarize(
            &windows,
            outcomes_for(&windows, &[1]),
            Path::new("out"),
            3.0,
        );

        let json = render(&report, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_windows_attempted"], 4);
        assert_eq!(value["total_saved"], 1);
        assert_eq!(value["outcomes"][1]["status"], "failure");
        assert_eq!(value["outcomes"][1]["error_message"], "codec error");

        let yaml = render(&report, ReportFormat::Yaml).unwrap();
        let parsed: CutReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, report);
    }
}
