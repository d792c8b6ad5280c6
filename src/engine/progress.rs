//! Progress callback system for front-end integration
//!
//! Progress is a pure observability hook. The batch encoder calls it between
//! clips and never reads anything back from it.

use std::io::Write;
use std::sync::Mutex;

/// Progress callback trait for front-end integration
pub trait ProgressCallback: Send + Sync {
    /// `fraction` is in `0.0..=1.0`, `description` names the step just finished
    fn on_progress(&self, fraction: f64, description: &str);
}

impl<F> ProgressCallback for F
where
    F: Fn(f64, &str) + Send + Sync,
{
    fn on_progress(&self, fraction: f64, description: &str) {
        self(fraction, description)
    }
}

/// Console progress callback for CLI usage, draws a bar on stderr
pub struct ConsoleProgressCallback {
    bar_length: usize,
    last_width: Mutex<usize>,
}

impl ConsoleProgressCallback {
    pub fn new() -> Self {
        Self {
            bar_length: 20,
            last_width: Mutex::new(0),
        }
    }

    /// Render one progress line
    pub fn render_line(&self, fraction: f64, description: &str) -> String {
        let fraction = fraction.clamp(0.0, 1.0);
        let filled = (fraction * self.bar_length as f64).round() as usize;
        let bar = "#".repeat(filled) + &"-".repeat(self.bar_length - filled);
        format!("[{}] {:>5.1}% {}", bar, fraction * 100.0, description)
    }
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_progress(&self, fraction: f64, description: &str) {
        let line = self.render_line(fraction, description);
        let mut last_width = self.last_width.lock().unwrap_or_else(|e| e.into_inner());
        let padding = last_width.saturating_sub(line.chars().count());
        *last_width = line.chars().count();

        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r{}{}", line, " ".repeat(padding));
        if fraction >= 1.0 {
            let _ = writeln!(stderr);
            *last_width = 0;
        }
        let _ = stderr.flush();
    }
}

/// JSON progress callback for structured output, one event per line on stderr
pub struct JsonProgressCallback;

impl JsonProgressCallback {
    pub fn event(fraction: f64, description: &str) -> serde_json::Value {
        serde_json::json!({
            "event": "progress",
            "percent": (fraction.clamp(0.0, 1.0) * 100.0),
            "message": description,
            "timestamp": chrono::Utc::now().to_rfc3339()
        })
    }
}

impl ProgressCallback for JsonProgressCallback {
    fn on_progress(&self, fraction: f64, description: &str) {
        eprintln!("{}", Self::event(fraction, description));
    }
}

/// No-op progress callback for when progress tracking is disabled
pub struct NoOpProgressCallback;

impl ProgressCallback for NoOpProgressCallback {
    fn on_progress(&self, _fraction: f64, _description: &str) {}
}
