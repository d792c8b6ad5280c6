//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;
use clap_num::number_range;

use crate::domain::rules::{MAX_CLIP_LENGTH, MIN_CLIP_LENGTH};
use crate::output::ReportFormat;

fn clip_length_in_range(s: &str) -> Result<u32, String> {
    number_range(s, MIN_CLIP_LENGTH, MAX_CLIP_LENGTH)
}

/// Arguments for the cut command
#[derive(Args, Debug)]
pub struct CutArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Clip length in seconds (default: 3, or `clip_length` from the config)
    #[arg(short = 'l', long, value_parser = clip_length_in_range)]
    pub clip_length: Option<u32>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Do not draw a progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Print a single status line instead of the full information
    #[arg(long)]
    pub status: bool,
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Input video file path
    pub input: PathBuf,

    /// Zero-based frame number to extract
    #[arg(long, default_value_t = 0)]
    pub frame: u64,

    /// Image path (default: <output-dir>/preview/<name>_frame_<N>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
