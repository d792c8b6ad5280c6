//! ClipSplit video splitter library
//!
//! Splits a video into fixed-length clips starting at every whole second of the
//! source, re-encoding each clip with FFmpeg so it starts exactly where it should.
//! Planning and reporting are pure; probing goes through libav and encoding through
//! the FFmpeg command-line tool, both behind ports in [`ports`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::{InvokeError, PlanError, ProbeError, ToolError};
pub use domain::model::{ClipOutcome, ClipStatus, ClipWindow, CutReport, MediaInfo};
pub use error::{ClipperError, ClipperResult};
pub use planner::plan;
