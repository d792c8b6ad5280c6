//! CLI module for ClipSplit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub mod args;
pub mod commands;

pub use args::{CutArgs, InspectArgs, PreviewArgs};

/// ClipSplit video splitter
///
/// Splits a video into fixed-length, re-encoded clips starting at every whole second,
/// and inspects or previews video files.
#[derive(Parser, Debug)]
#[command(name = "clipsplit")]
#[command(about = "ClipSplit - split a video into fixed-length clips")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level, ignored when RUST_LOG is set
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Configuration file (TOML)
    #[arg(long, env = "CLIPSPLIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// FFmpeg executable to use
    #[arg(long, global = true)]
    pub ffmpeg: Option<PathBuf>,

    /// Base directory for clips and preview images
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a video into fixed-length clips
    Cut(args::CutArgs),
    /// Show video file information
    Inspect(args::InspectArgs),
    /// Extract a single frame as a PNG image
    Preview(args::PreviewArgs),
}
