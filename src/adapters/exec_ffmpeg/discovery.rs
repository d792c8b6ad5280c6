//! Locating the FFmpeg executable
//!
//! An explicitly configured path wins. A configured bare program name, or no
//! configuration at all, is looked up on `PATH` and then in well-known install
//! locations.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::domain::errors::ToolError;

/// Default program name
pub const FFMPEG: &str = "ffmpeg";

fn executable_name(name: &str) -> OsString {
    #[cfg(windows)]
    {
        if Path::new(name).extension().is_none() {
            return OsString::from(format!("{}.exe", name));
        }
    }
    OsString::from(name)
}

fn common_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        vec![
            PathBuf::from("/opt/homebrew/bin/ffmpeg"),
            PathBuf::from("/usr/local/bin/ffmpeg"),
            PathBuf::from("/opt/local/bin/ffmpeg"),
        ]
    }

    #[cfg(target_os = "windows")]
    {
        vec![
            PathBuf::from("C:\\ffmpeg\\bin\\ffmpeg.exe"),
            PathBuf::from("C:\\Program Files\\ffmpeg\\bin\\ffmpeg.exe"),
        ]
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        vec![
            PathBuf::from("/usr/bin/ffmpeg"),
            PathBuf::from("/usr/local/bin/ffmpeg"),
        ]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
    {
        vec![]
    }
}

/// Search every directory of a `PATH`-style variable for `name`
pub fn find_in_path(name: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    let file_name = executable_name(name);
    let path_var = path_var?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

fn is_bare_program_name(path: &Path) -> bool {
    path.components().count() == 1 && !path.is_absolute()
}

/// Resolve the encoder executable
pub fn resolve_ffmpeg_path(configured: Option<&Path>) -> Result<PathBuf, ToolError> {
    resolve_with(configured, std::env::var_os("PATH"), &common_paths())
}

fn resolve_with(
    configured: Option<&Path>,
    path_var: Option<OsString>,
    fallbacks: &[PathBuf],
) -> Result<PathBuf, ToolError> {
    if let Some(path) = configured {
        if path.is_file() {
            debug!("FFmpeg taken from configuration: {}", path.display());
            return Ok(path.to_path_buf());
        }
        if is_bare_program_name(path) {
            if let Some(found) = find_in_path(&path.to_string_lossy(), path_var) {
                debug!("Configured FFmpeg found in PATH: {}", found.display());
                return Ok(found);
            }
        }
        error!("Configured FFmpeg not found: {}", path.display());
        return Err(ToolError::NotFound {
            program: path.display().to_string(),
            reason: "the configured encoder path does not exist".to_string(),
        });
    }

    if let Some(found) = find_in_path(FFMPEG, path_var) {
        debug!("FFmpeg found in PATH: {}", found.display());
        return Ok(found);
    }

    for path in fallbacks {
        if path.is_file() {
            debug!("FFmpeg found in common path: {}", path.display());
            return Ok(path.clone());
        }
    }

    error!("FFmpeg not found in PATH or common locations");
    Err(ToolError::NotFound {
        program: FFMPEG.to_string(),
        reason: "not found in PATH or common install locations".to_string(),
    })
}
