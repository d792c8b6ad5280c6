//! FFmpeg execution adapter
//!
//! Runs the FFmpeg command-line tool as a child process, one invocation at a time,
//! and captures its exit status and output.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::ports::*;

pub mod discovery;

/// FFmpeg-based execution adapter
#[derive(Debug, Clone)]
pub struct FFmpegAdapter {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl FFmpegAdapter {
    /// Create adapter for an already resolved executable
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Resolve the executable (configured path, else `PATH`) and create the adapter
    pub fn locate(configured: Option<&Path>) -> Result<Self, ToolError> {
        discovery::resolve_ffmpeg_path(configured).map(Self::new)
    }

    /// Kill an invocation that runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program_path(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl EncodePort for FFmpegAdapter {
    async fn invoke(&self, args: &[String]) -> Result<ProcessOutput, InvokeError> {
        debug!("Running {} {}", self.program.display(), args.join(" "));

        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ToolError::NotFound {
                program: self.program.display().to_string(),
                reason: e.to_string(),
            })?;

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    // The child future was dropped, kill_on_drop reaps the process
                    warn!("Encoder exceeded {}s, killed", limit.as_secs());
                    return Err(InvokeError::TimedOut {
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => child.wait_with_output().await,
        };
        let output = waited.map_err(|e| InvokeError::Wait(e.to_string()))?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn program(&self) -> String {
        self.program.display().to_string()
    }
}

/// Resolves FFmpeg when a command first needs it
#[derive(Debug, Clone, Default)]
pub struct FFmpegLocator {
    configured: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl FFmpegLocator {
    pub fn new(configured: Option<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            configured,
            timeout,
        }
    }
}

impl EncoderProvider for FFmpegLocator {
    fn acquire(&self) -> Result<Arc<dyn EncodePort>, ToolError> {
        let adapter = FFmpegAdapter::locate(self.configured.as_deref())?.with_timeout(self.timeout);
        info!("Using FFmpeg at {}", adapter.program_path().display());
        Ok(Arc::new(adapter))
    }
}
