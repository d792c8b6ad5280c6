// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file and return its metadata
    ///
    /// Fails with [`ProbeError::NotFound`] for missing files and
    /// [`ProbeError::Unreadable`] when the media library cannot make sense of them.
    async fn probe_media(&self, file_path: &str) -> Result<MediaInfo, ProbeError>;
}

/// Captured result of one encoder process run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Diagnostic text for a failed run: the trimmed stderr, or the exit status when
    /// the encoder printed nothing
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("encoder exited with status {}", code),
            None => "encoder was terminated by a signal".to_string(),
        }
    }

    /// Trimmed stderr, when the encoder printed anything at all
    pub fn warnings(&self) -> Option<&str> {
        Some(self.stderr.trim()).filter(|text| !text.is_empty())
    }
}

/// Port for the external encoding process
///
/// This is the one true I/O boundary of a cut; everything else can be exercised
/// against a fake implementation.
#[async_trait]
pub trait EncodePort: Send + Sync {
    /// Run the encoder with `args`, wait for it to exit and capture its output
    ///
    /// Returns [`InvokeError::Tool`] only when the executable cannot be started.
    async fn invoke(&self, args: &[String]) -> Result<ProcessOutput, InvokeError>;

    /// Human-readable name of the program being run, for logs
    fn program(&self) -> String;
}

/// Port handing out an encoder on demand
///
/// Resolving the executable is deferred until a command actually needs it, so
/// probing works without FFmpeg installed and a missing tool is reported before
/// anything is written to disk.
pub trait EncoderProvider: Send + Sync {
    fn acquire(&self) -> Result<std::sync::Arc<dyn EncodePort>, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_only_when_stderr_has_text() {
        let quiet = ProcessOutput {
            exit_code: Some(0),
            stderr: " \n".to_string(),
            ..Default::default()
        };
        assert!(quiet.success());
        assert_eq!(quiet.warnings(), None);

        let noisy = ProcessOutput {
            exit_code: Some(0),
            stderr: "Invalid NAL unit size\n".to_string(),
            ..Default::default()
        };
        assert!(noisy.success());
        assert_eq!(noisy.warnings(), Some("Invalid NAL unit size"));
    }
}
