mod file;

pub use file::FileCapture;

use crate::error::TranscribeError;

/// A finished recording handed over by the capture collaborator.
///
/// Immutable once produced; the transcription job reads it but never
/// modifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioAsset {
    /// Where the audio lives (a filesystem path for the built-in backends)
    pub location: String,
    /// MIME type declared to the transcription service (e.g. "audio/m4a")
    pub mime_type: String,
    /// File name used for the multipart upload
    pub file_name: String,
}

/// Audio capture collaborator
///
/// The UI shell owns the actual recording machinery (device access,
/// permission prompts); this trait is the seam it plugs into. `start`
/// reports a denied permission as `PermissionDenied`; `stop` finalizes the
/// recording and yields the asset to transcribe.
#[async_trait::async_trait]
pub trait AudioCapture: Send + Sync {
    /// Begin capturing audio
    async fn start(&mut self) -> Result<(), TranscribeError>;

    /// Finalize the recording and yield the captured asset
    async fn stop(&mut self) -> Result<AudioAsset, TranscribeError>;

    /// Whether a recording is currently in progress
    fn is_capturing(&self) -> bool;

    /// Backend name for logging
    fn name(&self) -> &str;
}
