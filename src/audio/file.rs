use std::path::{Path, PathBuf};
use tracing::info;

use super::{AudioAsset, AudioCapture};
use crate::error::TranscribeError;

/// File-backed capture backend.
///
/// Replays an already-recorded audio file instead of touching a microphone,
/// which lets the CLI and tests drive the full transcription pipeline.
/// `start` validates that the file exists; `stop` yields it as an asset with
/// the MIME type guessed from the extension.
pub struct FileCapture {
    path: PathBuf,
    capturing: bool,
}

impl FileCapture {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            capturing: false,
        }
    }

    fn mime_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("m4a") => "audio/m4a",
            Some("mp3") => "audio/mpeg",
            Some("wav") => "audio/wav",
            Some("flac") => "audio/flac",
            Some("ogg") => "audio/ogg",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait::async_trait]
impl AudioCapture for FileCapture {
    async fn start(&mut self) -> Result<(), TranscribeError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| TranscribeError::Capture(format!("{}: {}", self.path.display(), e)))?;

        if !meta.is_file() {
            return Err(TranscribeError::Capture(format!(
                "{} is not a file",
                self.path.display()
            )));
        }

        info!("Capturing from file: {}", self.path.display());
        self.capturing = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<AudioAsset, TranscribeError> {
        self.capturing = false;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("recording")
            .to_string();

        Ok(AudioAsset {
            location: self.path.display().to_string(),
            mime_type: Self::mime_type(&self.path).to_string(),
            file_name,
        })
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn name(&self) -> &str {
        "file"
    }
}
