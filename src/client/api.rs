use crate::audio::AudioAsset;
use crate::error::TranscribeError;

use super::wire::StatusResponse;

/// Reference to audio the service has accepted for transcription.
///
/// Consumed exactly once per job: `submit` takes it by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAudio {
    pub url: String,
}

/// Remote transcription API
///
/// Every call is a pure request/response mapping with no client-side state;
/// `fetch_status` performs a single GET and never waits or retries on its
/// own. The job state machine owns all sequencing and polling.
#[async_trait::async_trait]
pub trait TranscriptApi: Send + Sync {
    /// Upload the asset's bytes, returning the service-side audio URL
    async fn upload(&self, asset: &AudioAsset) -> Result<UploadedAudio, TranscribeError>;

    /// Create a transcription job for previously uploaded audio, returning
    /// the remote job identifier
    async fn submit(&self, upload: UploadedAudio) -> Result<String, TranscribeError>;

    /// Fetch the current status of a submitted job
    async fn fetch_status(&self, job_id: &str) -> Result<StatusResponse, TranscribeError>;
}
