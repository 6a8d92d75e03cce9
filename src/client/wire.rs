use serde::{Deserialize, Serialize};

/// Body for `POST /v2/transcript`
#[derive(Debug, Serialize)]
pub struct SubmitRequest {
    pub audio_url: String,
}

/// Response from `POST /v2/upload`
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub upload_url: Option<String>,
}

/// Response from `POST /v2/transcript`
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub id: Option<String>,
}

/// Response from `GET /v2/transcript/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: TranscriptStatus,
    pub text: Option<String>,
    /// Failure detail the service attaches when status is `error`
    pub error: Option<String>,
}

/// Remote job status as reported by the service. Any other value is a
/// malformed response and fails the poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl TranscriptStatus {
    /// Whether the remote job is still in flight
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Queued | Self::Processing)
    }
}
