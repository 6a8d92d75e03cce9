use thiserror::Error;

use crate::job::JobState;

/// Errors produced by the transcription pipeline.
///
/// Remote-call failures (`Upload`, `Submit`, `Poll`, `Remote`, `Timeout`) are
/// terminal for the job they occur in and reach the UI collaborator as a
/// single `transcript-failed` event. `PermissionDenied`, `NoActiveRecording`
/// and `InvalidState` are returned synchronously and never create a job.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranscribeError {
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("transcript submission failed: {0}")]
    Submit(String),

    #[error("status poll failed: {0}")]
    Poll(String),

    #[error("transcription service reported an error: {0}")]
    Remote(String),

    #[error("transcription did not complete within {0:?}")]
    Timeout(std::time::Duration),

    #[error("operation not valid while job is {state:?}")]
    InvalidState { state: JobState },

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no active recording")]
    NoActiveRecording,

    #[error("audio capture failed: {0}")]
    Capture(String),
}
