/// Lifecycle events consumed by the UI collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Capture has started
    RecordingStarted,
    /// A transcription job is (no longer) in flight
    Busy(bool),
    /// Terminal: the transcript text for the last recording
    TranscriptReady(String),
    /// Terminal: human-readable reason the last job failed
    TranscriptFailed(String),
}
