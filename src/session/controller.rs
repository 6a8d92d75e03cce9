use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::events::SessionEvent;
use crate::audio::AudioCapture;
use crate::client::TranscriptApi;
use crate::error::TranscribeError;
use crate::job::{JobOutcome, PollPolicy, TranscriptionJob};

struct ActiveJob {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Orchestrates one transcription job at a time.
///
/// The UI shell calls `start_recording`/`stop_recording` and reads events
/// from the receiver returned by `new`. At most one job is in flight; a new
/// recording started while a job is still polling abandons that job
/// silently.
pub struct SessionController {
    api: Arc<dyn TranscriptApi>,
    capture: Box<dyn AudioCapture>,
    policy: PollPolicy,
    events: mpsc::UnboundedSender<SessionEvent>,
    active_job: Option<ActiveJob>,
}

impl SessionController {
    pub fn new(
        api: Arc<dyn TranscriptApi>,
        capture: Box<dyn AudioCapture>,
        policy: PollPolicy,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();

        (
            Self {
                api,
                capture,
                policy,
                events,
                active_job: None,
            },
            events_rx,
        )
    }

    /// Start a new recording.
    ///
    /// Ignored if one is already active (no duplicate event). Any job still
    /// polling from a previous recording is cancelled and abandoned first.
    pub async fn start_recording(&mut self) -> Result<(), TranscribeError> {
        if self.capture.is_capturing() {
            debug!("Recording already active, ignoring start");
            return Ok(());
        }

        if let Some(job) = self.active_job.take() {
            if !job.handle.is_finished() {
                info!("Abandoning in-flight transcription job");
            }
            job.cancel.cancel();
        }

        self.capture.start().await?;

        info!("Recording started ({} backend)", self.capture.name());
        self.emit(SessionEvent::RecordingStarted);

        Ok(())
    }

    /// Finalize the recording and transcribe it.
    ///
    /// Creates the job and drives it on a spawned task; the outcome arrives
    /// as `TranscriptReady`/`TranscriptFailed` followed by `Busy(false)`.
    /// Returns the job id.
    pub async fn stop_recording(&mut self) -> Result<String, TranscribeError> {
        if !self.capture.is_capturing() {
            return Err(TranscribeError::NoActiveRecording);
        }

        let asset = self.capture.stop().await?;
        info!("Recording stopped: {}", asset.file_name);

        let mut job = TranscriptionJob::new(asset);
        let job_id = job.id().to_string();

        self.emit(SessionEvent::Busy(true));

        let api = Arc::clone(&self.api);
        let policy = self.policy.clone();
        let events = self.events.clone();
        let cancel = CancellationToken::new();
        let job_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            match job.begin(api.as_ref(), &policy, &job_cancel).await {
                Ok(JobOutcome::Completed(text)) => {
                    send(&events, SessionEvent::TranscriptReady(text));
                    send(&events, SessionEvent::Busy(false));
                }
                Ok(JobOutcome::Failed(e)) => {
                    send(&events, SessionEvent::TranscriptFailed(e.to_string()));
                    send(&events, SessionEvent::Busy(false));
                }
                // Abandoned: stay silent so a newer recording's events
                // aren't interleaved with stale ones
                Ok(JobOutcome::Discarded) => {}
                Err(e) => {
                    // Unreachable for a freshly created job
                    error!("Job refused to start: {}", e);
                    send(&events, SessionEvent::TranscriptFailed(e.to_string()));
                    send(&events, SessionEvent::Busy(false));
                }
            }
        });

        self.active_job = Some(ActiveJob { cancel, handle });

        Ok(job_id)
    }

    /// Wait for the in-flight job (if any) to reach a terminal state.
    pub async fn wait_idle(&mut self) {
        if let Some(job) = self.active_job.take() {
            if let Err(e) = job.handle.await {
                error!("Transcription task panicked: {}", e);
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        send(&self.events, event);
    }
}

fn send(events: &mpsc::UnboundedSender<SessionEvent>, event: SessionEvent) {
    if events.send(event).is_err() {
        warn!("Event receiver dropped, discarding session event");
    }
}
