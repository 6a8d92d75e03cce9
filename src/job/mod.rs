//! Transcription job state machine
//!
//! One `TranscriptionJob` owns the lifecycle of a single remote request:
//! `Idle → Uploading → Submitting → Polling → Completed | Failed`. The job
//! talks only to a `TranscriptApi` and performs no I/O of its own beyond
//! those calls; the polling wait is its single repeating suspension point
//! and is cancellable between every poll.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::audio::AudioAsset;
use crate::client::{TranscriptApi, TranscriptStatus};
use crate::error::TranscribeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Uploading,
    Submitting,
    Polling,
    Completed,
    Failed,
    /// Abandoned by cancellation; terminal, never reported to the UI
    Discarded,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Discarded)
    }
}

/// How the polling phase behaves: fixed delay between status fetches, and an
/// optional overall deadline after which the job fails with `Timeout`.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: None,
        }
    }
}

/// Terminal outcome of driving a job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed(String),
    Failed(TranscribeError),
    Discarded,
}

pub struct TranscriptionJob {
    id: String,
    audio: AudioAsset,
    state: JobState,
    remote_job_id: Option<String>,
    result: Option<String>,
    error: Option<TranscribeError>,
    created_at: DateTime<Utc>,
}

impl TranscriptionJob {
    pub fn new(audio: AudioAsset) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            audio,
            state: JobState::Idle,
            remote_job_id: None,
            result: None,
            error: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn audio(&self) -> &AudioAsset {
        &self.audio
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn remote_job_id(&self) -> Option<&str> {
        self.remote_job_id.as_deref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn error(&self) -> Option<&TranscribeError> {
        self.error.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Drive the job from `Idle` to a terminal state.
    ///
    /// Returns `Err(InvalidState)` without mutating anything if the job has
    /// already been started. Remote failures are stored on the job and
    /// returned as `Ok(JobOutcome::Failed(..))`; only the re-entrancy guard
    /// is a caller error.
    pub async fn begin(
        &mut self,
        api: &dyn TranscriptApi,
        policy: &PollPolicy,
        cancel: &CancellationToken,
    ) -> Result<JobOutcome, TranscribeError> {
        if self.state != JobState::Idle {
            return Err(TranscribeError::InvalidState { state: self.state });
        }

        info!("Job {}: uploading {}", self.id, self.audio.file_name);
        self.state = JobState::Uploading;
        let uploaded = match api.upload(&self.audio).await {
            Ok(uploaded) => uploaded,
            Err(e) => return Ok(self.fail(e)),
        };

        debug!("Job {}: audio accepted at {}", self.id, uploaded.url);
        self.state = JobState::Submitting;
        let remote_id = match api.submit(uploaded).await {
            Ok(id) => id,
            Err(e) => return Ok(self.fail(e)),
        };

        info!("Job {}: submitted as remote job {}", self.id, remote_id);
        self.remote_job_id = Some(remote_id.clone());
        self.state = JobState::Polling;

        let deadline = policy.timeout.map(|t| Instant::now() + t);

        loop {
            let poll = match api.fetch_status(&remote_id).await {
                Ok(poll) => poll,
                Err(e) => return Ok(self.fail(e)),
            };

            match poll.status {
                TranscriptStatus::Completed => {
                    // A completed job without text is a broken response, not
                    // an empty transcript
                    let text = match poll.text {
                        Some(text) => text,
                        None => {
                            return Ok(self.fail(TranscribeError::Poll(
                                "completed response missing text".to_string(),
                            )))
                        }
                    };

                    info!("Job {}: completed ({} chars)", self.id, text.len());
                    self.result = Some(text.clone());
                    self.state = JobState::Completed;
                    return Ok(JobOutcome::Completed(text));
                }

                TranscriptStatus::Error => {
                    let detail = poll
                        .error
                        .unwrap_or_else(|| "no detail provided".to_string());
                    return Ok(self.fail(TranscribeError::Remote(detail)));
                }

                TranscriptStatus::Queued | TranscriptStatus::Processing => {
                    debug!("Job {}: still {:?}", self.id, poll.status);

                    if let Some(deadline) = deadline {
                        if Instant::now() >= deadline {
                            // policy.timeout is always Some here
                            let timeout = policy.timeout.unwrap_or_default();
                            return Ok(self.fail(TranscribeError::Timeout(timeout)));
                        }
                    }

                    tokio::select! {
                        _ = cancel.cancelled() => {
                            info!("Job {}: discarded while polling", self.id);
                            self.state = JobState::Discarded;
                            return Ok(JobOutcome::Discarded);
                        }
                        _ = tokio::time::sleep(policy.interval) => {}
                    }
                }
            }
        }
    }

    fn fail(&mut self, error: TranscribeError) -> JobOutcome {
        warn!("Job {}: failed: {}", self.id, error);
        self.error = Some(error.clone());
        self.state = JobState::Failed;
        JobOutcome::Failed(error)
    }
}
