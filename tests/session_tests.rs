use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use speechnote::{
    AudioAsset, AudioCapture, PollPolicy, SessionController, SessionEvent, StatusResponse,
    TranscribeError, TranscriptApi, TranscriptStatus, UploadedAudio,
};

/// Capture collaborator fake: yields a canned asset, or reports the
/// permission denial the UI shell would surface.
struct FakeCapture {
    capturing: bool,
    deny_permission: bool,
}

impl FakeCapture {
    fn new() -> Self {
        Self {
            capturing: false,
            deny_permission: false,
        }
    }

    fn denying() -> Self {
        Self {
            capturing: false,
            deny_permission: true,
        }
    }
}

#[async_trait]
impl AudioCapture for FakeCapture {
    async fn start(&mut self) -> Result<(), TranscribeError> {
        if self.deny_permission {
            return Err(TranscribeError::PermissionDenied);
        }
        self.capturing = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<AudioAsset, TranscribeError> {
        self.capturing = false;
        Ok(AudioAsset {
            location: "/tmp/recording.m4a".to_string(),
            mime_type: "audio/m4a".to_string(),
            file_name: "recording.m4a".to_string(),
        })
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Remote service fake: upload and submit always succeed, polls replay a
/// script (last entry repeats).
struct ScriptedApi {
    polls: Mutex<VecDeque<StatusResponse>>,
}

impl ScriptedApi {
    fn new(polls: Vec<StatusResponse>) -> Arc<Self> {
        Arc::new(Self {
            polls: Mutex::new(polls.into()),
        })
    }

    fn completing(text: &str) -> Arc<Self> {
        Self::new(vec![
            StatusResponse {
                status: TranscriptStatus::Processing,
                text: None,
                error: None,
            },
            StatusResponse {
                status: TranscriptStatus::Completed,
                text: Some(text.to_string()),
                error: None,
            },
        ])
    }

    fn never_finishing() -> Arc<Self> {
        Self::new(vec![StatusResponse {
            status: TranscriptStatus::Processing,
            text: None,
            error: None,
        }])
    }
}

#[async_trait]
impl TranscriptApi for ScriptedApi {
    async fn upload(&self, _asset: &AudioAsset) -> Result<UploadedAudio, TranscribeError> {
        Ok(UploadedAudio {
            url: "https://x/a".to_string(),
        })
    }

    async fn submit(&self, _upload: UploadedAudio) -> Result<String, TranscribeError> {
        Ok("t1".to_string())
    }

    async fn fetch_status(&self, _job_id: &str) -> Result<StatusResponse, TranscribeError> {
        let mut polls = self.polls.lock().unwrap();
        if polls.len() > 1 {
            Ok(polls.pop_front().unwrap())
        } else {
            Ok(polls.front().cloned().expect("poll script exhausted"))
        }
    }
}

fn fast_policy() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(5),
        timeout: None,
    }
}

fn drain(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut collected = Vec::new();
    while let Ok(event) = events.try_recv() {
        collected.push(event);
    }
    collected
}

#[tokio::test]
async fn test_full_flow_emits_lifecycle_events() {
    let (mut session, mut events) = SessionController::new(
        ScriptedApi::completing("hello world"),
        Box::new(FakeCapture::new()),
        fast_policy(),
    );

    session.start_recording().await.unwrap();
    session.stop_recording().await.unwrap();
    session.wait_idle().await;

    assert_eq!(
        drain(&mut events),
        vec![
            SessionEvent::RecordingStarted,
            SessionEvent::Busy(true),
            SessionEvent::TranscriptReady("hello world".to_string()),
            SessionEvent::Busy(false),
        ]
    );
}

#[tokio::test]
async fn test_start_recording_is_idempotent() {
    let (mut session, mut events) = SessionController::new(
        ScriptedApi::completing("x"),
        Box::new(FakeCapture::new()),
        fast_policy(),
    );

    session.start_recording().await.unwrap();
    session.start_recording().await.unwrap();

    // Second start is ignored: a single recording-started event
    assert_eq!(drain(&mut events), vec![SessionEvent::RecordingStarted]);
}

#[tokio::test]
async fn test_stop_without_recording_fails() {
    let (mut session, mut events) = SessionController::new(
        ScriptedApi::completing("x"),
        Box::new(FakeCapture::new()),
        fast_policy(),
    );

    let err = session.stop_recording().await.unwrap_err();

    assert_eq!(err, TranscribeError::NoActiveRecording);
    assert!(drain(&mut events).is_empty());

    // Controller is still usable afterwards
    session.start_recording().await.unwrap();
    assert_eq!(drain(&mut events), vec![SessionEvent::RecordingStarted]);
}

#[tokio::test]
async fn test_permission_denied_surfaces_to_caller() {
    let (mut session, mut events) = SessionController::new(
        ScriptedApi::completing("x"),
        Box::new(FakeCapture::denying()),
        fast_policy(),
    );

    let err = session.start_recording().await.unwrap_err();

    assert_eq!(err, TranscribeError::PermissionDenied);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_job_failure_emits_transcript_failed() {
    let api = ScriptedApi::new(vec![StatusResponse {
        status: TranscriptStatus::Error,
        text: None,
        error: Some("audio too short".to_string()),
    }]);
    let (mut session, mut events) =
        SessionController::new(api, Box::new(FakeCapture::new()), fast_policy());

    session.start_recording().await.unwrap();
    session.stop_recording().await.unwrap();
    session.wait_idle().await;

    let collected = drain(&mut events);
    assert_eq!(collected[0], SessionEvent::RecordingStarted);
    assert_eq!(collected[1], SessionEvent::Busy(true));
    assert!(matches!(
        &collected[2],
        SessionEvent::TranscriptFailed(reason) if reason.contains("audio too short")
    ));
    assert_eq!(collected[3], SessionEvent::Busy(false));
}

#[tokio::test]
async fn test_new_recording_abandons_polling_job_silently() {
    let (mut session, mut events) = SessionController::new(
        ScriptedApi::never_finishing(),
        Box::new(FakeCapture::new()),
        PollPolicy {
            interval: Duration::from_millis(20),
            timeout: None,
        },
    );

    session.start_recording().await.unwrap();
    session.stop_recording().await.unwrap();

    // Let the job get into its poll wait, then start over
    tokio::time::sleep(Duration::from_millis(30)).await;
    session.start_recording().await.unwrap();

    // Give the abandoned task time to observe the cancellation
    tokio::time::sleep(Duration::from_millis(100)).await;

    // The discarded job emits nothing: no failure, no busy(false)
    assert_eq!(
        drain(&mut events),
        vec![
            SessionEvent::RecordingStarted,
            SessionEvent::Busy(true),
            SessionEvent::RecordingStarted,
        ]
    );
}
