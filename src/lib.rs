pub mod audio;
pub mod client;
pub mod config;
pub mod error;
pub mod job;
pub mod session;

pub use audio::{AudioAsset, AudioCapture, FileCapture};
pub use client::{
    StatusResponse, TranscriptApi, TranscriptStatus, TranscriptionClient, UploadedAudio,
};
pub use config::{Config, ServiceConfig};
pub use error::TranscribeError;
pub use job::{JobOutcome, JobState, PollPolicy, TranscriptionJob};
pub use session::{SessionController, SessionEvent};
