//! Transcription service client
//!
//! Three stateless calls against the remote service: upload the audio bytes,
//! submit a transcription job for the uploaded URL, and fetch job status.
//! `TranscriptApi` is the seam the job/session layers depend on; the reqwest
//! implementation lives in `http`.

mod api;
mod http;
pub mod wire;

pub use api::{TranscriptApi, UploadedAudio};
pub use http::TranscriptionClient;
pub use wire::{StatusResponse, TranscriptStatus};
