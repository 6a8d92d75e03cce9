//! Session orchestration
//!
//! `SessionController` ties the capture collaborator to the transcription
//! job: start/stop the recording, run at most one job at a time on a
//! spawned task, and surface lifecycle events to the UI shell over an mpsc
//! channel.

mod controller;
mod events;

pub use controller::SessionController;
pub use events::SessionEvent;
