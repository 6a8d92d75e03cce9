use anyhow::{bail, Result};
use clap::Parser;
use speechnote::{
    Config, FileCapture, SessionController, SessionEvent, TranscriptionClient,
};
use std::sync::Arc;
use tracing::info;

/// Transcribe an audio recording through the remote transcription service
#[derive(Parser, Debug)]
#[command(name = "speechnote", version)]
struct Args {
    /// Audio file to transcribe
    audio_file: String,

    /// Config file (also overridable via SPEECHNOTE__SERVICE__* env vars)
    #[arg(long, default_value = "config/speechnote")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    if cfg.service.api_key.is_empty() {
        bail!("no API key configured; set SPEECHNOTE__SERVICE__API_KEY or edit {}", args.config);
    }

    info!("speechnote v{}", env!("CARGO_PKG_VERSION"));
    info!("Service: {}", cfg.service.base_url);

    let client = Arc::new(TranscriptionClient::new(&cfg.service));
    let capture = Box::new(FileCapture::new(&args.audio_file));

    let (mut session, mut events) =
        SessionController::new(client, capture, cfg.service.poll_policy());

    session.start_recording().await?;
    session.stop_recording().await?;
    session.wait_idle().await;

    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::TranscriptReady(text) => {
                println!("{}", text);
            }
            SessionEvent::TranscriptFailed(reason) => {
                bail!("transcription failed: {}", reason);
            }
            SessionEvent::RecordingStarted | SessionEvent::Busy(_) => {}
        }
    }

    Ok(())
}
