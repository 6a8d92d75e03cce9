use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use crate::job::PollPolicy;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
}

/// Transcription service settings. The API key comes from the config file or
/// the `SPEECHNOTE__SERVICE__API_KEY` environment variable, never from code.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,

    /// Base URL of the transcription service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for upload/submit/status calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay between status polls while a job is queued or processing
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Overall deadline for the polling phase; unset means poll indefinitely
    #[serde(default)]
    pub poll_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.assemblyai.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    5000
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_timeout_ms: None,
        }
    }
}

impl ServiceConfig {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            timeout: self.poll_timeout_ms.map(Duration::from_millis),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("SPEECHNOTE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
