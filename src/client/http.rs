use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

use super::api::{TranscriptApi, UploadedAudio};
use super::wire::{StatusResponse, SubmitRequest, SubmitResponse, UploadResponse};
use crate::audio::AudioAsset;
use crate::config::ServiceConfig;
use crate::error::TranscribeError;

const ERROR_BODY_PREVIEW_CHARS: usize = 240;

/// HTTP client for the transcription service.
///
/// Holds only the reqwest client, the base URL and the static credential;
/// every call is independent.
pub struct TranscriptionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TranscriptionClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn truncate_error_text(s: &str) -> String {
        s.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
    }

    /// Collapse a non-success response into "status: body preview"
    async fn describe_failure(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        format!("{}: {}", status, Self::truncate_error_text(&body))
    }
}

#[async_trait::async_trait]
impl TranscriptApi for TranscriptionClient {
    async fn upload(&self, asset: &AudioAsset) -> Result<UploadedAudio, TranscribeError> {
        let bytes = tokio::fs::read(&asset.location)
            .await
            .map_err(|e| TranscribeError::Upload(format!("{}: {}", asset.location, e)))?;

        debug!(
            "Uploading {} ({} bytes, {})",
            asset.file_name,
            bytes.len(),
            asset.mime_type
        );

        let part = Part::bytes(bytes)
            .file_name(asset.file_name.clone())
            .mime_str(&asset.mime_type)
            .map_err(|e| TranscribeError::Upload(e.to_string()))?;

        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(|e| TranscribeError::Upload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranscribeError::Upload(
                Self::describe_failure(response).await,
            ));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Upload(e.to_string()))?;

        match body.upload_url {
            Some(url) => Ok(UploadedAudio { url }),
            None => Err(TranscribeError::Upload(
                "response missing upload_url".to_string(),
            )),
        }
    }

    async fn submit(&self, upload: UploadedAudio) -> Result<String, TranscribeError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&SubmitRequest {
                audio_url: upload.url,
            })
            .send()
            .await
            .map_err(|e| TranscribeError::Submit(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranscribeError::Submit(
                Self::describe_failure(response).await,
            ));
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Submit(e.to_string()))?;

        match body.id {
            Some(id) => Ok(id),
            None => Err(TranscribeError::Submit(
                "response missing job id".to_string(),
            )),
        }
    }

    async fn fetch_status(&self, job_id: &str) -> Result<StatusResponse, TranscribeError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}", self.base_url, job_id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscribeError::Poll(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranscribeError::Poll(
                Self::describe_failure(response).await,
            ));
        }

        response
            .json()
            .await
            .map_err(|e| TranscribeError::Poll(e.to_string()))
    }
}
