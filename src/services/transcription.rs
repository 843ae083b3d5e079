use crate::config::AppConfig;
use anyhow::{Context, bail};
use reqwest::multipart;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Output format requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    Json,
    Text,
    Srt,
    VerboseJson,
    Vtt,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Text => "text",
            ResponseFormat::Srt => "srt",
            ResponseFormat::VerboseJson => "verbose_json",
            ResponseFormat::Vtt => "vtt",
        }
    }

    /// Whether the provider answers with a JSON document rather than raw text
    pub fn is_json(&self) -> bool {
        matches!(self, ResponseFormat::Json | ResponseFormat::VerboseJson)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionOptions {
    pub model: String,
    pub response_format: ResponseFormat,
    pub language: String,
    pub temperature: f32,
}

impl TranscriptionOptions {
    /// Plain text, English, temperature 0.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            response_format: ResponseFormat::Text,
            language: "en".to_string(),
            temperature: 0.0,
        }
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Transcription request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Provider response missing transcript: {0}")]
    InvalidResponse(String),

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Could not read staged audio: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transcription provider is disabled")]
    Disabled,
}

/// A speech-to-text backend
#[async_trait::async_trait]
pub trait TranscriptionProvider: Send + Sync {
    /// Short identifier used in logs and the health report
    fn name(&self) -> &str;

    /// Transcribe the audio file at `audio`. The file suffix tells the provider the format.
    async fn transcribe(
        &self,
        audio: &Path,
        options: &TranscriptionOptions,
    ) -> Result<String, ProviderError>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> bool;
}

/// Client for the OpenAI `/audio/transcriptions` API and compatible servers
pub struct OpenAiTranscriptionProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiTranscriptionProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid provider URL '{}'", base_url))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl TranscriptionProvider for OpenAiTranscriptionProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn transcribe(
        &self,
        audio: &Path,
        options: &TranscriptionOptions,
    ) -> Result<String, ProviderError> {
        let data = tokio::fs::read(audio).await?;
        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        tracing::debug!(
            "Sending {} bytes to {} as '{}'",
            data.len(),
            self.endpoint("audio/transcriptions"),
            file_name
        );

        let file_part = multipart::Part::bytes(data).file_name(file_name);
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", options.model.clone())
            .text("response_format", options.response_format.as_str())
            .text("language", options.language.clone())
            .text("temperature", options.temperature.to_string());

        let resp = self
            .client
            .post(self.endpoint("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let transcript = if options.response_format.is_json() {
            let json: serde_json::Value = serde_json::from_str(&body)
                .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
            json.get("text")
                .and_then(|t| t.as_str())
                .map(str::to_string)
                .ok_or_else(|| ProviderError::InvalidResponse("no 'text' field".to_string()))?
        } else {
            body
        };

        Ok(transcript)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("Provider health check failed: {}", e);
                false
            }
        }
    }
}

/// Provider used when transcription is switched off; every call fails
pub struct DisabledProvider;

#[async_trait::async_trait]
impl TranscriptionProvider for DisabledProvider {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn transcribe(
        &self,
        _audio: &Path,
        _options: &TranscriptionOptions,
    ) -> Result<String, ProviderError> {
        tracing::warn!("DisabledProvider: rejecting transcription request");
        Err(ProviderError::Disabled)
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Factory function to create the provider named by the config
pub fn create_provider(config: &AppConfig) -> anyhow::Result<Box<dyn TranscriptionProvider>> {
    match config.provider_type.to_lowercase().as_str() {
        "openai" => {
            let Some(api_key) = config.openai_api_key.clone() else {
                bail!("OPENAI_API_KEY must be set when TRANSCRIPTION_PROVIDER=openai");
            };
            Ok(Box::new(OpenAiTranscriptionProvider::new(
                api_key,
                &config.openai_base_url,
                config.provider_timeout,
            )?))
        }
        "disabled" | "none" | "noop" => Ok(Box::new(DisabledProvider)),
        other => {
            tracing::warn!("Unknown provider type '{}', using DisabledProvider", other);
            Ok(Box::new(DisabledProvider))
        }
    }
}
