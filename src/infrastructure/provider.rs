use crate::config::AppConfig;
use crate::services::transcription::{TranscriptionProvider, create_provider};
use std::sync::Arc;
use tracing::info;

pub async fn setup_provider(config: &AppConfig) -> anyhow::Result<Arc<dyn TranscriptionProvider>> {
    let provider = create_provider(config)?;

    // Warm up provider connection
    if provider.health_check().await {
        info!("🎙️  Transcription provider '{}' is reachable", provider.name());
    } else {
        tracing::warn!(
            "⚠️  Transcription provider '{}' unreachable! Requests will fail until it recovers.",
            provider.name()
        );
    }

    Ok(provider.into())
}
