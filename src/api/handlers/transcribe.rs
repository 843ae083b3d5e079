use crate::AppState;
use crate::api::error::AppError;
use crate::models::AudioUpload;
use crate::services::staging::StagedAudio;
use crate::services::transcription::{ProviderError, TranscriptionOptions};
use crate::utils::validation::{NO_AUDIO_FILE, validate_upload};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

#[utoipa::path(
    post,
    path = "/api/transcribe",
    request_body(content = crate::models::TranscribeForm, content_type = "multipart/form-data", description = "Audio file upload"),
    responses(
        (status = 200, description = "Transcript text", body = String, content_type = "text/plain"),
        (status = 400, description = "No file, empty file, or file name without extension", body = String),
        (status = 413, description = "Upload exceeds the configured size limit"),
        (status = 500, description = "Staging or transcription failed", body = String)
    ),
    tag = "transcription"
)]
pub async fn transcribe_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    // A body that isn't multipart carries no file
    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected non-multipart upload: {}", e);
        AppError::InvalidInput(NO_AUDIO_FILE.to_string())
    })?;

    let Some(upload) = read_audio_field(&mut multipart).await? else {
        warn!("Upload has no 'file' part");
        return Err(AppError::InvalidInput(NO_AUDIO_FILE.to_string()));
    };

    let extension = validate_upload(&upload).inspect_err(|e| {
        warn!(
            "Rejected upload '{}': {}",
            upload.file_name.as_deref().unwrap_or_default(),
            e
        );
    })?;

    info!(
        "🎧 Received '{}' ({} bytes, {})",
        upload.file_name.as_deref().unwrap_or_default(),
        upload.len(),
        upload.content_type.as_deref().unwrap_or("unknown type")
    );

    // Dropping `staged` on any early return below removes the file
    let staged = StagedAudio::stage(
        &state.config.temp_dir,
        &state.config.temp_file_prefix,
        &extension,
        upload.data,
    )
    .await?;
    debug!("Staged {} bytes at {}", staged.len(), staged.path().display());

    let options = TranscriptionOptions::new(state.config.transcription_model.as_str());
    let timeout = state.config.provider_timeout;
    let transcript = tokio::time::timeout(
        timeout,
        state.provider.transcribe(staged.path(), &options),
    )
    .await
    .map_err(|_| ProviderError::Timeout(timeout))??;

    match staged.close() {
        Ok(path) => debug!("Removed staged file {}", path.display()),
        Err(e) => warn!("Failed to remove staged file: {}", e),
    }

    info!(
        "📝 Transcribed with '{}': {} chars",
        state.provider.name(),
        transcript.len()
    );

    Ok((
        [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())],
        transcript,
    )
        .into_response())
}

/// Buffers the first part named `file`; other parts are skipped.
async fn read_audio_field(multipart: &mut Multipart) -> Result<Option<AudioUpload>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        return Ok(Some(AudioUpload {
            file_name,
            content_type,
            data,
        }));
    }

    Ok(None)
}
