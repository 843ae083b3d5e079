use bytes::Bytes;
use utoipa::ToSchema;

/// The `file` part of a transcription request, fully buffered.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl AudioUpload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Multipart body accepted by `POST /api/transcribe`
#[derive(ToSchema)]
pub struct TranscribeForm {
    /// Audio content. The file name must carry an extension such as `.wav` or `.mp3`.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
