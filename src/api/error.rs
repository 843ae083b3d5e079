use crate::services::transcription::ProviderError;
use crate::utils::validation::ValidationError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const STORAGE_FAILURE: &str = "Error processing audio file";
pub const PROVIDER_FAILURE: &str = "Error transcribing audio file";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::InvalidInput(e.message)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::Storage(_) | AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::InvalidInput(msg) => msg,
            AppError::Multipart(e) => {
                tracing::warn!("Multipart error: {}", e);
                e.body_text()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                STORAGE_FAILURE.to_string()
            }
            AppError::Provider(e) => {
                tracing::error!("Provider error: {}", e);
                PROVIDER_FAILURE.to_string()
            }
        };

        (status, message).into_response()
    }
}
