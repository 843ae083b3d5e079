use crate::models::AudioUpload;

pub const NO_AUDIO_FILE: &str = "No audio file uploaded";
pub const INVALID_FILE_NAME: &str = "Invalid file name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Checks an upload and returns the extension (with its leading dot) used to
/// name the staged file. The empty-file check runs before the file name check.
pub fn validate_upload(upload: &AudioUpload) -> Result<String, ValidationError> {
    if upload.is_empty() {
        return Err(ValidationError {
            code: "NO_AUDIO_FILE",
            message: NO_AUDIO_FILE.to_string(),
        });
    }

    audio_extension(upload.file_name.as_deref())
}

/// Extracts the extension from the last `.` of the file name onward, inclusive.
pub fn audio_extension(file_name: Option<&str>) -> Result<String, ValidationError> {
    let invalid = || ValidationError {
        code: "INVALID_FILE_NAME",
        message: INVALID_FILE_NAME.to_string(),
    };

    // Browsers on Windows may send a full path
    let name = file_name
        .map(str::trim)
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .ok_or_else(invalid)?;

    let Some(dot) = name.rfind('.') else {
        tracing::debug!("Rejecting file name '{}'", name);
        return Err(invalid());
    };

    Ok(name[dot..].to_string())
}
