use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for the transcription service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maximum accepted upload size in bytes (default: 25 MB, the OpenAI audio limit)
    pub max_upload_size: usize,

    /// Allowed CORS Origins (comma separated). `*` allows any origin, empty means same-origin only
    pub allowed_origins: Vec<String>,

    /// Directory where uploads are staged before being sent to the provider
    pub temp_dir: PathBuf,

    /// Prefix for staged file names (default: "audio")
    pub temp_file_prefix: String,

    /// Provider type: "openai" or "disabled" (default: "openai")
    pub provider_type: String,

    /// OpenAI API key (required when provider_type is "openai")
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API (default: "https://api.openai.com/v1")
    pub openai_base_url: String,

    /// Model name sent with every transcription request (default: "whisper-1")
    pub transcription_model: String,

    /// Upper bound on a single provider call (default: 120 s)
    pub provider_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_upload_size: 25 * 1024 * 1024, // 25 MB
            allowed_origins: vec!["http://localhost:5173".to_string()], // Vite default
            temp_dir: env::temp_dir(),
            temp_file_prefix: "audio".to_string(),
            provider_type: "openai".to_string(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            transcription_model: "whisper-1".to_string(),
            provider_timeout: Duration::from_secs(120),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .unwrap_or(default.allowed_origins),

            temp_dir: env::var("TRANSCRIBE_TEMP_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.temp_dir),

            temp_file_prefix: env::var("TEMP_FILE_PREFIX").unwrap_or(default.temp_file_prefix),

            provider_type: env::var("TRANSCRIPTION_PROVIDER").unwrap_or(default.provider_type),

            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            openai_base_url: env::var("OPENAI_BASE_URL").unwrap_or(default.openai_base_url),

            transcription_model: env::var("TRANSCRIPTION_MODEL")
                .unwrap_or(default.transcription_model),

            provider_timeout: env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.provider_timeout),
        }
    }

    /// Create config for development (no provider, localhost origins)
    pub fn development() -> Self {
        Self {
            provider_type: "disabled".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            provider_timeout: Duration::from_secs(30),
            ..Self::default()
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
