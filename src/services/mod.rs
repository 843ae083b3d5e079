pub mod staging;
pub mod transcription;
