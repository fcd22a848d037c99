use serde::Serialize;
use ts_rs::TS;

/// Failures outside the rendering core: settings files, preset lookup and
/// overlapping generation requests. Serialized as `{ code, detail }` so a
/// frontend can match on the code and show an appropriate message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS, thiserror::Error)]
#[serde(tag = "code", content = "detail")]
#[ts(export)]
pub enum StudioError {
    #[error("I/O error: {message}")]
    Io { message: String },
    #[error("JSON error: {message}")]
    Json { message: String },
    #[error("Unknown preset: {id}")]
    UnknownPreset { id: String },
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },
    #[error("A generation is already in progress")]
    Busy,
}

impl From<std::io::Error> for StudioError {
    fn from(e: std::io::Error) -> Self {
        StudioError::Io {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::Json {
            message: e.to_string(),
        }
    }
}

impl From<StudioError> for String {
    fn from(e: StudioError) -> String {
        e.to_string()
    }
}
