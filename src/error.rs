//! Error handling for Arbor Engine
//!
//! Nothing inside the per-frame loop is fatal: fetch failures degrade to a
//! fallback or placeholder and missing drawables are skipped. This type only
//! covers construction-time problems (configuration, lookups by id).

/// Main error type for Arbor Engine
#[derive(Debug, thiserror::Error)]
pub enum ArborError {
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error for {path}: {error}")]
    IoError { path: String, error: String },

    #[error("Parse error in {context}: {error}")]
    ParseError { context: String, error: String },

    #[error("Photo not found: {id}")]
    PhotoNotFound { id: String },

    #[error("Failed to spawn {task}: {error}")]
    SpawnFailed { task: String, error: String },
}

/// Type alias for Results in Arbor Engine
pub type ArborResult<T> = Result<T, ArborError>;

impl From<std::io::Error> for ArborError {
    fn from(error: std::io::Error) -> Self {
        ArborError::IoError {
            path: String::new(),
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ArborError {
    fn from(error: toml::de::Error) -> Self {
        ArborError::ParseError {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}

impl From<futures::task::SpawnError> for ArborError {
    fn from(error: futures::task::SpawnError) -> Self {
        ArborError::SpawnFailed {
            task: "image fetch".to_string(),
            error: error.to_string(),
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_arbor<F>(self, f: F) -> ArborResult<T>
    where
        F: FnOnce() -> ArborError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_arbor<F>(self, f: F) -> ArborResult<T>
    where
        F: FnOnce() -> ArborError,
    {
        self.ok_or_else(f)
    }
}
