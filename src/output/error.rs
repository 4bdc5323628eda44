//! Output Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Unknown output format '{name}' (valid options: {valid})")]
    UnknownFormat { name: String, valid: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl ContextualError for OutputError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, OutputError::UnknownFormat { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            OutputError::UnknownFormat { .. } => Some("Unknown output format requested"),
            _ => None,
        }
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
