use thiserror::Error;

/// Errors raised while building or rendering a dialogue.
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed dialogue json: {0}")]
    Json(#[from] serde_json::Error),
}
