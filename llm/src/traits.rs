use async_trait::async_trait;
use dialog::{DialogError, Turn};
use thiserror::Error;

use crate::model::{Completion, CompletionOptions};

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("invalid response")]
    InvalidResponse,
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error(transparent)]
    Dialog(#[from] DialogError),
}

/// A completion backend speaking either structured chat or flat prompts.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Submit role-tagged messages and return the first choice.
    async fn chat_completion(
        &self,
        messages: &[Turn],
        options: &CompletionOptions,
    ) -> Result<Completion, LLMError>;

    /// Submit a flat text prompt and return the first choice.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<Completion, LLMError>;
}
