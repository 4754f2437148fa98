use dialog::{DialogTemplate, Turn};
use tracing::info;

use crate::client::{OpenAIClient, DEFAULT_BASE_URL};
use crate::model::{Completion, CompletionOptions, Usage, DEFAULT_MODEL};
use crate::traits::{LLMClient, LLMError};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "OPENAI_MODEL";

/// Build an [`OpenAIClient`] from settings resolved by `lookup`.
///
/// `lookup` is queried with [`API_KEY_VAR`] and [`BASE_URL_VAR`]; the key is
/// required and the base URL falls back to the public OpenAI endpoint.
pub fn client_from_lookup<F>(lookup: F) -> Result<OpenAIClient, LLMError>
where
    F: Fn(&str) -> Option<String>,
{
    let key = lookup(API_KEY_VAR).ok_or(LLMError::MissingApiKey)?;
    let url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.into());
    Ok(OpenAIClient::new(url, key))
}

/// Resolve the model name via `lookup`, defaulting to [`DEFAULT_MODEL`].
pub fn model_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.into())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Create an [`OpenAIClient`] from `OPENAI_API_KEY` and `OPENAI_BASE_URL`.
pub fn client_from_env() -> Result<OpenAIClient, LLMError> {
    client_from_lookup(env_var)
}

/// Read the model name from the `OPENAI_MODEL` environment variable.
pub fn model_from_env() -> String {
    model_from_lookup(env_var)
}

/// Call the chat endpoint and return the generated content with its usage.
pub async fn chat_completion<C: LLMClient + ?Sized>(
    client: &C,
    messages: &[Turn],
    options: &CompletionOptions,
) -> Result<(String, Usage), LLMError> {
    let completion = client.chat_completion(messages, options).await?;
    info!(
        model = %options.model,
        prompt_tokens = completion.usage.prompt_tokens,
        completion_tokens = completion.usage.completion_tokens,
        "chat completion"
    );
    Ok((completion.content, completion.usage))
}

/// Render `turns` with `template` and submit the result as a flat prompt.
pub async fn complete_dialog<C, T>(
    client: &C,
    template: &T,
    turns: &[Turn],
    options: &CompletionOptions,
) -> Result<Completion, LLMError>
where
    C: LLMClient + ?Sized,
    T: DialogTemplate + ?Sized,
{
    let prompt = template.render(turns)?;
    let completion = client.complete(&prompt, options).await?;
    info!(
        model = %options.model,
        prompt_tokens = completion.usage.prompt_tokens,
        completion_tokens = completion.usage.completion_tokens,
        "dialog completion"
    );
    Ok(completion)
}
