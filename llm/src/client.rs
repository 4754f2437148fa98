//! HTTP client for OpenAI-compatible completion servers.
//!
//! [`OpenAIClient`] implements [`LLMClient`] against the `/chat/completions`
//! and `/completions` endpoints of any server exposing the OpenAI wire format.

use async_trait::async_trait;
use dialog::Turn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{Completion, CompletionOptions, Usage};
use crate::traits::{LLMClient, LLMError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct TextResponse {
    choices: Vec<TextChoice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct TextChoice {
    text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAIClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, LLMError> {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        debug!(%url, "sending completion request");
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);
            warn!(status = status.as_u16(), %message, "completion request rejected");
            return Err(LLMError::Api {
                status: status.as_u16(),
                message,
            });
        }
        resp.json::<T>().await.map_err(|_| LLMError::InvalidResponse)
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn chat_completion(
        &self,
        messages: &[Turn],
        options: &CompletionOptions,
    ) -> Result<Completion, LLMError> {
        let body = serde_json::json!({
            "model": options.model,
            "messages": messages,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });
        let res: ChatResponse = self.post("chat/completions", body).await?;
        let content = res
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LLMError::InvalidResponse)?;
        debug!(total_tokens = res.usage.total_tokens, "chat completion received");
        Ok(Completion {
            content,
            usage: res.usage,
        })
    }

    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<Completion, LLMError> {
        let body = serde_json::json!({
            "model": options.model,
            "prompt": prompt,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });
        let res: TextResponse = self.post("completions", body).await?;
        let content = res
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or(LLMError::InvalidResponse)?;
        debug!(total_tokens = res.usage.total_tokens, "text completion received");
        Ok(Completion {
            content,
            usage: res.usage,
        })
    }
}
