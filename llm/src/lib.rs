//! Clients for OpenAI-compatible completion servers.
//!
//! The `llm` crate defines an [`LLMClient`] trait with a concrete
//! [`OpenAIClient`], helpers that read configuration from the environment, and
//! a [`Throttle`] for spacing out batches of requests. Dialogues are rendered
//! into flat prompts with the templates from the `dialog` crate.

pub mod client;
pub mod model;
pub mod runner;
pub mod throttle;
pub mod traits;

pub use client::OpenAIClient;
pub use model::{Completion, CompletionOptions, Usage};
pub use runner::{
    chat_completion, client_from_env, client_from_lookup, complete_dialog, model_from_env,
    model_from_lookup,
};
pub use throttle::{throttle, Throttle};
pub use traits::{LLMClient, LLMError};
