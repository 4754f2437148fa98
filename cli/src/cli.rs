use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use llm::model::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use llm::runner::{API_KEY_VAR, BASE_URL_VAR, MODEL_VAR};
use llm::throttle::DEFAULT_INTERVAL;
use llm::{CompletionOptions, LLMError, OpenAIClient, client_from_lookup, model_from_lookup};

/// Format dialogues as Llama-2 prompts and query completion APIs.
#[derive(Parser, Debug)]
#[command(name = "llama-prompt", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the Llama-2 prompt for a dialogue
    Format(FormatArgs),
    /// Send dialogues to the chat completion endpoint
    Chat(ChatArgs),
    /// Render dialogues as Llama-2 prompts and send them to the text completion endpoint
    Complete(CompleteArgs),
}

#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Dialogue JSON file; stdin when omitted
    pub file: Option<PathBuf>,
    /// Fallback system prompt for dialogues without a system turn
    #[arg(long)]
    pub system_prompt: Option<String>,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Dialogue JSON files, sent in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[command(flatten)]
    pub api: ApiArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Dialogue JSON files, sent in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Fallback system prompt for dialogues without a system turn
    #[arg(long)]
    pub system_prompt: Option<String>,
    #[command(flatten)]
    pub api: ApiArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ApiArgs {
    /// Model name [default: $OPENAI_MODEL or gpt-3.5-turbo]
    #[arg(long)]
    pub model: Option<String>,
    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    /// Base URL of the OpenAI-compatible server [default: $OPENAI_BASE_URL or the OpenAI API]
    #[arg(long)]
    pub base_url: Option<String>,
    /// API key [default: $OPENAI_API_KEY]
    #[arg(long)]
    pub api_key: Option<String>,
}

impl ApiArgs {
    /// Setting named by an `OPENAI_*` variable: the flag if given, else the environment.
    fn lookup(&self, name: &str) -> Option<String> {
        let flag = match name {
            API_KEY_VAR => self.api_key.clone(),
            BASE_URL_VAR => self.base_url.clone(),
            MODEL_VAR => self.model.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(name).ok())
    }

    pub fn client(&self) -> Result<OpenAIClient, LLMError> {
        client_from_lookup(|name| self.lookup(name))
    }

    pub fn options(&self) -> CompletionOptions {
        CompletionOptions::new(model_from_lookup(|name| self.lookup(name)))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
    }
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Print token usage as JSON after each result
    #[arg(long)]
    pub usage: bool,
    /// Wrap each result in an HTML <details> block
    #[arg(long)]
    pub html: bool,
    /// Minimum seconds between the start of successive requests
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_secs_f64())]
    pub throttle: f64,
}
