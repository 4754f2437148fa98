//! Environment variables are process-wide, so every case lives in one test.

use llm::{client_from_env, model_from_env, LLMError};

#[test]
fn env_configuration_defaults_and_overrides() {
    std::env::remove_var("OPENAI_API_KEY");
    std::env::remove_var("OPENAI_BASE_URL");
    std::env::remove_var("OPENAI_MODEL");

    assert!(matches!(client_from_env(), Err(LLMError::MissingApiKey)));
    assert_eq!(model_from_env(), "gpt-3.5-turbo");

    std::env::set_var("OPENAI_API_KEY", "sk-env");
    let client = client_from_env().unwrap();
    assert_eq!(client.base_url(), "https://api.openai.com/v1");

    std::env::set_var("OPENAI_BASE_URL", "http://localhost:8080/v1");
    std::env::set_var("OPENAI_MODEL", "llama-2-7b-chat");
    assert_eq!(client_from_env().unwrap().base_url(), "http://localhost:8080/v1");
    assert_eq!(model_from_env(), "llama-2-7b-chat");
}
