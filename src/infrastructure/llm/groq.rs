use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::groq;

use crate::domain::{ports::LlmService, DomainError};
use crate::infrastructure::config::LlmConfig;

/// Groq chat completions via rig. Credentials come from `GROQ_API_KEY`.
pub struct GroqLlm {
    model: String,
    temperature: f64,
}

impl GroqLlm {
    pub fn new(model: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(&config.model, config.temperature)
    }
}

/// The provider surfaces rate limiting as an HTTP 429 buried in the error
/// text; classify it so callers can degrade differently.
fn classify(err: impl std::fmt::Display) -> DomainError {
    let msg = err.to_string();
    let lowered = msg.to_lowercase();
    if lowered.contains("rate limit") || lowered.contains("429") {
        DomainError::rate_limited(msg)
    } else {
        DomainError::external(msg)
    }
}

#[async_trait]
impl LlmService for GroqLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let client = groq::Client::from_env();
        let agent = client
            .agent(&self.model)
            .temperature(self.temperature)
            .build();

        agent.prompt(prompt).await.map_err(classify)
    }
}
