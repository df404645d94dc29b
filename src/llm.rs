//! Text-generation provider abstraction and the OpenAI implementation.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::CompletionConfig;

const OPENAI_COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";

/// Trait for generation backends: one prompt in, one completion out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for a single prompt. One attempt, no retry.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Completion provider backed by the OpenAI completions API.
pub struct OpenAiCompletions {
    config: CompletionConfig,
}

impl OpenAiCompletions {
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[async_trait]
impl CompletionProvider for OpenAiCompletions {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY not set"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()?;

        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            max_tokens: self.config.max_tokens,
        };

        let response = client
            .post(OPENAI_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("OpenAI API error {}: {}", status, body_text);
        }

        let parsed: CompletionResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Completion response contained no choices"))?;

        Ok(choice.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo-instruct",
            prompt: "Question: why?",
            max_tokens: 256,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo-instruct");
        assert_eq!(json["prompt"], "Question: why?");
        assert_eq!(json["max_tokens"], 256);
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "cmpl-1",
            "choices": [ { "text": "  Mostly flaky tests.\n", "index": 0 } ],
            "usage": { "total_tokens": 12 }
        }"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].text, "  Mostly flaky tests.\n");
    }

    #[tokio::test]
    async fn test_complete_without_key_fails() {
        let provider = OpenAiCompletions::new(CompletionConfig::default());
        let err = provider.complete("prompt").await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
