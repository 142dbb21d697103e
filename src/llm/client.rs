//! Chat-completion client for the query interpreter
//!
//! Talks to an OpenAI-compatible chat completions endpoint (Perplexity by
//! default). One short, non-streaming request per interpreted query; the
//! timeout is tight because the caller has a full rule-based fallback and
//! a slow model call is worse than no model call.

use crate::core::config::ModelConfig;
use crate::core::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatClient {
    pub fn new(config: &ModelConfig, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Send a single system+user exchange, returning the completion text
    pub async fn complete(&self, system: &str, user_message: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(Error::ModelError {
                message: format!("Model API error: HTTP {} - {}", status, body),
            });
        }

        let response: ChatResponse = res.json().await.map_err(|e| Error::ModelError {
            message: format!("Failed to parse model response: {}", e),
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(chars = content.len(), "model completion received");
        Ok(content)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::ModelError {
                message: format!("Model request timed out ({})", self.base_url),
            }
        } else {
            Error::ModelError {
                message: format!("Model request failed: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_content_extraction() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"ok\":true}"}}]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(content, "{\"ok\":true}");
    }

    #[test]
    fn test_empty_choices_yield_empty_content() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        assert!(content.is_empty());
    }
}
