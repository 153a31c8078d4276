// AI completion client - the single external intelligence dependency
//
// Speaks the OpenAI-style chat-completions protocol: role-tagged messages in,
// free-form text out. Callers hand the text to the parsers module; nothing
// here interprets it. Failures carry a human-readable message and are never
// retried automatically.

pub mod prompts;

use crate::config::AiConfig;
use crate::models::ChatTurn;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Longest endpoint error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },
    #[error("AI endpoint returned an empty completion")]
    EmptyCompletion,
}

/// Client for one remote chat-completion endpoint
#[derive(Debug, Clone)]
pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AiClient {
    /// Build a client from configuration. Requests are bounded by the
    /// configured timeout; the endpoint itself promises nothing.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Send a role-tagged message sequence and return the raw completion text
    pub async fn complete(&self, turns: &[ChatTurn]) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            messages: turns
                .iter()
                .map(|turn| WireMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        log::debug!("Sending {} messages to {}", turns.len(), url);
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.text().await {
                Ok(text) => clip(&text, MAX_ERROR_BODY_CHARS),
                Err(_) => "<unreadable body>".to_string(),
            };
            return Err(AiError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let payload: CompletionResponse = response.json().await?;
        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyCompletion)
    }
}

fn clip(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
