//! OpenAI-compatible adapter for the travel assistant.
//!
//! Works against NVIDIA NIM, OpenAI, or any compatible chat completions
//! endpoint. Implements `AssistantPort`: one system prompt (optionally
//! carrying the selected-country context) plus the latest user utterance.

use crate::domain::DomainError;
use crate::ports::AssistantPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 512;
const TOP_P: f32 = 0.7;

/// Text returned when the endpoint answers without any choices.
const NO_RESPONSE_TEXT: &str = "No response generated";

/// Chat completions adapter.
pub struct NimAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl NimAdapter {
    /// # Arguments
    /// * `api_url` - completions endpoint (e.g. ".../v1/chat/completions")
    /// * `api_key` - bearer key for the endpoint
    /// * `model` - model name (e.g. "meta/llama-3.1-405b-instruct")
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
        }
    }

    /// Concise-travel-assistant system prompt, optionally naming the country
    /// the user is currently viewing.
    fn system_prompt(country_context: Option<&str>) -> String {
        let context_line = match country_context {
            Some(label) => format!("The user is currently viewing information about {}.\n", label),
            None => String::new(),
        };
        format!(
            "You are a concise travel assistant that provides brief, focused information \
             about countries. Keep responses short and to the point.\n\
             {}\
             Focus on the most essential information, limit examples, and avoid unnecessary details.\n\
             Aim for responses that are 3-4 sentences for simple queries and no more than 2-3 \
             short bullet points for lists.\n\
             When providing recommendations, limit to top 2-3 most important items.",
            context_line
        )
    }
}

/// Completion request structure.
#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<PromptMessage>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct PromptMessage {
    role: String,
    content: String,
}

/// Completion response structure.
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyContent,
}

#[derive(Deserialize)]
struct ReplyContent {
    content: String,
}

#[async_trait::async_trait]
impl AssistantPort for NimAdapter {
    async fn generate_reply(
        &self,
        prompt: &str,
        country_context: Option<&str>,
    ) -> Result<String, DomainError> {
        info!(
            prompt_len = prompt.len(),
            context = country_context.unwrap_or("-"),
            "sending prompt to assistant"
        );

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                PromptMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt(country_context),
                },
                PromptMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Assistant(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "assistant API returned error");
            return Err(DomainError::Assistant(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Assistant(format!("failed to parse API response: {}", e)))?;

        let reply = completion
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());

        debug!(reply_len = reply.len(), "received assistant reply");
        Ok(reply)
    }
}
