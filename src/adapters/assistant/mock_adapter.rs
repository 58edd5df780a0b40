//! Mock assistant for running without an API key.
//!
//! Returns canned replies and simulates network latency.

use crate::domain::DomainError;
use crate::ports::AssistantPort;
use std::time::Duration;
use tracing::info;

/// Mock assistant adapter. No API calls.
pub struct MockAssistant {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAssistant {
    /// Default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AssistantPort for MockAssistant {
    async fn generate_reply(
        &self,
        prompt: &str,
        country_context: Option<&str>,
    ) -> Result<String, DomainError> {
        info!(
            prompt_len = prompt.len(),
            context = country_context.unwrap_or("-"),
            "[MOCK] simulating assistant reply"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let reply = match country_context {
            Some(label) => format!(
                "[MOCK] Here is some travel advice about {} in response to \"{}\". \
                 Configure WAYFARER_CHAT_API_KEY to talk to the real assistant.",
                label, prompt
            ),
            None => format!(
                "[MOCK] Here is some general travel advice in response to \"{}\". \
                 Select a country for focused answers, and configure \
                 WAYFARER_CHAT_API_KEY to talk to the real assistant.",
                prompt
            ),
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_reply_mentions_the_context() {
        let assistant = MockAssistant::with_delay(10);
        let reply = assistant
            .generate_reply("best food?", Some("Japan (JP)"))
            .await
            .unwrap();
        assert!(reply.contains("Japan (JP)"));
        assert!(reply.contains("best food?"));
    }

    #[tokio::test]
    async fn mock_reply_without_context() {
        let assistant = MockAssistant::with_delay(10);
        let reply = assistant.generate_reply("hi", None).await.unwrap();
        assert!(reply.contains("general travel advice"));
    }
}
