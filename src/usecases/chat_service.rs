//! Chat assistant flow: append-only transcript plus a single-slot in-flight
//! guard.
//!
//! - Exactly one user message and one assistant message per accepted send
//! - Empty/whitespace input appends nothing
//! - Assistant failure appends the fixed fallback text, never an Err
//! - At most one outbound request at a time; a second send is rejected

use crate::domain::ChatMessage;
use crate::ports::AssistantPort;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Greeting the transcript starts with (and is reset back to).
pub const WELCOME_TEXT: &str = "👋 Hello! I'm your travel assistant.\n\n\
Select a country from the list or use the quick prompts to get started!";

/// Shown in place of a reply when the completion call fails.
pub const FALLBACK_ERROR_TEXT: &str =
    "I apologize, but I encountered an error. Please try again later.";

/// Result of a send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; transcript untouched.
    Ignored,
    /// The assistant message that was appended (reply or fallback text).
    Replied(ChatMessage),
    /// A request is already in flight; this send was rejected.
    Busy,
}

/// Stateless single-turn assistant session: only the latest utterance is sent,
/// prior turns stay local to the transcript.
pub struct ChatService {
    assistant: Arc<dyn AssistantPort>,
    transcript: RwLock<Vec<ChatMessage>>,
    /// Set while a completion request is outstanding.
    typing: AtomicBool,
    /// Single-slot guard; `try_lock` failure means a send is in flight.
    in_flight: Mutex<()>,
    last_id: AtomicI64,
}

impl ChatService {
    pub fn new(assistant: Arc<dyn AssistantPort>) -> Self {
        Self {
            assistant,
            transcript: RwLock::new(vec![Self::welcome_message()]),
            typing: AtomicBool::new(false),
            in_flight: Mutex::new(()),
            last_id: AtomicI64::new(0),
        }
    }

    fn welcome_message() -> ChatMessage {
        ChatMessage {
            id: 0,
            text: WELCOME_TEXT.to_string(),
            from_user: false,
        }
    }

    /// Timestamp-derived id, strictly increasing within the session even if
    /// the clock does not advance between calls.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .map(|last| now.max(last + 1))
            .unwrap_or(now)
    }

    /// Submit one user utterance. Appends the user message synchronously,
    /// issues exactly one completion request, and appends exactly one
    /// assistant message (reply or fallback) before returning. The typing
    /// flag is cleared regardless of outcome.
    pub async fn send(&self, input: &str, country_context: Option<&str>) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        let Ok(_slot) = self.in_flight.try_lock() else {
            warn!("send rejected: a completion request is already in flight");
            return SendOutcome::Busy;
        };

        self.append(ChatMessage {
            id: self.next_id(),
            text: text.to_string(),
            from_user: true,
        })
        .await;
        self.typing.store(true, Ordering::SeqCst);

        let reply_text = match self.assistant.generate_reply(text, country_context).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "assistant call failed, appending fallback");
                FALLBACK_ERROR_TEXT.to_string()
            }
        };

        let reply = ChatMessage {
            id: self.next_id(),
            text: reply_text,
            from_user: false,
        };
        self.append(reply.clone()).await;
        self.typing.store(false, Ordering::SeqCst);

        info!(context = country_context.unwrap_or("-"), "chat turn complete");
        SendOutcome::Replied(reply)
    }

    async fn append(&self, message: ChatMessage) {
        self.transcript.write().await.push(message);
    }

    /// Snapshot of the transcript, in append order.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.clone()
    }

    /// Clear the conversation back to the single welcome message. Does not
    /// cancel an in-flight request; its reply will still be appended.
    pub async fn reset(&self) {
        let mut transcript = self.transcript.write().await;
        transcript.clear();
        transcript.push(Self::welcome_message());
        info!("transcript reset");
    }

    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use std::time::Duration;

    struct StubAssistant {
        reply: Result<String, String>,
        delay_ms: u64,
    }

    #[async_trait::async_trait]
    impl AssistantPort for StubAssistant {
        async fn generate_reply(
            &self,
            _prompt: &str,
            _country_context: Option<&str>,
        ) -> Result<String, DomainError> {
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            self.reply
                .clone()
                .map_err(DomainError::Assistant)
        }
    }

    fn service(reply: Result<String, String>) -> ChatService {
        ChatService::new(Arc::new(StubAssistant { reply, delay_ms: 0 }))
    }

    #[tokio::test]
    async fn send_appends_user_then_assistant() {
        let chat = service(Ok("Visit in spring.".into()));
        let outcome = chat.send("When should I visit?", Some("Japan (JP)")).await;
        assert!(matches!(outcome, SendOutcome::Replied(_)));

        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert!(!transcript[0].from_user); // welcome
        assert!(transcript[1].from_user);
        assert_eq!(transcript[1].text, "When should I visit?");
        assert!(!transcript[2].from_user);
        assert_eq!(transcript[2].text, "Visit in spring.");
        assert!(!chat.is_typing());
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_append_nothing() {
        let chat = service(Ok("unused".into()));
        assert_eq!(chat.send("", None).await, SendOutcome::Ignored);
        assert_eq!(chat.send("   \t ", None).await, SendOutcome::Ignored);
        assert_eq!(chat.transcript().await.len(), 1);
    }

    #[tokio::test]
    async fn failure_appends_fallback_and_clears_typing() {
        let chat = service(Err("connection refused".into()));
        let outcome = chat.send("hello", None).await;
        let SendOutcome::Replied(reply) = outcome else {
            panic!("expected a reply outcome");
        };
        assert_eq!(reply.text, FALLBACK_ERROR_TEXT);

        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].text, FALLBACK_ERROR_TEXT);
        assert!(!chat.is_typing());
    }

    #[tokio::test]
    async fn reset_restores_exactly_the_welcome_message() {
        let chat = service(Ok("ok".into()));
        chat.send("one", None).await;
        chat.send("two", None).await;
        chat.reset().await;

        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].text, WELCOME_TEXT);
        assert!(!transcript[0].from_user);
    }

    #[tokio::test]
    async fn message_ids_strictly_increase() {
        let chat = service(Ok("ok".into()));
        chat.send("one", None).await;
        chat.send("two", None).await;
        let transcript = chat.transcript().await;
        for pair in transcript.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[tokio::test]
    async fn second_send_while_in_flight_is_rejected() {
        let chat = Arc::new(ChatService::new(Arc::new(StubAssistant {
            reply: Ok("slow reply".into()),
            delay_ms: 100,
        })));

        let first = {
            let chat = Arc::clone(&chat);
            tokio::spawn(async move { chat.send("first", None).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = chat.send("second", None).await;
        assert_eq!(second, SendOutcome::Busy);

        let first = first.await.unwrap();
        assert!(matches!(first, SendOutcome::Replied(_)));
        // Only the first send touched the transcript.
        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 3);
    }
}
