use crate::fallback::{FallbackChain, FallbackOutcome, ProviderSpec};
use crate::llm::types::{ChatMessage, ChatOptions, Role};
use crate::transport::Transport;
use std::sync::Arc;

/// Returned to the user when every chat provider failed
pub const DEGRADED_CHAT_MESSAGE: &str = "I'm currently unable to connect to the AI service. \
The API may be waking up (this can take 30-60 seconds for free services). \
Please try again in a moment, or ask a specific music question.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyPrompt,
}

/// Collapse a conversation into one single-shot prompt.
///
/// Only the first system message and the last message are used; earlier
/// turns are dropped.
pub fn build_prompt(messages: &[ChatMessage]) -> String {
    let user = messages.last().map(|m| m.content.as_str()).unwrap_or("");
    let system = messages
        .iter()
        .find(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .unwrap_or("");

    if system.is_empty() {
        user.to_string()
    } else {
        format!("{}\n\nUser: {}", system, user)
    }
}

/// Chat completion over a fixed, ordered provider list
pub struct ChatFallbackService {
    chain: FallbackChain,
}

impl ChatFallbackService {
    pub fn new(providers: Vec<ProviderSpec>, transport: Arc<dyn Transport>) -> Self {
        Self {
            chain: FallbackChain::new(providers, transport),
        }
    }

    /// Answer the conversation, or return [`DEGRADED_CHAT_MESSAGE`] when no
    /// provider could. Provider identity and failure reasons are only logged.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<String, ChatError> {
        match messages.last() {
            Some(last) if !last.content.trim().is_empty() => {}
            _ => return Err(ChatError::EmptyPrompt),
        }

        let prompt = build_prompt(messages);
        tracing::debug!(
            message_count = messages.len(),
            prompt_len = prompt.len(),
            "chat completion requested"
        );

        match self.chain.run(&prompt, options).await {
            FallbackOutcome::Success { answer, source } => {
                tracing::debug!(provider = %source, answer_len = answer.len(), "chat answered");
                Ok(answer)
            }
            FallbackOutcome::Exhausted { attempts } => {
                for attempt in &attempts {
                    tracing::debug!(
                        provider = %attempt.source,
                        reason = %attempt.reason,
                        "exhausted chat attempt"
                    );
                }
                Ok(DEGRADED_CHAT_MESSAGE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_system_message() {
        let messages = vec![ChatMessage::system("You are helpful"), ChatMessage::user("Hi")];
        assert_eq!(build_prompt(&messages), "You are helpful\n\nUser: Hi");
    }

    #[test]
    fn test_prompt_without_system_message() {
        assert_eq!(build_prompt(&[ChatMessage::user("Hi")]), "Hi");
    }

    #[test]
    fn test_prompt_drops_earlier_turns() {
        let messages = vec![
            ChatMessage::system("Be brief"),
            ChatMessage::user("first question"),
            ChatMessage::assistant("first answer"),
            ChatMessage::user("second question"),
        ];
        assert_eq!(build_prompt(&messages), "Be brief\n\nUser: second question");
    }

    #[test]
    fn test_prompt_of_empty_conversation() {
        assert_eq!(build_prompt(&[]), "");
    }

    #[test]
    fn test_degraded_message_prefix() {
        assert!(DEGRADED_CHAT_MESSAGE
            .starts_with("I'm currently unable to connect to the AI service."));
        assert!(!DEGRADED_CHAT_MESSAGE.contains("  "));
    }
}
