//! Ordered, sequential provider fallback for chat completion.
//!
//! Providers are tried strictly in list order, one in flight at a time, each
//! under its own timeout. The first non-blank answer wins; otherwise every
//! failure is recorded and the chain reports [`FallbackOutcome::Exhausted`].

use crate::config::{ChatProviderConfig, WireKind};
use crate::llm::types::ChatOptions;
use crate::transport::{with_timeout, ProviderError, Transport};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Request/response shape spoken by one chat endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum WireFormat {
    /// `{"message": prompt}` in; one of a fixed set of answer fields out
    Message,
    /// OpenAI chat-completions request; `choices[0].message.content` out
    OpenAiChat { model: String },
}

const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Default, Deserialize)]
struct MessageReply {
    response: Option<Value>,
    answer: Option<Value>,
    reply: Option<Value>,
    message: Option<Value>,
    text: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiReply {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    response: Option<Value>,
    answer: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiChoice {
    #[serde(default)]
    message: Option<OpenAiMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiMessage {
    content: Option<Value>,
}

/// First candidate that is a non-blank string
fn first_answer<'a>(candidates: impl IntoIterator<Item = Option<&'a Value>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

impl WireFormat {
    pub fn build_request_body(&self, prompt: &str, hints: &ChatOptions) -> Value {
        match self {
            WireFormat::Message => json!({ "message": prompt }),
            WireFormat::OpenAiChat { model } => {
                let mut body = json!({
                    "model": hints.model.as_deref().unwrap_or(model),
                    "messages": [{ "role": "user", "content": prompt }],
                });
                if let Some(temperature) = hints.temperature {
                    body["temperature"] = json!(temperature);
                }
                if let Some(max_tokens) = hints.max_tokens {
                    body["max_tokens"] = json!(max_tokens);
                }
                body
            }
        }
    }

    /// Pull the answer out of a response body. Never fails; a body without a
    /// usable answer yields `None`.
    pub fn extract_answer(&self, raw: &Value) -> Option<String> {
        match self {
            WireFormat::Message => {
                let reply = MessageReply::deserialize(raw).unwrap_or_default();
                first_answer([
                    reply.response.as_ref(),
                    reply.answer.as_ref(),
                    reply.reply.as_ref(),
                    reply.message.as_ref(),
                    reply.text.as_ref(),
                ])
            }
            WireFormat::OpenAiChat { .. } => {
                let reply = OpenAiReply::deserialize(raw).unwrap_or_default();
                let content = reply
                    .choices
                    .first()
                    .and_then(|c| c.message.as_ref())
                    .and_then(|m| m.content.as_ref());
                first_answer([content, reply.response.as_ref(), reply.answer.as_ref()])
            }
        }
    }
}

/// One entry of a fallback chain
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    /// Diagnostic name, never shown to end users
    pub name: String,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub wire: WireFormat,
}

impl ProviderSpec {
    pub fn from_config(config: &ChatProviderConfig) -> Self {
        let wire = match config.wire {
            WireKind::Message => WireFormat::Message,
            WireKind::OpenAi => WireFormat::OpenAiChat {
                model: config
                    .model
                    .clone()
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
        };

        Self {
            name: config.name.clone(),
            endpoint: config.endpoint.clone(),
            timeout_ms: config.timeout_ms,
            wire,
        }
    }

    pub fn build_request_body(&self, prompt: &str, hints: &ChatOptions) -> Value {
        self.wire.build_request_body(prompt, hints)
    }

    pub fn extract_answer(&self, raw: &Value) -> Option<String> {
        self.wire.extract_answer(raw)
    }
}

/// A failed attempt against one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub source: String,
    pub reason: ProviderError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome {
    Success { answer: String, source: String },
    /// Every provider was tried exactly once, in order
    Exhausted { attempts: Vec<Attempt> },
}

/// Sequential executor over an ordered provider list
pub struct FallbackChain {
    providers: Vec<ProviderSpec>,
    transport: Arc<dyn Transport>,
}

impl FallbackChain {
    pub fn new(providers: Vec<ProviderSpec>, transport: Arc<dyn Transport>) -> Self {
        Self {
            providers,
            transport,
        }
    }

    async fn attempt(
        &self,
        spec: &ProviderSpec,
        prompt: &str,
        hints: &ChatOptions,
    ) -> Result<String, ProviderError> {
        let body = spec.build_request_body(prompt, hints);
        let request = self.transport.post_json(&spec.endpoint, &body);
        let raw = with_timeout(spec.timeout_ms, request).await?;
        spec.extract_answer(&raw).ok_or(ProviderError::NoMatch)
    }

    pub async fn run(&self, prompt: &str, hints: &ChatOptions) -> FallbackOutcome {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for spec in &self.providers {
            tracing::debug!(
                provider = %spec.name,
                timeout_ms = spec.timeout_ms,
                "trying chat provider"
            );

            match self.attempt(spec, prompt, hints).await {
                Ok(answer) => {
                    tracing::info!(
                        provider = %spec.name,
                        failed_before = attempts.len(),
                        "chat provider succeeded"
                    );
                    return FallbackOutcome::Success {
                        answer,
                        source: spec.name.clone(),
                    };
                }
                Err(reason) => {
                    tracing::warn!(provider = %spec.name, error = %reason, "chat provider failed");
                    attempts.push(Attempt {
                        source: spec.name.clone(),
                        reason,
                    });
                }
            }
        }

        tracing::error!(attempt_count = attempts.len(), "all chat providers failed");
        FallbackOutcome::Exhausted { attempts }
    }
}
