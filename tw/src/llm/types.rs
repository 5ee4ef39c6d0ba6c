//! LLM request/response types
//!
//! These types model the Gemini generateContent API but stay
//! provider-agnostic enough to support other providers.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction
    pub system_prompt: String,

    /// Conversation messages (typically a single user payload)
    pub messages: Vec<Message>,

    /// Max tokens for the response (from config)
    pub max_tokens: u32,

    /// Sampling temperature; `None` uses the provider default
    pub temperature: Option<f32>,

    /// When set, the provider is asked to emit JSON conforming to this
    /// schema instead of free text
    pub response_schema: Option<serde_json::Value>,
}

impl CompletionRequest {
    /// Create a free-text request
    pub fn new(system_prompt: impl Into<String>, messages: Vec<Message>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages,
            max_tokens,
            temperature: None,
            response_schema: None,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Constrain the response to a JSON schema
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create a model (assistant) message
    pub fn model(text: impl Into<String>) -> Self {
        debug!("Message::model: called");
        Self {
            role: Role::Model,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Wire name used by the Gemini API
    pub fn as_gemini(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage for cost tracking
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Build a plain text response (used heavily by tests and mocks)
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            stop_reason: StopReason::Stop,
            usage: TokenUsage::default(),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Other,
}

impl StopReason {
    /// Parse from a Gemini finishReason string
    pub fn from_gemini(s: &str) -> Self {
        debug!(%s, "StopReason::from_gemini: called");
        match s {
            "STOP" => StopReason::Stop,
            "MAX_TOKENS" => StopReason::MaxTokens,
            "SAFETY" => StopReason::Safety,
            "RECITATION" => StopReason::Recitation,
            _ => {
                debug!("StopReason::from_gemini: unknown, mapping to Other");
                StopReason::Other
            }
        }
    }
}

/// Token usage for cost tracking
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Total tokens consumed by the call
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}
