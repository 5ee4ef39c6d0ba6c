//! Structured output extraction
//!
//! Wraps a single LLM call in schema-constrained decoding: the request
//! carries a response schema, the reply is located and checked against
//! that schema, then deserialized into the target type. Failures are
//! typed so callers can decide what degrades and what aborts.

mod schema;

pub use schema::{Violation, check};

use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::{CompletionRequest, LlmClient, LlmError, Message};

/// Errors from structured extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The underlying LLM call failed
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    /// The model returned no text at all
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The located payload was not parseable JSON
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload parsed but diverged from the response schema
    #[error("model output violates the response schema ({} violations)", .violations.len())]
    Schema { violations: Vec<Violation> },
}

/// Extracts schema-conforming values from LLM completions
///
/// Cheap to construct; stages build one per call site with the
/// temperature that call needs.
pub struct StructuredExtractor {
    llm: Arc<dyn LlmClient>,
    max_tokens: u32,
    temperature: f32,
}

impl StructuredExtractor {
    pub fn new(llm: Arc<dyn LlmClient>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            llm,
            max_tokens,
            temperature,
        }
    }

    /// One-shot extraction: system prompt plus user payload into `T`
    ///
    /// The schema is sent to the provider for constrained decoding and
    /// re-checked locally on the way back.
    pub async fn extract<T: DeserializeOwned>(
        &self,
        system_prompt: &str,
        user_content: &str,
        response_schema: serde_json::Value,
    ) -> Result<T, ExtractError> {
        debug!(temperature = self.temperature, "extract: called");
        let request = CompletionRequest::new(
            system_prompt,
            vec![Message::user(user_content)],
            self.max_tokens,
        )
        .with_temperature(self.temperature)
        .with_response_schema(response_schema.clone());

        let response = self.llm.complete(request).await?;
        let text = response.content.ok_or(ExtractError::EmptyResponse)?;

        let payload = locate_json(&text);
        let value: serde_json::Value = serde_json::from_str(payload)?;

        let violations = schema::check(&response_schema, &value);
        if !violations.is_empty() {
            warn!(violation_count = violations.len(), "extract: schema violations in model output");
            return Err(ExtractError::Schema { violations });
        }

        debug!("extract: payload conforms");
        Ok(serde_json::from_value(value)?)
    }
}

/// Best-effort location of the JSON payload inside model text
///
/// Constrained replies are normally bare JSON, but text can still
/// arrive wrapped in markdown fences or with prose around the value.
fn locate_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(rest) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        && let Some(inner) = rest.strip_suffix("```")
    {
        return inner.trim();
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => &trimmed[start..=end],
        _ => trimmed,
    }
}
