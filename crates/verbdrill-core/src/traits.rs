//! Text-generation backend trait and its request/response types.
//!
//! Implemented by the `verbdrill-providers` crate for each vendor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generation backend trait
// ---------------------------------------------------------------------------

/// A remote text-generation service that can constrain its output to a JSON schema.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Human-readable backend name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Send one structured-output request.
    ///
    /// Errors should be [`crate::error::ProviderError`] wrapped in `anyhow` so
    /// callers can classify them.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;

    /// List models this backend is known to serve.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request for schema-constrained generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-2.5-flash").
    pub model: String,
    /// Natural-language instruction.
    pub prompt: String,
    /// JSON Schema the output must match (lowercase JSON Schema types).
    pub response_schema: serde_json::Value,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Raw response from a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The text payload, expected to be JSON matching the request schema.
    pub content: String,
    /// Model that actually answered.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

// ---------------------------------------------------------------------------
// Markdown fence stripping
// ---------------------------------------------------------------------------

/// Pull a JSON payload out of a response that may be wrapped in a markdown fence.
///
/// Handles ```` ```json ```` and bare ```` ``` ```` fences, including an
/// unclosed trailing fence. Text without a fence is returned trimmed.
pub fn extract_json_payload(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => return "",
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_payload_is_trimmed() {
        assert_eq!(extract_json_payload("  [1, 2]\n"), "[1, 2]");
    }

    #[test]
    fn json_fence_is_stripped() {
        let input = "```json\n[{\"base\": \"go\"}]\n```";
        assert_eq!(extract_json_payload(input), "[{\"base\": \"go\"}]");
    }

    #[test]
    fn generic_fence_is_stripped() {
        assert_eq!(extract_json_payload("```\n[]\n```\n"), "[]");
    }

    #[test]
    fn unclosed_fence_keeps_body() {
        assert_eq!(extract_json_payload("```json\n[1]"), "[1]");
    }

    #[test]
    fn fence_without_body_is_empty() {
        assert_eq!(extract_json_payload("```"), "");
    }
}
