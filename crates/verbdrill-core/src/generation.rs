//! Generation client: topic in, validated verb records out.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::error::{GenerationError, ProviderError};
use crate::ids::IdAllocator;
use crate::model::VerbRecord;
use crate::traits::{extract_json_payload, GenerateRequest, GenerationBackend};

/// Number of verbs requested when the caller does not say.
pub const DEFAULT_GENERATE_COUNT: u32 = 5;

/// Language the `meaning` field is written in unless configured otherwise.
pub const DEFAULT_MEANING_LANGUAGE: &str = "Korean";

/// Knobs passed through to every request.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub meaning_language: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            max_tokens: 4096,
            meaning_language: DEFAULT_MEANING_LANGUAGE.to_string(),
        }
    }
}

/// One element of the backend's array. Every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedVerb {
    base: String,
    past: String,
    participle: String,
    meaning: String,
    example: String,
    is_irregular: bool,
}

/// Asks a backend for new verbs on a topic and decodes the answer strictly.
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    ids: Arc<dyn IdAllocator>,
    options: GenerationOptions,
}

impl GenerationClient {
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        ids: Arc<dyn IdAllocator>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            backend,
            ids,
            options,
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Generate `count` verbs for `topic`.
    ///
    /// One request, no retry. Any element that does not match the schema
    /// fails the whole batch. Each returned record carries a fresh id.
    #[instrument(skip(self), fields(backend = %self.backend.name(), model = %self.options.model))]
    pub async fn generate(
        &self,
        topic: &str,
        count: u32,
    ) -> Result<Vec<VerbRecord>, GenerationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "topic must not be empty".into(),
            ));
        }
        if count == 0 {
            return Err(GenerationError::InvalidRequest(
                "count must be at least 1".into(),
            ));
        }

        let request = GenerateRequest {
            model: self.options.model.clone(),
            prompt: build_prompt(topic, count, &self.options.meaning_language),
            response_schema: verb_schema(),
            max_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
        };

        let response = self
            .backend
            .generate(&request)
            .await
            .map_err(classify_backend_error)?;

        let verbs = decode_verbs(&response.content).map_err(GenerationError::Generation)?;
        tracing::info!(
            requested = count,
            received = verbs.len(),
            latency_ms = response.latency_ms,
            "generated verbs"
        );

        Ok(verbs
            .into_iter()
            .map(|v| VerbRecord {
                id: self.ids.allocate(),
                base: v.base,
                past: v.past,
                participle: v.participle,
                meaning: v.meaning,
                example: v.example,
                is_irregular: v.is_irregular,
            })
            .collect())
    }
}

fn classify_backend_error(err: anyhow::Error) -> GenerationError {
    match err.downcast_ref::<ProviderError>() {
        Some(provider_err) if provider_err.is_configuration() => {
            GenerationError::Configuration(provider_err.to_string())
        }
        _ => GenerationError::Generation(format!("{err:#}")),
    }
}

/// The instruction sent to the backend.
pub fn build_prompt(topic: &str, count: u32, meaning_language: &str) -> String {
    format!(
        "Generate {count} English verbs for topic \"{topic}\". Mix regular/irregular. \
         JSON schema: [{{base, past, participle, meaning({meaning_language}), \
         example(English), isIrregular(boolean)}}]"
    )
}

/// JSON Schema every response must satisfy: an array of objects with six
/// required fields.
pub fn verb_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "base": { "type": "string" },
                "past": { "type": "string" },
                "participle": { "type": "string" },
                "meaning": { "type": "string" },
                "example": { "type": "string" },
                "isIrregular": { "type": "boolean" }
            },
            "required": ["base", "past", "participle", "meaning", "example", "isIrregular"]
        }
    })
}

/// Decode a backend payload, rejecting the whole batch on any violation.
fn decode_verbs(payload: &str) -> Result<Vec<GeneratedVerb>, String> {
    let json = extract_json_payload(payload);
    if json.is_empty() {
        return Err("empty response from backend".into());
    }

    let verbs: Vec<GeneratedVerb> =
        serde_json::from_str(json).map_err(|e| format!("response does not match schema: {e}"))?;

    for (i, verb) in verbs.iter().enumerate() {
        if verb.base.trim().is_empty()
            || verb.past.trim().is_empty()
            || verb.participle.trim().is_empty()
        {
            return Err(format!("element {i} has a blank verb form"));
        }
    }
    Ok(verbs)
}
