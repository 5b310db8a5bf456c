//! Configuration loading and backend factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use verbdrill_core::error::{GenerationError, ProviderError};
use verbdrill_core::generation::{GenerationClient, GenerationOptions, DEFAULT_MEANING_LANGUAGE};
use verbdrill_core::ids::IdAllocator;
use verbdrill_core::traits::GenerationBackend;

use crate::gemini::GeminiProvider;
use crate::mock::MockProvider;
use crate::openai::OpenAiProvider;

/// Configuration for a single generation backend.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAI {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    /// Offline backend that always answers with `response`.
    Mock {
        #[serde(default = "default_mock_response")]
        response: String,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Mock { response } => f
                .debug_struct("Mock")
                .field("response_len", &response.len())
                .finish(),
        }
    }
}

fn default_mock_response() -> String {
    "[]".to_string()
}

/// Top-level verbdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbdrillConfig {
    /// Backend configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Backend used when none is given on the command line.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Model used with the default backend. When unset, the backend's first
    /// listed model is used.
    #[serde(default)]
    pub default_model: Option<String>,
    /// Sampling temperature for generation.
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    /// Questions per quiz.
    #[serde(default = "default_quiz_size")]
    pub quiz_size: usize,
    /// Verbs requested per generation.
    #[serde(default = "default_generate_count")]
    pub generate_count: u32,
    /// Language the `meaning` field is written in.
    #[serde(default = "default_meaning_language")]
    pub meaning_language: String,
    /// Where the verb collection is stored.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_quiz_size() -> usize {
    verbdrill_core::selector::DEFAULT_QUIZ_SIZE
}
fn default_generate_count() -> u32 {
    verbdrill_core::generation::DEFAULT_GENERATE_COUNT
}
fn default_meaning_language() -> String {
    DEFAULT_MEANING_LANGUAGE.to_string()
}

impl Default for VerbdrillConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: None,
            default_temperature: default_temperature(),
            quiz_size: default_quiz_size(),
            generate_count: default_generate_count(),
            meaning_language: default_meaning_language(),
            data_dir: None,
        }
    }
}

impl VerbdrillConfig {
    /// Directory the verb collection lives in.
    ///
    /// `VERBDRILL_DATA_DIR`, then `data_dir` from the file, then
    /// `~/.local/share/verbdrill`, then `./.verbdrill`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = non_empty_env("VERBDRILL_DATA_DIR") {
            return PathBuf::from(dir);
        }
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        match non_empty_env("HOME") {
            Some(home) => PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("verbdrill"),
            None => PathBuf::from(".verbdrill"),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Resolve env vars in a provider config.
fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o)),
        },
        ProviderConfig::Mock { response } => ProviderConfig::Mock {
            response: response.clone(),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `verbdrill.toml` in the current directory
/// 2. `~/.config/verbdrill/config.toml`
///
/// Environment variable overrides: `VERBDRILL_GEMINI_KEY` (or `GEMINI_API_KEY`),
/// `VERBDRILL_OPENAI_KEY`.
pub fn load_config() -> Result<VerbdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<VerbdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("verbdrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<VerbdrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => VerbdrillConfig::default(),
    };

    // Apply env var overrides
    let gemini_key =
        non_empty_env("VERBDRILL_GEMINI_KEY").or_else(|| non_empty_env("GEMINI_API_KEY"));
    if let Some(key) = gemini_key {
        config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            });
        if let Some(ProviderConfig::Gemini { api_key, .. }) = config.providers.get_mut("gemini") {
            *api_key = key;
        }
    }

    if let Some(key) = non_empty_env("VERBDRILL_OPENAI_KEY") {
        config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let Some(ProviderConfig::OpenAI { api_key, .. }) = config.providers.get_mut("openai") {
            *api_key = key;
        }
    }

    // Resolve env vars in all provider configs
    let resolved: HashMap<String, ProviderConfig> = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config.providers = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    non_empty_env("HOME").map(|h| PathBuf::from(h).join(".config").join("verbdrill"))
}

/// Create a backend instance from its configuration.
///
/// A blank credential is a [`GenerationError::Configuration`]; no request is made.
pub fn create_provider(
    config: &ProviderConfig,
) -> Result<Box<dyn GenerationBackend>, GenerationError> {
    let backend: Box<dyn GenerationBackend> = match config {
        ProviderConfig::Gemini { api_key, base_url } => Box::new(
            GeminiProvider::new(api_key, base_url.clone()).map_err(configuration_error)?,
        ),
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Box::new(
            OpenAiProvider::new(api_key, base_url.clone(), org_id.clone())
                .map_err(configuration_error)?,
        ),
        ProviderConfig::Mock { response } => Box::new(MockProvider::with_fixed_response(response)),
    };
    Ok(backend)
}

fn configuration_error(err: ProviderError) -> GenerationError {
    match err {
        ProviderError::MissingCredential(name) => GenerationError::Configuration(format!(
            "no API key for provider '{name}'; set {} or add it to verbdrill.toml",
            key_env_var(&name)
        )),
        other => GenerationError::Configuration(other.to_string()),
    }
}

fn key_env_var(provider: &str) -> String {
    format!("VERBDRILL_{}_KEY", provider.to_uppercase())
}

/// Build a generation client for `provider` (or the default), using `model`.
///
/// Without an explicit model, the default backend uses `default_model` when
/// set; otherwise the backend's first listed model is used.
pub fn build_client(
    config: &VerbdrillConfig,
    provider: Option<&str>,
    model: Option<&str>,
    ids: Arc<dyn IdAllocator>,
) -> Result<GenerationClient, GenerationError> {
    let name = provider.unwrap_or(&config.default_provider);
    let Some(provider_config) = config.providers.get(name) else {
        return Err(GenerationError::Configuration(format!(
            "no API key for provider '{name}'; set {} or add it to verbdrill.toml",
            key_env_var(name)
        )));
    };

    let backend: Arc<dyn GenerationBackend> = Arc::from(create_provider(provider_config)?);

    let configured = config
        .default_model
        .as_deref()
        .filter(|_| name == config.default_provider);
    let model = match model.or(configured) {
        Some(m) => m.to_string(),
        None => backend
            .available_models()
            .first()
            .map(|m| m.id.clone())
            .unwrap_or_else(|| GenerationOptions::default().model),
    };

    let options = GenerationOptions {
        model,
        temperature: config.default_temperature,
        meaning_language: config.meaning_language.clone(),
        ..GenerationOptions::default()
    };

    tracing::debug!(provider = name, model = %options.model, "built generation client");
    Ok(GenerationClient::new(backend, ids, options))
}
