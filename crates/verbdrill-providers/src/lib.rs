//! verbdrill-providers: text-generation backends.
//!
//! Implements the `GenerationBackend` trait for Gemini and OpenAI-compatible
//! APIs, plus an offline mock, and loads the configuration that picks
//! between them.

pub mod config;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use config::{build_client, create_provider, load_config, ProviderConfig, VerbdrillConfig};
pub use verbdrill_core::error::ProviderError;
