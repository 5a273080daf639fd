//! Remote completion adapters.
//!
//! Each adapter turns a [`CompletionRequest`] into one HTTP call and returns
//! the raw generated text. Task-specific interpretation lives in
//! [`crate::analysis`]; fallback decisions live in [`crate::dispatch`].

pub mod groq;
pub mod http;
pub mod huggingface;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;

use crate::config::QuillConfig;
use crate::error::{QuillError, Result};
use crate::models::ProviderKind;

/// Generated text shorter than this (after trimming) is unusable.
pub const MIN_RESPONSE_CHARS: usize = 10;

pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// A single prompt sent to a provider.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct CompletionRequest {
    /// Provider-side model name, e.g. `llama-3.1-8b-instant`.
    #[builder(into)]
    pub remote_model: String,
    #[builder(into)]
    pub prompt: String,
    #[builder(into)]
    pub system: Option<String>,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
}

/// Core trait implemented by every remote provider.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Which provider this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Upper bound for one [`complete`](Self::complete) call. The dispatcher
    /// enforces it.
    fn timeout(&self) -> Duration;

    /// Send the prompt and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Trim `generated` and reject it when it is too short to use.
pub fn check_generated(provider: ProviderKind, generated: &str) -> Result<String> {
    let trimmed = generated.trim();
    let length = trimmed.chars().count();
    if length < MIN_RESPONSE_CHARS {
        return Err(QuillError::DegenerateResponse { provider, length });
    }
    Ok(trimmed.to_string())
}

/// Build an adapter for every provider that has credentials in `config`.
pub fn create_providers(
    config: &QuillConfig,
) -> HashMap<ProviderKind, Arc<dyn CompletionProvider>> {
    let mut providers: HashMap<ProviderKind, Arc<dyn CompletionProvider>> = HashMap::new();
    for kind in ProviderKind::ALL {
        if let Ok(provider) = create_provider(kind, config) {
            providers.insert(kind, provider);
        }
    }
    providers
}

/// Build the adapter for one provider.
pub fn create_provider(
    kind: ProviderKind,
    config: &QuillConfig,
) -> Result<Arc<dyn CompletionProvider>> {
    let api_key = config
        .credentials()
        .key(kind)
        .ok_or(QuillError::MissingCredentials(kind))?
        .to_string();
    let base_url = config.base_url(kind).map(str::to_string);
    let timeout = config.timeout(kind);

    Ok(match kind {
        ProviderKind::Groq => Arc::new(groq::GroqProvider::new(api_key, base_url, timeout)),
        ProviderKind::HuggingFace => Arc::new(huggingface::HuggingFaceProvider::new(
            api_key, base_url, timeout,
        )),
    })
}
