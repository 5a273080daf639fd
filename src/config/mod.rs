//! Process configuration, loaded once at startup.

pub mod credentials;

pub use credentials::ProviderCredentials;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{QuillError, Result};
use crate::models::{ProviderKind, DEFAULT_MODEL_ID};

/// Default timeout for Groq chat completions.
pub const DEFAULT_GROQ_TIMEOUT: Duration = Duration::from_secs(30);
/// HuggingFace cold-starts models, so it gets a longer budget.
pub const DEFAULT_HF_TIMEOUT: Duration = Duration::from_secs(45);
pub const DEFAULT_PORT: u16 = 8000;

/// Gateway configuration.
///
/// Resolution order for every setting: explicit `with_*` call, then the
/// environment (including a `.env` file), then the built-in default.
/// The value is immutable once built and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct QuillConfig {
    credentials: ProviderCredentials,
    base_urls: HashMap<ProviderKind, String>,
    timeouts: HashMap<ProviderKind, Duration>,
    default_model: String,
    bind_addr: String,
    insight_seed: Option<u64>,
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl QuillConfig {
    /// Config with no credentials and all defaults.
    pub fn new() -> Self {
        Self {
            credentials: ProviderCredentials::default(),
            base_urls: HashMap::new(),
            timeouts: HashMap::from([
                (ProviderKind::Groq, DEFAULT_GROQ_TIMEOUT),
                (ProviderKind::HuggingFace, DEFAULT_HF_TIMEOUT),
            ]),
            default_model: DEFAULT_MODEL_ID.to_string(),
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            insight_seed: None,
        }
    }

    /// Load from environment variables (GROQ_API_KEY, HUGGINGFACE_API_KEY, etc.).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. `from_env` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        config.credentials = ProviderCredentials::from_lookup(&get);

        for kind in ProviderKind::ALL {
            if let Some(url) = get(kind.base_url_env_var()) {
                config.base_urls.insert(kind, url.trim_end_matches('/').to_string());
            }
        }

        if let Some(secs) = parse_var::<u64>(&get, "QUILL_GROQ_TIMEOUT_SECS")? {
            config.timeouts.insert(ProviderKind::Groq, Duration::from_secs(secs));
        }
        if let Some(secs) = parse_var::<u64>(&get, "QUILL_HF_TIMEOUT_SECS")? {
            config
                .timeouts
                .insert(ProviderKind::HuggingFace, Duration::from_secs(secs));
        }

        if let Some(model) = get("QUILL_DEFAULT_MODEL") {
            config.default_model = model.trim().to_string();
        }

        if let Some(bind) = get("QUILL_BIND") {
            config.bind_addr = bind.trim().to_string();
        } else if let Some(port) = parse_var::<u16>(&get, "PORT")? {
            config.bind_addr = format!("0.0.0.0:{port}");
        }

        config.insight_seed = parse_var::<u64>(&get, "QUILL_INSIGHT_SEED")?;

        Ok(config)
    }

    pub fn with_api_key(mut self, provider: ProviderKind, key: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_key(provider, key);
        self
    }

    pub fn with_base_url(mut self, provider: ProviderKind, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_urls
            .insert(provider, url.trim_end_matches('/').to_string());
        self
    }

    pub fn with_timeout(mut self, provider: ProviderKind, timeout: Duration) -> Self {
        self.timeouts.insert(provider, timeout);
        self
    }

    pub fn with_default_model(mut self, model_id: impl Into<String>) -> Self {
        self.default_model = model_id.into();
        self
    }

    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Fix the seed used for fallback insight selection.
    pub fn with_insight_seed(mut self, seed: u64) -> Self {
        self.insight_seed = Some(seed);
        self
    }

    pub fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }

    pub fn base_url(&self, provider: ProviderKind) -> Option<&str> {
        self.base_urls.get(&provider).map(String::as_str)
    }

    pub fn timeout(&self, provider: ProviderKind) -> Duration {
        self.timeouts.get(&provider).copied().unwrap_or(match provider {
            ProviderKind::Groq => DEFAULT_GROQ_TIMEOUT,
            ProviderKind::HuggingFace => DEFAULT_HF_TIMEOUT,
        })
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    pub fn insight_seed(&self) -> Option<u64> {
        self.insight_seed
    }

    /// Check if a provider has credentials configured.
    pub fn has_credentials(&self, provider: ProviderKind) -> bool {
        self.credentials.has(provider)
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| QuillError::Configuration(format!("invalid {key} '{raw}': {e}")))
        })
        .transpose()
}
