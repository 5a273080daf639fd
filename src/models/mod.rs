//! Model definitions and the built-in registry.

pub mod provider_key;
pub mod registry;

pub use provider_key::ProviderKind;
pub use registry::ModelRegistry;

use serde::Serialize;

/// Model id used when a request does not name one.
pub const DEFAULT_MODEL_ID: &str = "groq-llama3-8b";

/// Registry entry mapping a public model id to a remote model on a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    #[serde(rename = "id")]
    pub model_id: String,
    pub provider: ProviderKind,
    pub remote_name: String,
    pub description: String,
    pub strengths: Vec<String>,
}

impl ModelDescriptor {
    pub fn new(
        model_id: impl Into<String>,
        provider: ProviderKind,
        remote_name: impl Into<String>,
        description: impl Into<String>,
        strengths: &[&str],
    ) -> Self {
        Self {
            model_id: model_id.into(),
            provider,
            remote_name: remote_name.into(),
            description: description.into(),
            strengths: strengths.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
