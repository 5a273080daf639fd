//! Typed provider identifiers and alias handling.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The remote LLM vendors the gateway can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    Groq,
    HuggingFace,
}

impl ProviderKind {
    /// Every provider, in listing order.
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Groq, ProviderKind::HuggingFace];

    /// Canonical provider key string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::HuggingFace => "huggingface",
        }
    }

    /// Parse user-facing provider aliases into a typed provider key.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "huggingface" | "hugging-face" | "hugging_face" | "hf" => Some(Self::HuggingFace),
            _ => None,
        }
    }

    /// Environment variables that may carry this provider's API key, in
    /// precedence order.
    pub const fn credential_env_vars(self) -> &'static [&'static str] {
        match self {
            Self::Groq => &["GROQ_API_KEY"],
            Self::HuggingFace => &["HUGGINGFACE_API_KEY", "HF_API_KEY", "HF_TOKEN"],
        }
    }

    /// Environment variable overriding this provider's base URL.
    pub const fn base_url_env_var(self) -> &'static str {
        match self {
            Self::Groq => "GROQ_BASE_URL",
            Self::HuggingFace => "HUGGINGFACE_BASE_URL",
        }
    }
}
