//! Provider API keys.

use std::collections::HashMap;
use std::fmt;

use crate::models::ProviderKind;

/// API keys, at most one per provider.
///
/// A provider without a key is simply disabled; nothing about a missing key
/// is an error.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    keys: HashMap<ProviderKind, String>,
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in ProviderKind::ALL {
            if self.keys.contains_key(&kind) {
                map.entry(&kind.as_str(), &"<redacted>");
            }
        }
        map.finish()
    }
}

impl ProviderCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read each provider's key from the first populated variable in
    /// [`ProviderKind::credential_env_vars`].
    pub fn from_lookup(get: &impl Fn(&str) -> Option<String>) -> Self {
        let mut credentials = Self::new();
        for kind in ProviderKind::ALL {
            if let Some(key) = kind.credential_env_vars().iter().find_map(|&var| get(var)) {
                credentials = credentials.with_key(kind, key);
            }
        }
        credentials
    }

    /// Add a key. Blank keys are ignored.
    pub fn with_key(mut self, provider: ProviderKind, key: impl Into<String>) -> Self {
        let key = key.into().trim().to_string();
        if !key.is_empty() {
            self.keys.insert(provider, key);
        }
        self
    }

    pub fn key(&self, provider: ProviderKind) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }

    pub fn has(&self, provider: ProviderKind) -> bool {
        self.keys.contains_key(&provider)
    }

    /// Providers that have a key, in listing order.
    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.has(*kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_keys() {
        let creds = ProviderCredentials::new().with_key(ProviderKind::Groq, "gsk-secret");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("gsk-secret"));
        assert!(debug.contains("groq"));
    }

    #[test]
    fn blank_keys_are_ignored() {
        let creds = ProviderCredentials::new().with_key(ProviderKind::HuggingFace, "  ");
        assert!(!creds.has(ProviderKind::HuggingFace));
        assert!(creds.configured().is_empty());
    }

    #[test]
    fn huggingface_env_var_precedence() {
        let get = |key: &str| match key {
            "HF_API_KEY" => Some("second".to_string()),
            "HF_TOKEN" => Some("third".to_string()),
            _ => None,
        };
        let creds = ProviderCredentials::from_lookup(&get);
        assert_eq!(creds.key(ProviderKind::HuggingFace), Some("second"));
        assert_eq!(creds.configured(), [ProviderKind::HuggingFace]);
    }
}
