//! Read-only registry of the models the gateway can route to.

use std::collections::HashMap;

use super::{ModelDescriptor, ProviderKind};

/// Registry mapping public model ids to their descriptors.
///
/// Built once at startup and never mutated afterwards. Lookups of unknown ids
/// return `None`; the dispatcher treats that the same way as a provider with
/// no credentials.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
    index: HashMap<String, usize>,
}

impl ModelRegistry {
    /// Build a registry from descriptors. Later duplicates of a model id are
    /// ignored.
    pub fn new(descriptors: impl IntoIterator<Item = ModelDescriptor>) -> Self {
        let mut models = Vec::new();
        let mut index = HashMap::new();
        for descriptor in descriptors {
            if index.contains_key(&descriptor.model_id) {
                continue;
            }
            index.insert(descriptor.model_id.clone(), models.len());
            models.push(descriptor);
        }
        Self { models, index }
    }

    /// The fixed set of Groq and HuggingFace models shipped with the gateway.
    pub fn builtin() -> Self {
        use ProviderKind::{Groq, HuggingFace};

        Self::new([
            ModelDescriptor::new(
                "groq-llama3-8b",
                Groq,
                "llama-3.1-8b-instant",
                "Llama 3.1 8B on Groq. Fast general-purpose analysis.",
                &["speed", "sentiment", "short entries"],
            ),
            ModelDescriptor::new(
                "groq-llama3-70b",
                Groq,
                "llama-3.3-70b-versatile",
                "Llama 3.3 70B on Groq. Deeper reading of long entries.",
                &["nuance", "insights", "long entries"],
            ),
            ModelDescriptor::new(
                "groq-mixtral-8x7b",
                Groq,
                "mixtral-8x7b-32768",
                "Mixtral 8x7B on Groq with a 32k context window.",
                &["long context", "summaries"],
            ),
            ModelDescriptor::new(
                "groq-gemma2-9b",
                Groq,
                "gemma2-9b-it",
                "Gemma 2 9B instruction-tuned on Groq.",
                &["concise output", "summaries"],
            ),
            ModelDescriptor::new(
                "hf-mistral-7b",
                HuggingFace,
                "mistralai/Mistral-7B-Instruct-v0.2",
                "Mistral 7B Instruct via the HuggingFace Inference API.",
                &["instruction following", "sentiment"],
            ),
            ModelDescriptor::new(
                "hf-phi3-medium",
                HuggingFace,
                "microsoft/Phi-3-medium-4k-instruct",
                "Phi-3 Medium via the HuggingFace Inference API.",
                &["reasoning", "insights"],
            ),
            ModelDescriptor::new(
                "hf-gemma-7b",
                HuggingFace,
                "google/gemma-7b-it",
                "Gemma 7B instruction-tuned via the HuggingFace Inference API.",
                &["summaries", "plain language"],
            ),
            ModelDescriptor::new(
                "hf-zephyr-7b",
                HuggingFace,
                "HuggingFaceH4/zephyr-7b-beta",
                "Zephyr 7B beta via the HuggingFace Inference API.",
                &["conversational tone", "insights"],
            ),
        ])
    }

    pub fn get(&self, model_id: &str) -> Option<&ModelDescriptor> {
        self.index.get(model_id).map(|&i| &self.models[i])
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.index.contains_key(model_id)
    }

    /// All descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }

    pub fn by_provider(&self, provider: ProviderKind) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter().filter(move |m| m.provider == provider)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_MODEL_ID;

    #[test]
    fn builtin_contains_default_model() {
        let registry = ModelRegistry::builtin();
        let default = registry.get(DEFAULT_MODEL_ID).unwrap();
        assert_eq!(default.provider, ProviderKind::Groq);
        assert_eq!(default.remote_name, "llama-3.1-8b-instant");
    }

    #[test]
    fn unknown_model_is_none() {
        let registry = ModelRegistry::builtin();
        assert!(registry.get("gpt-17-ultra").is_none());
        assert!(!registry.contains(""));
    }

    #[test]
    fn builtin_covers_both_providers() {
        let registry = ModelRegistry::builtin();
        assert_eq!(registry.by_provider(ProviderKind::Groq).count(), 4);
        assert_eq!(registry.by_provider(ProviderKind::HuggingFace).count(), 4);
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn duplicate_ids_keep_first_registration() {
        let registry = ModelRegistry::new([
            ModelDescriptor::new("m", ProviderKind::Groq, "first", "", &[]),
            ModelDescriptor::new("m", ProviderKind::HuggingFace, "second", "", &[]),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("m").unwrap().remote_name, "first");
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let ids: Vec<_> = ModelRegistry::builtin()
            .iter()
            .map(|m| m.model_id.clone())
            .collect();
        assert_eq!(ids.first().map(String::as_str), Some("groq-llama3-8b"));
        assert_eq!(ids.last().map(String::as_str), Some("hf-zephyr-7b"));
    }
}
