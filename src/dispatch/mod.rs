//! Provider dispatch with fallback degradation.
//!
//! [`Dispatcher::analyze`] is the only entry point the web and CLI layers
//! use. It resolves the model, calls the provider under a deadline and, on
//! any failure, computes the local heuristic instead. It never returns an
//! error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analysis::{self, classify::word_count, fallback, prompts};
use crate::config::{ProviderCredentials, QuillConfig};
use crate::error::{ErrorCategory, QuillError, Result};
use crate::models::{ModelDescriptor, ModelRegistry, ProviderKind, DEFAULT_MODEL_ID};
use crate::provider::{self, CompletionProvider, CompletionRequest};
use crate::types::{
    AnalysisRequest, AnalysisResult, FallbackReason, Outcome, ResultMetadata, ResultSource,
    TaskType, FALLBACK_MODEL_NAME,
};
use crate::util::with_timeout;

/// A registry entry together with whether it can currently be served remotely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAvailability {
    #[serde(flatten)]
    pub descriptor: ModelDescriptor,
    pub available: bool,
}

/// Routes analysis requests to providers. Constructed once, shared by `Arc`.
pub struct Dispatcher {
    registry: ModelRegistry,
    credentials: ProviderCredentials,
    adapters: HashMap<ProviderKind, Arc<dyn CompletionProvider>>,
    default_model: String,
    insight_seed: Option<u64>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut adapters: Vec<_> = self.adapters.keys().map(|k| k.as_str()).collect();
        adapters.sort_unstable();
        f.debug_struct("Dispatcher")
            .field("models", &self.registry.len())
            .field("credentials", &self.credentials)
            .field("adapters", &adapters)
            .field("default_model", &self.default_model)
            .field("insight_seed", &self.insight_seed)
            .finish()
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Built-in registry plus an HTTP adapter for every credentialed provider.
    pub fn from_config(config: &QuillConfig) -> Self {
        let mut builder = Self::builder()
            .credentials(config.credentials().clone())
            .default_model(config.default_model());
        if let Some(seed) = config.insight_seed() {
            builder = builder.insight_seed(seed);
        }
        for adapter in provider::create_providers(config).into_values() {
            builder = builder.adapter(adapter);
        }
        builder.build()
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Whether requests to `provider` can leave the process at all.
    pub fn is_provider_connected(&self, provider: ProviderKind) -> bool {
        self.credentials.has(provider) && self.adapters.contains_key(&provider)
    }

    /// Whether `model_id` is registered and its provider is connected.
    pub fn is_available(&self, model_id: &str) -> bool {
        self.registry
            .get(model_id)
            .is_some_and(|d| self.is_provider_connected(d.provider))
    }

    /// Every registered model, in registration order.
    pub fn models(&self) -> Vec<ModelAvailability> {
        self.registry
            .iter()
            .map(|descriptor| ModelAvailability {
                available: self.is_provider_connected(descriptor.provider),
                descriptor: descriptor.clone(),
            })
            .collect()
    }

    /// Analyze one journal entry. Always produces a result.
    pub async fn analyze(&self, request: AnalysisRequest) -> AnalysisResult {
        let task = request.task_type;
        let model_id = request
            .model_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(self.default_model.as_str());

        debug!(
            task = %task,
            model = model_id,
            chars = request.text.chars().count(),
            "Dispatching analysis"
        );

        match self.try_remote(task, &request.text, model_id).await {
            Ok((descriptor, outcome)) => {
                debug!(task = %task, model = model_id, "Remote analysis succeeded");
                build_result(
                    task,
                    &request.text,
                    outcome,
                    ResultMetadataSeed::Remote(descriptor),
                )
            }
            Err(err) => {
                match err.category() {
                    ErrorCategory::ConfigurationGap => {
                        debug!(task = %task, model = model_id, reason = %err, "Using fallback analysis")
                    }
                    _ => {
                        warn!(task = %task, model = model_id, error = %err, "Provider call failed, using fallback analysis")
                    }
                }
                let outcome = fallback::run(task, &request.text, &mut self.insight_rng());
                build_result(
                    task,
                    &request.text,
                    outcome,
                    ResultMetadataSeed::Fallback {
                        requested: model_id,
                        reason: FallbackReason::from(&err),
                    },
                )
            }
        }
    }

    fn resolve(&self, model_id: &str) -> Result<(&ModelDescriptor, &Arc<dyn CompletionProvider>)> {
        let descriptor = self
            .registry
            .get(model_id)
            .ok_or_else(|| QuillError::ModelNotFound(model_id.to_string()))?;
        if !self.credentials.has(descriptor.provider) {
            return Err(QuillError::MissingCredentials(descriptor.provider));
        }
        let adapter = self
            .adapters
            .get(&descriptor.provider)
            .ok_or(QuillError::MissingCredentials(descriptor.provider))?;
        Ok((descriptor, adapter))
    }

    async fn try_remote(
        &self,
        task: TaskType,
        text: &str,
        model_id: &str,
    ) -> Result<(&ModelDescriptor, Outcome)> {
        let (descriptor, adapter) = self.resolve(model_id)?;

        let request = CompletionRequest::builder()
            .remote_model(descriptor.remote_name.as_str())
            .prompt(prompts::prompt_for(task, text))
            .system(prompts::system_prompt())
            .build();

        let generated = with_timeout(adapter.timeout(), adapter.complete(&request)).await?;
        let generated = provider::check_generated(descriptor.provider, &generated)?;
        Ok((descriptor, analysis::interpret(task, text, &generated)))
    }

    fn insight_rng(&self) -> fastrand::Rng {
        match self.insight_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

enum ResultMetadataSeed<'a> {
    Remote(&'a ModelDescriptor),
    Fallback {
        requested: &'a str,
        reason: FallbackReason,
    },
}

fn build_result(
    task: TaskType,
    text: &str,
    outcome: Outcome,
    seed: ResultMetadataSeed<'_>,
) -> AnalysisResult {
    let (model, source, provider, remote_model, requested_model, fallback_reason) = match seed {
        ResultMetadataSeed::Remote(d) => (
            d.model_id.clone(),
            ResultSource::Remote,
            Some(d.provider),
            Some(d.remote_name.clone()),
            None,
            None,
        ),
        ResultMetadataSeed::Fallback { requested, reason } => (
            FALLBACK_MODEL_NAME.to_string(),
            ResultSource::Fallback,
            None,
            None,
            Some(requested.to_string()),
            Some(reason),
        ),
    };

    AnalysisResult {
        result_text: outcome.result_text,
        task_type: task,
        confidence: outcome.confidence.clamp(0.0, 1.0),
        metadata: ResultMetadata {
            model,
            source,
            provider,
            remote_model,
            requested_model,
            fallback_reason,
            sentiment: outcome.sentiment,
            themes: outcome.themes,
            original_length: outcome.lengths.map(|l| l.original),
            summary_length: outcome.lengths.map(|l| l.summary),
            word_count: word_count(text),
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
        },
    }
}

/// Builder for [`Dispatcher`].
///
/// Adapters are keyed by [`CompletionProvider::kind`]; adding a second
/// adapter for the same provider replaces the first.
pub struct DispatcherBuilder {
    registry: ModelRegistry,
    credentials: ProviderCredentials,
    adapters: HashMap<ProviderKind, Arc<dyn CompletionProvider>>,
    default_model: String,
    insight_seed: Option<u64>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self {
            registry: ModelRegistry::builtin(),
            credentials: ProviderCredentials::default(),
            adapters: HashMap::new(),
            default_model: DEFAULT_MODEL_ID.to_string(),
            insight_seed: None,
        }
    }
}

impl DispatcherBuilder {
    pub fn registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn credentials(mut self, credentials: ProviderCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn adapter(mut self, adapter: Arc<dyn CompletionProvider>) -> Self {
        self.adapters.insert(adapter.kind(), adapter);
        self
    }

    pub fn default_model(mut self, model_id: impl Into<String>) -> Self {
        self.default_model = model_id.into();
        self
    }

    pub fn insight_seed(mut self, seed: u64) -> Self {
        self.insight_seed = Some(seed);
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            registry: self.registry,
            credentials: self.credentials,
            adapters: self.adapters,
            default_model: self.default_model,
            insight_seed: self.insight_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_wires_only_credentialed_providers() {
        let config = QuillConfig::new().with_api_key(ProviderKind::HuggingFace, "hf_test");
        let dispatcher = Dispatcher::from_config(&config);
        assert!(dispatcher.is_provider_connected(ProviderKind::HuggingFace));
        assert!(!dispatcher.is_provider_connected(ProviderKind::Groq));
        assert!(dispatcher.is_available("hf-zephyr-7b"));
        assert!(!dispatcher.is_available("groq-llama3-8b"));
        assert!(!dispatcher.is_available("gpt-4"));
    }

    #[test]
    fn models_lists_registry_in_order() {
        let dispatcher = Dispatcher::builder().build();
        let ids: Vec<_> = dispatcher
            .models()
            .into_iter()
            .map(|m| m.descriptor.model_id)
            .collect();
        let expected: Vec<_> = ModelRegistry::builtin()
            .iter()
            .map(|d| d.model_id.clone())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn availability_serializes_flat() {
        let dispatcher = Dispatcher::builder().build();
        let value = serde_json::to_value(&dispatcher.models()[0]).unwrap();
        assert_eq!(value["id"], "groq-llama3-8b");
        assert_eq!(value["provider"], "groq");
        assert_eq!(value["available"], false);
    }

    #[tokio::test]
    async fn blank_model_uses_default() {
        let dispatcher = Dispatcher::builder().default_model("hf-gemma-7b").build();
        let result = dispatcher
            .analyze(AnalysisRequest::new("ok", TaskType::Sentiment).with_model("   "))
            .await;
        assert_eq!(result.metadata.requested_model.as_deref(), Some("hf-gemma-7b"));
        assert_eq!(
            result.metadata.fallback_reason,
            Some(FallbackReason::MissingCredentials)
        );
    }
}
