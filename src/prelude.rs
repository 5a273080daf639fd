//! Convenience re-exports for common use.

pub use crate::config::{ProviderCredentials, QuillConfig};
pub use crate::dispatch::{Dispatcher, DispatcherBuilder};
pub use crate::error::{QuillError, Result};
pub use crate::models::{ModelDescriptor, ModelRegistry, ProviderKind};
pub use crate::provider::{CompletionProvider, CompletionRequest};
pub use crate::types::{AnalysisRequest, AnalysisResult, ResultSource, Sentiment, TaskType};
