//! Core request and result types.

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumString;
use uuid::Uuid;

use crate::models::ProviderKind;

/// Model name reported in metadata for locally computed results.
pub const FALLBACK_MODEL_NAME: &str = "fallback-analysis";

/// The analysis a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum TaskType {
    #[strum(serialize = "sentiment")]
    Sentiment,
    #[strum(serialize = "summarize", serialize = "summary")]
    Summarize,
    #[strum(serialize = "insights", serialize = "insight")]
    Insights,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Sentiment, TaskType::Summarize, TaskType::Insights];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Summarize => "summarize",
            Self::Insights => "insights",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity label attached to sentiment results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Capitalized label for result text.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

/// A single analysis request. One per call, never stored.
///
/// ```
/// use quill::types::{AnalysisRequest, TaskType};
///
/// let request = AnalysisRequest::builder()
///     .text("Slept well, long walk by the river.")
///     .task_type(TaskType::Summarize)
///     .model_id("hf-zephyr-7b")
///     .build();
/// assert_eq!(request.model_id.as_deref(), Some("hf-zephyr-7b"));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct AnalysisRequest {
    #[builder(into)]
    pub text: String,
    pub task_type: TaskType,
    /// Public model id; `None` selects the configured default.
    #[builder(into)]
    pub model_id: Option<String>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            text: text.into(),
            task_type,
            model_id: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Remote,
    Fallback,
}

/// Why the dispatcher used the local heuristic instead of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    UnknownModel,
    MissingCredentials,
    ProviderFailure,
    DegenerateResponse,
}

impl From<&crate::error::QuillError> for FallbackReason {
    fn from(err: &crate::error::QuillError) -> Self {
        use crate::error::QuillError;
        match err {
            QuillError::ModelNotFound(_) => Self::UnknownModel,
            QuillError::MissingCredentials(_) => Self::MissingCredentials,
            QuillError::DegenerateResponse { .. } => Self::DegenerateResponse,
            _ => Self::ProviderFailure,
        }
    }
}

/// Word counts of a summary and the text it summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLengths {
    pub original: usize,
    pub summary: usize,
}

/// Task output before it is stamped with request metadata.
///
/// Both the remote post-processing and the fallback heuristics produce this;
/// it carries no clock or id so the heuristics stay pure.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result_text: String,
    pub confidence: f64,
    pub sentiment: Option<Sentiment>,
    pub themes: Option<Vec<String>>,
    pub lengths: Option<SummaryLengths>,
}

impl Outcome {
    pub fn new(result_text: impl Into<String>, confidence: f64) -> Self {
        Self {
            result_text: result_text.into(),
            confidence,
            sentiment: None,
            themes: None,
            lengths: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_themes(mut self, themes: Vec<String>) -> Self {
        self.themes = Some(themes);
        self
    }

    pub fn with_lengths(mut self, original: usize, summary: usize) -> Self {
        self.lengths = Some(SummaryLengths { original, summary });
        self
    }
}

/// Provider metadata attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Model id used, or [`FALLBACK_MODEL_NAME`].
    pub model: String,
    pub source: ResultSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_model: Option<String>,
    /// Model id the caller asked for when the result is a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_length: Option<usize>,
    pub word_count: usize,
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Normalized response for one request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "result")]
    pub result_text: String,
    pub task_type: TaskType,
    pub confidence: f64,
    pub metadata: ResultMetadata,
}

impl AnalysisResult {
    pub fn is_fallback(&self) -> bool {
        self.metadata.source == ResultSource::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuillError;
    use std::str::FromStr;

    #[test]
    fn task_type_parses_aliases_case_insensitively() {
        assert_eq!(TaskType::from_str("Sentiment").unwrap(), TaskType::Sentiment);
        assert_eq!(TaskType::from_str("SUMMARY").unwrap(), TaskType::Summarize);
        assert_eq!(TaskType::from_str("insight").unwrap(), TaskType::Insights);
        assert!(TaskType::from_str("analyze").is_err());
    }

    #[test]
    fn task_type_display_is_wire_name() {
        for task in TaskType::ALL {
            assert_eq!(task.to_string(), task.as_str());
            let json = serde_json::to_string(&task).unwrap();
            assert_eq!(json, format!("\"{}\"", task.as_str()));
        }
    }

    #[test]
    fn fallback_reason_from_error() {
        assert_eq!(
            FallbackReason::from(&QuillError::ModelNotFound("x".into())),
            FallbackReason::UnknownModel
        );
        assert_eq!(
            FallbackReason::from(&QuillError::MissingCredentials(ProviderKind::Groq)),
            FallbackReason::MissingCredentials
        );
        assert_eq!(
            FallbackReason::from(&QuillError::Timeout(10)),
            FallbackReason::ProviderFailure
        );
    }

    #[test]
    fn fallback_reason_serializes_snake_case() {
        let json = serde_json::to_string(&FallbackReason::DegenerateResponse).unwrap();
        assert_eq!(json, "\"degenerate_response\"");
    }

    #[test]
    fn request_builder_defaults_model_to_none() {
        let request = AnalysisRequest::builder()
            .text("hello")
            .task_type(TaskType::Sentiment)
            .build();
        assert_eq!(request, AnalysisRequest::new("hello", TaskType::Sentiment));
    }
}
