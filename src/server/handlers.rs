//! API request handlers.

use std::str::FromStr;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::dispatch::ModelAvailability;
use crate::error::QuillError;
use crate::models::ProviderKind;
use crate::types::{AnalysisRequest, AnalysisResult, TaskType};

use super::error::ApiError;
use super::state::AppState;

pub const SERVICE_NAME: &str = "quill";

/// Body accepted by every analysis route.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub task_type: Option<String>,
    #[serde(default, alias = "model_id")]
    pub model: Option<String>,
}

impl AnalyzeBody {
    fn into_request(self, task: TaskType) -> crate::error::Result<AnalysisRequest> {
        let text = self
            .text
            .ok_or_else(|| QuillError::InvalidArgument("field `text` is required".into()))?;
        if text.trim().is_empty() {
            return Err(QuillError::InvalidArgument(
                "field `text` must not be empty".into(),
            ));
        }
        Ok(AnalysisRequest {
            text,
            task_type: task,
            model_id: self.model,
        })
    }
}

async fn run_task(
    state: &AppState,
    task: TaskType,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(body) = body?;
    let request = body.into_request(task)?;
    debug!(task = %task, "Analysis request received");
    Ok(Json(state.dispatcher.analyze(request).await))
}

pub async fn sentiment(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    run_task(&state, TaskType::Sentiment, body).await
}

pub async fn insights(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    run_task(&state, TaskType::Insights, body).await
}

pub async fn summarize(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    run_task(&state, TaskType::Summarize, body).await
}

/// Generic route; `task_type` in the body picks the task.
pub async fn process(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(body) = body?;
    let task = parse_task_type(body.task_type.as_deref())?;
    run_task(&state, task, Ok(Json(body))).await
}

fn parse_task_type(raw: Option<&str>) -> crate::error::Result<TaskType> {
    let raw =
        raw.ok_or_else(|| QuillError::InvalidArgument("field `task_type` is required".into()))?;
    TaskType::from_str(raw.trim()).map_err(|_| {
        QuillError::InvalidArgument(format!(
            "unknown task_type '{raw}', expected one of: sentiment, summarize, insights"
        ))
    })
}

/// Response for `GET /api/ai/models`.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub default_model: String,
    pub models: Vec<ModelAvailability>,
    pub providers: ProviderStatus,
}

#[derive(Debug, Serialize)]
pub struct ProviderStatus {
    pub groq: bool,
    pub huggingface: bool,
}

impl ProviderStatus {
    fn from_state(state: &AppState) -> Self {
        Self {
            groq: state.dispatcher.is_provider_connected(ProviderKind::Groq),
            huggingface: state
                .dispatcher
                .is_provider_connected(ProviderKind::HuggingFace),
        }
    }
}

pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        default_model: state.dispatcher.default_model().to_string(),
        models: state.dispatcher.models(),
        providers: ProviderStatus::from_state(&state),
    })
}

pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let providers = ProviderStatus::from_state(&state);
    Json(json!({
        "name": "Quill Journal Analysis API",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "features": ["sentiment", "summarize", "insights", "fallback-analysis"],
        "groq_connected": providers.groq,
        "hf_connected": providers.huggingface,
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_is_rejected() {
        let err = AnalyzeBody::default()
            .into_request(TaskType::Sentiment)
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(matches!(err, QuillError::InvalidArgument(ref m) if m.contains("text")));
    }

    #[test]
    fn task_type_validation_is_input_error() {
        assert_eq!(parse_task_type(Some(" Insight ")).unwrap(), TaskType::Insights);
        for raw in [None, Some("translate")] {
            let err = parse_task_type(raw).unwrap_err();
            assert_eq!(err.category(), crate::error::ErrorCategory::InputValidation);
        }
    }

    #[test]
    fn whitespace_text_is_rejected() {
        let body = AnalyzeBody {
            text: Some(" \n\t ".into()),
            ..Default::default()
        };
        assert!(body.into_request(TaskType::Summarize).is_err());
    }

    #[test]
    fn model_id_alias_is_accepted() {
        let body: AnalyzeBody =
            serde_json::from_str(r#"{"text":"hi","model_id":"hf-zephyr-7b"}"#).unwrap();
        let request = body.into_request(TaskType::Insights).unwrap();
        assert_eq!(request.model_id.as_deref(), Some("hf-zephyr-7b"));
        assert_eq!(request.task_type, TaskType::Insights);
    }
}
