//! HuggingFace Inference API provider.
//!
//! The hosted inference endpoint answers in several shapes depending on the
//! model's pipeline, so the response is decoded through [`HfEnvelope`]
//! instead of a single struct.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QuillError, Result};
use crate::models::ProviderKind;

use super::groq::ChatResponse;
use super::http::{bearer_headers, shared_client, status_to_error};
use super::{CompletionProvider, CompletionRequest};

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

pub struct HuggingFaceProvider {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl HuggingFaceProvider {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
        }
    }

    fn build_request_body(request: &CompletionRequest) -> HfRequest {
        let inputs = match &request.system {
            Some(system) => format!("{system}\n\n{}", request.prompt),
            None => request.prompt.clone(),
        };
        HfRequest {
            inputs,
            parameters: HfParameters {
                max_new_tokens: request.max_tokens,
                temperature: request.temperature,
                return_full_text: false,
            },
            options: HfOptions {
                wait_for_model: true,
            },
        }
    }
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = Self::build_request_body(request);
        let url = format!("{}/models/{}", self.base_url, request.remote_model);

        debug!(model = %request.remote_model, "HuggingFace complete");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body_text = resp.text().await?;
        if status != 200 {
            return Err(status_to_error(status, &body_text));
        }

        let envelope: HfEnvelope = serde_json::from_str(&body_text)?;
        let generated = envelope.into_text(status)?;
        Ok(strip_echo(&generated, &body.inputs).to_string())
    }
}

/// Remove the prompt when a model echoes it back despite
/// `return_full_text: false`.
fn strip_echo<'a>(generated: &'a str, prompt: &str) -> &'a str {
    generated.strip_prefix(prompt).unwrap_or(generated)
}

#[derive(Debug, Serialize)]
struct HfRequest {
    inputs: String,
    parameters: HfParameters,
    options: HfOptions,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct HfOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct HfError {
    error: serde_json::Value,
    #[serde(default)]
    estimated_time: Option<f64>,
}

/// Every response shape the inference API is known to produce.
///
/// Variant order matters: a derived struct also accepts a JSON array, so the
/// list form has to be tried before the error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HfEnvelope {
    Generations(Vec<HfGeneration>),
    Error(HfError),
    Single(HfGeneration),
    Chat(ChatResponse),
    Text(String),
}

impl HfEnvelope {
    fn into_text(self, status: u16) -> Result<String> {
        match self {
            Self::Error(err) => {
                let mut message = match err.error {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                if let Some(secs) = err.estimated_time {
                    message.push_str(&format!(" (estimated time {secs:.0}s)"));
                }
                Err(QuillError::api(status, message))
            }
            Self::Generations(generations) => generations
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or_else(|| {
                    QuillError::unexpected(ProviderKind::HuggingFace, "empty generation list")
                }),
            Self::Single(generation) => Ok(generation.generated_text),
            Self::Chat(chat) => chat.into_text().ok_or_else(|| {
                QuillError::unexpected(ProviderKind::HuggingFace, "no choices in response")
            }),
            Self::Text(text) => Ok(text),
        }
    }
}
