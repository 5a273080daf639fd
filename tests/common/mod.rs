//! Shared test helpers and mock providers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use quill::config::ProviderCredentials;
use quill::dispatch::Dispatcher;
use quill::error::{QuillError, Result};
use quill::models::ProviderKind;
use quill::provider::{CompletionProvider, CompletionRequest};

/// Fails the test if the dispatcher ever calls it.
pub struct PanickingProvider {
    kind: ProviderKind,
}

impl PanickingProvider {
    pub fn new(kind: ProviderKind) -> Arc<Self> {
        Arc::new(Self { kind })
    }
}

#[async_trait]
impl CompletionProvider for PanickingProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(1)
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        panic!(
            "{} adapter must not be called (model {})",
            self.kind, request.remote_model
        );
    }
}

enum Reply {
    Text(String),
    Status(u16),
    Hang,
}

/// A mock provider that returns a canned reply and records requests.
pub struct MockProvider {
    kind: ProviderKind,
    reply: Reply,
    timeout: Duration,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    fn with_reply(kind: ProviderKind, reply: Reply) -> Self {
        Self {
            kind,
            reply,
            timeout: Duration::from_secs(5),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with `text`.
    pub fn replying(kind: ProviderKind, text: &str) -> Arc<Self> {
        Arc::new(Self::with_reply(kind, Reply::Text(text.to_string())))
    }

    /// Always fails with an API error carrying `status`.
    pub fn failing(kind: ProviderKind, status: u16) -> Arc<Self> {
        Arc::new(Self::with_reply(kind, Reply::Status(status)))
    }

    /// Never answers; the dispatcher has to time it out.
    pub fn hanging(kind: ProviderKind, timeout: Duration) -> Arc<Self> {
        let mut provider = Self::with_reply(kind, Reply::Hang);
        provider.timeout = timeout;
        Arc::new(provider)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status) => Err(QuillError::api(*status, "mock failure")),
            Reply::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Credentials for every provider.
pub fn all_credentials() -> ProviderCredentials {
    ProviderCredentials::new()
        .with_key(ProviderKind::Groq, "test-key")
        .with_key(ProviderKind::HuggingFace, "test-key")
}

/// Dispatcher with no credentials and a fixed insight seed.
pub fn offline_dispatcher() -> Dispatcher {
    Dispatcher::builder().insight_seed(7).build()
}
