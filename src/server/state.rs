//! Application state for the web server.

use std::sync::Arc;

use crate::dispatch::Dispatcher;

/// Shared application state. Cloned per request; the dispatcher is shared.
#[derive(Clone, Debug)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl From<Arc<Dispatcher>> for AppState {
    fn from(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}
