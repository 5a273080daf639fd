//! HTTP surface: an axum router over a shared [`Dispatcher`](crate::dispatch::Dispatcher).

mod app;
mod error;
mod handlers;
mod state;

pub use app::{create_router, run_server};
pub use error::ApiError;
pub use handlers::AnalyzeBody;
pub use state::AppState;
