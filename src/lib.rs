//! Quill: a journal analysis gateway.
//!
//! Accepts journal text, forwards it to a remote LLM provider (Groq or
//! HuggingFace) for sentiment, summarization or insight extraction, and
//! falls back to local heuristics whenever the remote path is unavailable.
//! Every request produces a result.
//!
//! # Quick Start
//!
//! ```no_run
//! use quill::config::QuillConfig;
//! use quill::dispatch::Dispatcher;
//! use quill::types::{AnalysisRequest, TaskType};
//!
//! # async fn example() -> quill::error::Result<()> {
//! let config = QuillConfig::from_env()?;
//! let dispatcher = Dispatcher::from_config(&config);
//! let result = dispatcher
//!     .analyze(AnalysisRequest::new("Today was a good day.", TaskType::Sentiment))
//!     .await;
//! println!("{} ({})", result.result_text, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod types;
pub mod util;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

pub use dispatch::Dispatcher;
pub use error::{QuillError, Result};
