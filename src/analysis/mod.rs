//! Task logic: prompts, remote post-processing and local fallbacks.

pub mod classify;
pub mod fallback;
pub mod prompts;

use crate::types::{Outcome, TaskType};

use classify::{sentiment_of, themes_in, word_count};

pub const REMOTE_SENTIMENT_CONFIDENCE: f64 = 0.87;
pub const REMOTE_INSIGHTS_CONFIDENCE: f64 = 0.82;
pub const REMOTE_SUMMARIZE_CONFIDENCE: f64 = 0.85;

/// Turn a model's generated text into a structured outcome for `task`.
pub fn interpret(task: TaskType, source_text: &str, generated: &str) -> Outcome {
    let generated = generated.trim();
    match task {
        TaskType::Sentiment => Outcome::new(generated, REMOTE_SENTIMENT_CONFIDENCE)
            .with_sentiment(sentiment_of(generated)),
        TaskType::Insights => {
            Outcome::new(generated, REMOTE_INSIGHTS_CONFIDENCE).with_themes(themes_in(generated))
        }
        TaskType::Summarize => Outcome::new(generated, REMOTE_SUMMARIZE_CONFIDENCE)
            .with_lengths(word_count(source_text), word_count(generated)),
    }
}
