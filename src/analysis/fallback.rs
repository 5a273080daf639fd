//! Local heuristics used when no provider call succeeds.
//!
//! Every function here is total: any input, including the empty string,
//! produces an [`Outcome`]. Only [`insights`] draws randomness, and it takes
//! the generator from the caller.

use crate::types::{Outcome, TaskType};

use super::classify::{keyword_counts, polarity, word_count};

/// Confidence when one polarity strictly dominates.
pub const SENTIMENT_DECISIVE_CONFIDENCE: f64 = 0.75;
/// Confidence for a neutral (tied) sentiment.
pub const SENTIMENT_NEUTRAL_CONFIDENCE: f64 = 0.70;
pub const INSIGHTS_CONFIDENCE: f64 = 0.70;
pub const SUMMARIZE_CONFIDENCE: f64 = 0.65;

/// Characters kept when a short text is truncated instead of summarized.
pub const SUMMARY_TRUNCATE_CHARS: usize = 100;

/// Pre-written insights the fallback chooses from.
pub const INSIGHTS: [&str; 4] = [
    "Your writing shows self-awareness and introspection",
    "Consider the emotional patterns in your daily experiences",
    "Notice the balance between challenges and positive moments",
    "Your journal reveals personal growth opportunities",
];

/// Themes attached to every fallback insight.
pub const INSIGHT_THEMES: [&str; 3] = ["self-awareness", "growth", "reflection"];

/// Run the heuristic for `task`.
pub fn run(task: TaskType, text: &str, rng: &mut fastrand::Rng) -> Outcome {
    match task {
        TaskType::Sentiment => sentiment(text),
        TaskType::Insights => insights(rng),
        TaskType::Summarize => summarize(text),
    }
}

/// Keyword-count sentiment.
pub fn sentiment(text: &str) -> Outcome {
    let (positive, negative) = keyword_counts(text);
    let label = polarity(positive, negative);
    let confidence = if positive == negative {
        SENTIMENT_NEUTRAL_CONFIDENCE
    } else {
        SENTIMENT_DECISIVE_CONFIDENCE
    };

    Outcome::new(
        format!(
            "Sentiment: {} - Your journal entry reflects a {} emotional tone.",
            label.title(),
            label.as_str()
        ),
        confidence,
    )
    .with_sentiment(label)
}

/// One of [`INSIGHTS`], chosen uniformly.
pub fn insights(rng: &mut fastrand::Rng) -> Outcome {
    let insight = INSIGHTS[rng.usize(..INSIGHTS.len())];
    Outcome::new(
        format!(
            "Insight: {insight}. Continue this reflective practice for deeper self-understanding."
        ),
        INSIGHTS_CONFIDENCE,
    )
    .with_themes(INSIGHT_THEMES.iter().map(|t| (*t).to_string()).collect())
}

/// First sentence plus the second-to-last, or a truncated prefix for short
/// texts.
pub fn summarize(text: &str) -> Outcome {
    let pieces: Vec<&str> = text.split('.').collect();
    let summary = if pieces.len() > 2 {
        format!("{}. {}", pieces[0].trim(), pieces[pieces.len() - 2].trim())
    } else if text.chars().count() > SUMMARY_TRUNCATE_CHARS {
        let head: String = text.chars().take(SUMMARY_TRUNCATE_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    };
    let summary = summary.trim();

    let result_text = if summary.is_empty() {
        "Summary:".to_string()
    } else {
        format!("Summary: {summary}")
    };

    Outcome::new(result_text, SUMMARIZE_CONFIDENCE)
        .with_lengths(word_count(text), word_count(summary))
}
