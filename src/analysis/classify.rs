//! Keyword scans shared by the fallback heuristics and remote post-processing.
//!
//! Remote models return free text. These scans turn that text into the
//! structured `sentiment` and `themes` metadata fields.

use crate::types::Sentiment;

/// Words counted as positive by the sentiment scans.
pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "good", "great", "excellent", "amazing", "wonderful", "love", "excited", "joy",
];

/// Words counted as negative by the sentiment scans.
pub const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "bad",
    "terrible",
    "awful",
    "hate",
    "angry",
    "frustrated",
    "disappointed",
];

/// Theme vocabulary: theme label followed by the words that signal it.
pub const THEME_VOCABULARY: &[(&str, &[&str])] = &[
    ("growth", &["growth", "grow", "growing", "progress", "improve", "improving", "learning"]),
    ("reflection", &["reflect", "reflection", "reflective", "reflecting", "introspection"]),
    ("goals", &["goal", "goals", "plan", "planning", "ambition", "aspiration", "aspirations"]),
    ("relationships", &["relationship", "relationships", "friend", "friends", "family", "partner", "connection"]),
    ("work", &["work", "career", "job", "professional", "project", "deadline", "deadlines"]),
    ("stress", &["stress", "stressed", "anxiety", "anxious", "overwhelmed", "pressure"]),
    ("gratitude", &["grateful", "gratitude", "thankful", "appreciation", "appreciate"]),
    ("health", &["health", "sleep", "exercise", "wellbeing", "rest", "energy"]),
    ("self-awareness", &["awareness", "mindful", "mindfulness"]),
];

/// Theme reported when a remote insight mentions nothing in the vocabulary.
pub const DEFAULT_THEME: &str = "reflection";

/// Lowercase word tokens. Apostrophes stay inside words ("didn't").
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Whitespace-delimited word count, as reported in metadata.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of tokens found in the positive and negative word sets.
///
/// Every occurrence counts, so repeating a word strengthens its side.
pub fn keyword_counts(text: &str) -> (usize, usize) {
    tokenize(text).fold((0, 0), |(pos, neg), token| {
        if POSITIVE_WORDS.contains(&token.as_str()) {
            (pos + 1, neg)
        } else if NEGATIVE_WORDS.contains(&token.as_str()) {
            (pos, neg + 1)
        } else {
            (pos, neg)
        }
    })
}

/// Majority label from a pair of counts. Ties, including 0/0, are neutral.
pub fn polarity(positive: usize, negative: usize) -> Sentiment {
    use std::cmp::Ordering;
    match positive.cmp(&negative) {
        Ordering::Greater => Sentiment::Positive,
        Ordering::Less => Sentiment::Negative,
        Ordering::Equal => Sentiment::Neutral,
    }
}

/// Polarity of a model's free-text sentiment analysis.
///
/// Explicit labels ("positive", "negative") count alongside the keyword sets.
pub fn sentiment_of(generated: &str) -> Sentiment {
    let (mut pos, mut neg) = keyword_counts(generated);
    for token in tokenize(generated) {
        match token.as_str() {
            "positive" | "optimistic" | "hopeful" => pos += 1,
            "negative" | "pessimistic" | "distressed" => neg += 1,
            _ => {}
        }
    }
    polarity(pos, neg)
}

/// Themes from [`THEME_VOCABULARY`] mentioned in `generated`, in vocabulary
/// order. Falls back to [`DEFAULT_THEME`] when nothing matches.
pub fn themes_in(generated: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(generated).collect();
    let mut themes: Vec<String> = THEME_VOCABULARY
        .iter()
        .filter(|(_, triggers)| tokens.iter().any(|t| triggers.contains(&t.as_str())))
        .map(|(theme, _)| (*theme).to_string())
        .collect();
    if themes.is_empty() {
        themes.push(DEFAULT_THEME.to_string());
    }
    themes
}
