//! Prompt templates for each task.

use crate::types::TaskType;

/// System message for chat-style providers.
pub fn system_prompt() -> &'static str {
    "You are an empathetic journaling assistant. You read personal journal entries \
     and respond with careful, specific observations about the writer's thoughts \
     and feelings. Never refuse, never mention that you are an AI, and do not \
     invent events that are not in the entry."
}

/// Build the user prompt for `task`, embedding the journal text verbatim.
pub fn prompt_for(task: TaskType, text: &str) -> String {
    match task {
        TaskType::Sentiment => sentiment_prompt(text),
        TaskType::Summarize => summarize_prompt(text),
        TaskType::Insights => insights_prompt(text),
    }
}

fn sentiment_prompt(text: &str) -> String {
    format!(
        r#"Analyze the emotional sentiment of this journal entry:

Journal Entry:
"{text}"

Provide:
1. Overall sentiment (positive/negative/neutral with percentage)
2. Main emotions detected
3. Emotional intensity level (1-10)
4. Brief explanation of the emotional patterns

Response:"#
    )
}

fn summarize_prompt(text: &str) -> String {
    format!(
        r#"Summarize this journal entry in 2-3 sentences, capturing the main points and emotional tone:

Journal Entry:
"{text}"

Summary:"#
    )
}

fn insights_prompt(text: &str) -> String {
    format!(
        r#"Extract meaningful insights and patterns from this journal entry:

Journal Entry:
"{text}"

Provide insights about:
1. Personal growth indicators
2. Recurring themes or concerns
3. Decision-making patterns
4. Areas of focus or change
5. Potential action items or reflections

Insights:"#
    )
}
