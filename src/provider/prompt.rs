//! Prompt assembly shared by the two LLM tiers.

use crate::summarizer::SummaryLength;

/// System message establishing the assistant's role for chat-style APIs.
pub(crate) const SYSTEM_MESSAGE: &str = "You are a professional document summarization assistant. Provide clear, accurate, and well-structured summaries.";

/// Build the user-facing prompt for abstractive summarization.
///
/// Both the cloud and local tiers feed the same prompt so that falling back
/// changes the model, not the task.
pub(crate) fn build_summary_prompt(text: &str, length: SummaryLength) -> String {
    let mut prompt = String::new();
    prompt.push_str("Please analyze and summarize the following document. ");
    prompt.push_str(length.instruction());
    prompt.push_str("\n\nFocus on:\n");
    prompt.push_str("- Main topics and themes\n");
    prompt.push_str("- Key findings or conclusions\n");
    prompt.push_str("- Important details and data\n");
    prompt.push_str("- Overall purpose and context\n");
    prompt.push_str("\nDocument Text:\n");
    prompt.push_str(text);
    prompt.push_str("\n\nPlease provide a clear, well-structured summary:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_document_and_instruction() {
        let prompt = build_summary_prompt("Quarterly revenue rose.", SummaryLength::Short);
        assert!(prompt.contains("Quarterly revenue rose."));
        assert!(prompt.contains(SummaryLength::Short.instruction()));
    }

    #[test]
    fn prompt_varies_with_length() {
        let short = build_summary_prompt("Text.", SummaryLength::Short);
        let long = build_summary_prompt("Text.", SummaryLength::Long);
        assert_ne!(short, long);
    }
}
