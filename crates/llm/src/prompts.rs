//! Prompt templates for summarization and extractive QA

/// System prompt attached to models derived by the fine-tune trigger
pub const SUMMARY_SYSTEM_PROMPT: &str = r#"You are a precise summarizer.
Write a faithful, self-contained summary of the text you are given.
Use only facts stated in the text. Do not add opinions, headings or preamble."#;

/// Prompt for a bounded summary
pub fn summary_prompt(text: &str, max_length: usize, min_length: usize) -> String {
    format!(
        "{}\n\nSummarize the text below in at least {} and at most {} tokens. Reply with the summary only.\n---\n{}\n---",
        SUMMARY_SYSTEM_PROMPT, min_length, max_length, text
    )
}

/// User turn for a few-shot training example
pub fn example_prompt(text: &str) -> String {
    format!("Summarize the text below.\n---\n{}\n---", text)
}

/// Prompt for extractive QA; the model must copy the answer from the context
pub fn qa_prompt(question: &str, context: &str) -> String {
    format!(
        r#"Answer the question using a span copied verbatim from the context.
Respond with a JSON object {{"answer": string, "score": number}} where score is your confidence between 0 and 1.
If the context does not contain the answer, respond with {{"answer": "", "score": 0}}.

Context:
---
{}
---

Question: {}"#,
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_states_bounds() {
        let prompt = summary_prompt("body", 150, 30);
        assert!(prompt.contains("at least 30 and at most 150 tokens"));
        assert!(prompt.ends_with("---\nbody\n---"));
    }

    #[test]
    fn test_qa_prompt_embeds_question_and_context() {
        let prompt = qa_prompt("Who?", "Alice did it.");
        assert!(prompt.contains("Question: Who?"));
        assert!(prompt.contains("Alice did it."));
        assert!(prompt.contains(r#"{"answer": string, "score": number}"#));
    }
}
