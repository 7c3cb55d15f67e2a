//! Model primitives backed by an Ollama server

use async_trait::async_trait;
use docpipe_common::{DocpipeError, Result};
use tracing::{debug, warn};

use crate::client::OllamaClient;
use crate::llm_trait::{QuestionAnswerer, SummarizationPrimitive};
use crate::prompts::{qa_prompt, summary_prompt};
use crate::types::{Answer, GenerateOptions, GenerateRequest, QaModelOutput};

/// Summarization primitive: one bounded generate call
#[derive(Debug, Clone)]
pub struct OllamaSummarizer {
    client: OllamaClient,
    model: String,
}

impl OllamaSummarizer {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SummarizationPrimitive for OllamaSummarizer {
    async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: summary_prompt(text, max_length, min_length),
            stream: Some(false),
            format: None,
            options: Some(GenerateOptions {
                temperature: Some(0.3),
                top_p: Some(0.9),
                num_predict: Some(i32::try_from(max_length).unwrap_or(i32::MAX)),
            }),
        };

        let response = self.client.generate(request).await?;
        Ok(response.trim().to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Extractive QA primitive: asks for a JSON answer and maps it back onto the context
#[derive(Debug, Clone)]
pub struct OllamaQuestionAnswerer {
    client: OllamaClient,
    model: String,
}

impl OllamaQuestionAnswerer {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl QuestionAnswerer for OllamaQuestionAnswerer {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: qa_prompt(question, context),
            stream: Some(false),
            format: Some("json".to_string()),
            options: Some(GenerateOptions {
                temperature: Some(0.0),
                top_p: None,
                num_predict: Some(256),
            }),
        };

        let raw = self.client.generate(request).await?;
        parse_answer(&raw, context)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Turn the model's JSON reply into an extractive answer over `context`
pub(crate) fn parse_answer(raw: &str, context: &str) -> Result<Answer> {
    let output: QaModelOutput = serde_json::from_str(raw.trim())
        .map_err(|e| DocpipeError::extraction(format!("Malformed QA response: {}", e)))?;

    let answer = output.answer.trim();
    if answer.is_empty() {
        return Ok(Answer::empty());
    }

    let Some((start, end)) = locate_span(context, answer) else {
        warn!("QA answer is not a span of the context, discarding: {:?}", answer);
        return Ok(Answer::empty());
    };

    let score = if output.score.is_finite() {
        output.score.clamp(0.0, 1.0)
    } else {
        0.0
    };

    debug!("QA answer located at {}..{} (score {:.3})", start, end, score);
    Ok(Answer {
        answer: context[start..end].to_string(),
        score,
        start: Some(start),
        end: Some(end),
    })
}

/// Byte range of `needle` in `haystack`; exact match first, then ASCII case-insensitive
pub(crate) fn locate_span(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if let Some(start) = haystack.find(needle) {
        return Some((start, start + needle.len()));
    }

    haystack.char_indices().find_map(|(start, _)| {
        let end = start + needle.len();
        haystack
            .get(start..end)
            .filter(|candidate| candidate.eq_ignore_ascii_case(needle))
            .map(|_| (start, end))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "The meeting is on Tuesday. Alice chairs the Budget Committee.";

    #[test]
    fn test_locate_exact_span() {
        assert_eq!(locate_span(CONTEXT, "Tuesday"), Some((18, 25)));
    }

    #[test]
    fn test_locate_case_insensitive_span() {
        let (start, end) = locate_span(CONTEXT, "budget committee").unwrap();
        assert_eq!(&CONTEXT[start..end], "Budget Committee");
    }

    #[test]
    fn test_locate_missing_span() {
        assert_eq!(locate_span(CONTEXT, "Wednesday"), None);
    }

    #[test]
    fn test_locate_span_respects_char_boundaries() {
        let context = "café au lait";
        assert_eq!(locate_span(context, "AU LAIT"), Some((6, 13)));
    }

    #[test]
    fn test_parse_answer_uses_context_text() {
        let answer = parse_answer(r#"{"answer": "budget committee", "score": 0.8}"#, CONTEXT).unwrap();
        assert_eq!(answer.answer, "Budget Committee");
        assert!((answer.score - 0.8).abs() < f32::EPSILON);
        assert_eq!(answer.start, Some(44));
        assert_eq!(answer.end, Some(60));
    }

    #[test]
    fn test_parse_answer_not_in_context() {
        let answer = parse_answer(r#"{"answer": "Bob", "score": 0.9}"#, CONTEXT).unwrap();
        assert_eq!(answer, Answer::empty());
    }

    #[test]
    fn test_parse_answer_clamps_score() {
        let answer = parse_answer(r#"{"answer": "Alice", "score": 7}"#, CONTEXT).unwrap();
        assert_eq!(answer.score, 1.0);
    }

    #[test]
    fn test_parse_answer_malformed() {
        let err = parse_answer("Alice, probably", CONTEXT).unwrap_err();
        assert!(matches!(err, DocpipeError::Extraction(_)));
    }
}
