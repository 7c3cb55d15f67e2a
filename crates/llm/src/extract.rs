use docpipe_common::{DocpipeError, Result};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::chunking::{pack_sentences, UnicodeSentenceSegmenter};
use crate::llm_trait::{QuestionAnswerer, SentenceSegmenter};
use crate::types::Answer;

/// Answer to one question, spans relative to the full context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedAnswer {
    pub question: String,

    #[serde(flatten)]
    pub answer: Answer,
}

/// Runs extractive QA over contexts longer than the model window
///
/// The context is cut into sentence-aligned windows, every window is asked,
/// and the highest-scoring span wins (earliest window on ties).
#[derive(Clone)]
pub struct ExtractiveReader {
    qa: Arc<dyn QuestionAnswerer>,
    segmenter: Arc<dyn SentenceSegmenter>,
    window_words: usize,
}

impl ExtractiveReader {
    pub fn new(qa: Arc<dyn QuestionAnswerer>, window_words: usize) -> Self {
        Self {
            qa,
            segmenter: Arc::new(UnicodeSentenceSegmenter),
            window_words,
        }
    }

    pub fn model(&self) -> &str {
        self.qa.model()
    }

    /// Byte ranges of the context windows
    pub fn windows(&self, context: &str) -> Result<Vec<(usize, usize)>> {
        let sentences = self.segmenter.segment(context)?;

        let mut spans = Vec::with_capacity(sentences.len());
        let mut cursor = 0;
        for sentence in &sentences {
            let start = context[cursor..]
                .find(sentence.as_str())
                .map(|offset| cursor + offset)
                .ok_or_else(|| {
                    DocpipeError::segmentation("segmenter produced text that is not in the context")
                })?;
            cursor = start + sentence.len();
            spans.push((start, cursor));
        }

        let mut windows = Vec::new();
        let mut first = 0;
        for chunk in pack_sentences(sentences, self.window_words) {
            let last = first + chunk.sentences.len() - 1;
            windows.push((spans[first].0, spans[last].1));
            first = last + 1;
        }

        Ok(windows)
    }

    /// Answer a single question against `context`
    pub async fn answer(&self, question: &str, context: &str) -> Result<Answer> {
        if question.trim().is_empty() {
            return Err(DocpipeError::invalid_input("question cannot be empty"));
        }
        if context.trim().is_empty() {
            return Err(DocpipeError::invalid_input("context cannot be empty"));
        }

        let windows = self.windows(context)?;
        let mut best = Answer::empty();

        for (i, &(start, end)) in windows.iter().enumerate() {
            debug!("Asking window {}/{} for {:?}", i + 1, windows.len(), question);
            let candidate = self
                .qa
                .answer(question, &context[start..end])
                .await
                .map_err(|e| DocpipeError::extraction(format!("question {:?}: {}", question, e)))?;

            if !candidate.answer.is_empty() && candidate.score > best.score {
                best = candidate.offset_by(start);
            } else if best.answer.is_empty() && !candidate.answer.is_empty() {
                // zero-score answers still beat no answer
                best = candidate.offset_by(start);
            }
        }

        Ok(best)
    }

    /// Answer every question; results keep the question order
    pub async fn extract(&self, questions: &[String], context: &str) -> Result<Vec<ExtractedAnswer>> {
        info!("Extracting {} answers", questions.len());

        try_join_all(questions.iter().map(|question| async move {
            let answer = self.answer(question, context).await?;
            Ok::<_, DocpipeError>(ExtractedAnswer {
                question: question.clone(),
                answer,
            })
        }))
        .await
    }
}
