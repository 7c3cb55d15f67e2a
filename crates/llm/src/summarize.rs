use docpipe_common::{AppConfig, DocpipeError, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::chunking::{pack_sentences, word_count, TextChunk, UnicodeSentenceSegmenter};
use crate::llm_trait::{SentenceSegmenter, SummarizationPrimitive};

/// Thresholds driving the chunk/recombine loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingPolicy {
    /// Documents above this word count are chunked; also the chunk size limit
    pub chunk_words: usize,

    /// Combined chunk summaries above this word count are summarized again
    pub second_pass_words: usize,

    /// Lower bound on the per-chunk `max_length`
    pub chunk_max_floor: usize,

    /// Upper bound on the per-chunk `min_length`
    pub chunk_min_cap: usize,
}

impl Default for ChunkingPolicy {
    fn default() -> Self {
        Self {
            chunk_words: 1000,
            second_pass_words: 500,
            chunk_max_floor: 30,
            chunk_min_cap: 15,
        }
    }
}

impl ChunkingPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            chunk_words: config.chunk_word_threshold,
            second_pass_words: config.second_pass_word_threshold,
            ..Self::default()
        }
    }

    /// Bounds for each chunk when the document is split into `chunk_count` chunks
    pub fn chunk_bounds(&self, max_length: usize, min_length: usize, chunk_count: usize) -> (usize, usize) {
        let n = chunk_count.max(1);
        (
            (max_length / n).max(self.chunk_max_floor),
            (min_length / n).min(self.chunk_min_cap),
        )
    }
}

/// Summarizer for documents of unbounded length
///
/// Short documents go straight to the primitive. Long ones are split into
/// sentence-aligned chunks, each chunk is summarized, and the joined result is
/// summarized once more if it is still long.
#[derive(Clone)]
pub struct ChunkedSummarizer {
    primitive: Arc<dyn SummarizationPrimitive>,
    segmenter: Arc<dyn SentenceSegmenter>,
    policy: ChunkingPolicy,
}

impl ChunkedSummarizer {
    /// Create summarizer with the Unicode sentence segmenter
    pub fn new(primitive: Arc<dyn SummarizationPrimitive>, policy: ChunkingPolicy) -> Self {
        Self::with_segmenter(primitive, Arc::new(UnicodeSentenceSegmenter), policy)
    }

    pub fn with_segmenter(
        primitive: Arc<dyn SummarizationPrimitive>,
        segmenter: Arc<dyn SentenceSegmenter>,
        policy: ChunkingPolicy,
    ) -> Self {
        Self {
            primitive,
            segmenter,
            policy,
        }
    }

    /// Model identifier of the underlying primitive
    pub fn model(&self) -> &str {
        self.primitive.model()
    }

    /// Split `text` into sentence-aligned chunks of at most `chunk_words` words
    pub fn plan_chunks(&self, text: &str) -> Result<Vec<TextChunk>> {
        let sentences = self.segmenter.segment(text)?;
        Ok(pack_sentences(sentences, self.policy.chunk_words))
    }

    /// Summarize `text` within `[min_length, max_length]` model tokens
    pub async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String> {
        if text.trim().is_empty() {
            return Err(DocpipeError::invalid_input("text cannot be empty"));
        }
        if max_length < min_length {
            return Err(DocpipeError::invalid_input(format!(
                "max_length ({}) must be >= min_length ({})",
                max_length, min_length
            )));
        }

        let words = word_count(text);
        info!("Starting summarization - Text length: {} words", words);

        if words <= self.policy.chunk_words {
            debug!("Text is short, using direct summarization");
            return self
                .primitive
                .summarize(text, max_length, min_length)
                .await
                .map_err(|e| summarization_failure("direct pass", e));
        }

        let chunks = self.plan_chunks(text)?;
        let chunk_count = chunks.len();
        let (chunk_max, chunk_min) = self.policy.chunk_bounds(max_length, min_length, chunk_count);
        info!(
            "Split text into {} chunks (per-chunk bounds: max={}, min={})",
            chunk_count, chunk_max, chunk_min
        );

        let mut chunk_summaries = Vec::with_capacity(chunk_count);
        for (i, chunk) in chunks.iter().enumerate() {
            debug!(
                "Summarizing chunk {}/{} ({} words)",
                i + 1,
                chunk_count,
                chunk.word_count
            );
            let summary = self
                .primitive
                .summarize(&chunk.text(), chunk_max, chunk_min)
                .await
                .map_err(|e| summarization_failure(&format!("chunk {}/{}", i + 1, chunk_count), e))?;
            chunk_summaries.push(summary);
        }

        let combined = chunk_summaries.join(" ");
        let combined_words = word_count(&combined);
        info!("Combined chunk summaries - Length: {} words", combined_words);

        if combined_words > self.policy.second_pass_words {
            debug!("Combined summary is long, running final pass");
            return self
                .primitive
                .summarize(&combined, max_length, min_length)
                .await
                .map_err(|e| summarization_failure("final pass", e));
        }

        Ok(combined)
    }
}

/// Every primitive error is a summarization failure; caller input is checked up front
fn summarization_failure(stage: &str, error: DocpipeError) -> DocpipeError {
    DocpipeError::summarization(format!("{}: {}", stage, error))
}
