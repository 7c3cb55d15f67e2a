//! In-memory collaborators for handler tests

use async_trait::async_trait;
use docpipe_common::{AppConfig, DocpipeError, Result};
use docpipe_llm::{
    Answer, BackendProbe, ChunkedSummarizer, ChunkingPolicy, ExtractiveReader, FineTuneReport,
    FineTuner, ModelService, QuestionAnswerer, SummarizationPrimitive, TrainingExample,
};
use std::path::Path;
use std::sync::Arc;

use crate::state::AppState;

/// Returns the first five words of its input, or fails
pub struct StubSummarizer {
    pub fail: bool,
}

#[async_trait]
impl SummarizationPrimitive for StubSummarizer {
    async fn summarize(&self, text: &str, _max_length: usize, _min_length: usize) -> Result<String> {
        if self.fail {
            return Err(DocpipeError::backend("model offline"));
        }
        Ok(text.split_whitespace().take(5).collect::<Vec<_>>().join(" "))
    }

    fn model(&self) -> &str {
        "stub-summarizer"
    }
}

/// Answers with the first word of the context
pub struct StubAnswerer;

#[async_trait]
impl QuestionAnswerer for StubAnswerer {
    async fn answer(&self, _question: &str, context: &str) -> Result<Answer> {
        let word = context.split_whitespace().next().unwrap_or_default();
        let start = context.find(word).unwrap_or(0);
        Ok(Answer {
            answer: word.to_string(),
            score: 0.5,
            start: Some(start),
            end: Some(start + word.len()),
        })
    }

    fn model(&self) -> &str {
        "stub-qa"
    }
}

/// Records nothing on disk; succeeds unless `fail` is set
pub struct StubFineTuner {
    pub fail: bool,
}

#[async_trait]
impl FineTuner for StubFineTuner {
    async fn fine_tune(
        &self,
        examples: &[TrainingExample],
        output_dir: &Path,
        _base_model: Option<&str>,
    ) -> Result<FineTuneReport> {
        if self.fail {
            return Err(DocpipeError::fine_tune("trainer crashed"));
        }
        Ok(FineTuneReport {
            model_name: "docpipe-test".to_string(),
            output_dir: output_dir.to_path_buf(),
            example_count: examples.len(),
        })
    }
}

pub struct StubBackend {
    pub reachable: bool,
}

#[async_trait]
impl BackendProbe for StubBackend {
    fn base_url(&self) -> &str {
        "http://stub:11434"
    }

    async fn is_reachable(&self) -> bool {
        self.reachable
    }
}

#[derive(Default)]
pub struct StubOptions {
    pub summarizer_fails: bool,
    pub fine_tune_fails: bool,
    pub backend_down: bool,
}

pub fn test_state(options: StubOptions) -> Arc<AppState> {
    let service = ModelService::new(
        ChunkedSummarizer::new(
            Arc::new(StubSummarizer {
                fail: options.summarizer_fails,
            }),
            ChunkingPolicy::default(),
        ),
        ExtractiveReader::new(Arc::new(StubAnswerer), 400),
        Arc::new(StubFineTuner {
            fail: options.fine_tune_fails,
        }),
        Arc::new(StubBackend {
            reachable: !options.backend_down,
        }),
    );

    Arc::new(AppState::new(AppConfig::default(), service))
}
