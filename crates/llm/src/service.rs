use docpipe_common::{AppConfig, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::client::OllamaClient;
use crate::extract::{ExtractedAnswer, ExtractiveReader};
use crate::finetune::ModelFineTuner;
use crate::llm_trait::{BackendProbe, FineTuner, QuestionAnswerer, SummarizationPrimitive};
use crate::primitives::{OllamaQuestionAnswerer, OllamaSummarizer};
use crate::summarize::{ChunkedSummarizer, ChunkingPolicy};
use crate::types::{FineTuneReport, TrainingExample};

/// Configured model identifiers
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelIds {
    pub summarization: String,
    pub question_answering: String,
}

/// Owns every model collaborator; shared by request handlers behind `Arc`
#[derive(Clone)]
pub struct ModelService {
    summarizer: ChunkedSummarizer,
    reader: ExtractiveReader,
    fine_tuner: Arc<dyn FineTuner>,
    backend: Arc<dyn BackendProbe>,
}

impl ModelService {
    pub fn new(
        summarizer: ChunkedSummarizer,
        reader: ExtractiveReader,
        fine_tuner: Arc<dyn FineTuner>,
        backend: Arc<dyn BackendProbe>,
    ) -> Self {
        Self {
            summarizer,
            reader,
            fine_tuner,
            backend,
        }
    }

    /// Build the Ollama-backed service and probe the backend once
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let client = OllamaClient::new(
            &config.ollama_base_url,
            Duration::from_secs(config.request_timeout_secs),
            config.max_retries,
        )?;

        let primitive: Arc<dyn SummarizationPrimitive> =
            Arc::new(OllamaSummarizer::new(client.clone(), &config.summarization_model));
        let qa: Arc<dyn QuestionAnswerer> =
            Arc::new(OllamaQuestionAnswerer::new(client.clone(), &config.qa_model));
        let fine_tuner = Arc::new(ModelFineTuner::new(
            client.clone(),
            &config.summarization_model,
            &config.fine_tune_model_prefix,
        ));

        let service = Self::new(
            ChunkedSummarizer::new(primitive, ChunkingPolicy::from_config(config)),
            ExtractiveReader::new(qa, config.qa_context_words),
            fine_tuner,
            Arc::new(client),
        );

        if service.backend.is_reachable().await {
            info!("Model server reachable at {}", service.backend.base_url());
        } else {
            warn!(
                "Model server at {} is not reachable yet; requests will fail until it is",
                service.backend.base_url()
            );
        }

        Ok(service)
    }

    pub fn models(&self) -> ModelIds {
        ModelIds {
            summarization: self.summarizer.model().to_string(),
            question_answering: self.reader.model().to_string(),
        }
    }

    pub fn backend_url(&self) -> &str {
        self.backend.base_url()
    }

    pub async fn backend_reachable(&self) -> bool {
        self.backend.is_reachable().await
    }

    pub async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String> {
        self.summarizer.summarize(text, max_length, min_length).await
    }

    pub async fn extract(&self, questions: &[String], context: &str) -> Result<Vec<ExtractedAnswer>> {
        self.reader.extract(questions, context).await
    }

    pub async fn fine_tune(
        &self,
        examples: &[TrainingExample],
        output_dir: &Path,
        base_model: Option<&str>,
    ) -> Result<FineTuneReport> {
        self.fine_tuner.fine_tune(examples, output_dir, base_model).await
    }
}
