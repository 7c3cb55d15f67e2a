use async_trait::async_trait;
use docpipe_common::Result;
use std::path::Path;

use crate::types::{Answer, FineTuneReport, TrainingExample};

/// Splits text into an ordered sequence of sentences
pub trait SentenceSegmenter: Send + Sync {
    /// Segment non-empty text; the result preserves document order
    fn segment(&self, text: &str) -> Result<Vec<String>>;
}

/// Black-box text-to-summary function with approximate length bounds
///
/// Bounds are in the model's token units. Keeping the input within the
/// model's context window is the caller's job.
#[async_trait]
pub trait SummarizationPrimitive: Send + Sync {
    async fn summarize(&self, text: &str, max_length: usize, min_length: usize) -> Result<String>;

    /// Identifier of the model behind this primitive
    fn model(&self) -> &str;
}

/// Extractive question answering over a context passage
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer>;

    fn model(&self) -> &str;
}

/// Fine-tuning trigger
#[async_trait]
pub trait FineTuner: Send + Sync {
    /// Train (or derive) a model from `examples` and store it at `output_dir`
    async fn fine_tune(
        &self,
        examples: &[TrainingExample],
        output_dir: &Path,
        base_model: Option<&str>,
    ) -> Result<FineTuneReport>;
}

/// Model server reachability, reported by the health surface
#[async_trait]
pub trait BackendProbe: Send + Sync {
    fn base_url(&self) -> &str;

    async fn is_reachable(&self) -> bool;
}
