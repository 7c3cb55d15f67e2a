//! docpipe model integration
//!
//! Collaborator traits, Ollama-backed primitives, the chunked long-document
//! summarizer, extractive QA and the fine-tune trigger

mod chunking;
mod client;
mod extract;
mod finetune;
mod llm_trait;
mod primitives;
mod prompts;
mod service;
mod summarize;
mod types;

pub use chunking::{pack_sentences, word_count, TextChunk, UnicodeSentenceSegmenter};
pub use client::OllamaClient;
pub use extract::{ExtractedAnswer, ExtractiveReader};
pub use finetune::{
    derive_model_name, validate_examples, write_training_set, ModelFineTuner, TrainingManifest,
    MANIFEST_FILE, TRAINING_SET_FILE,
};
pub use llm_trait::{BackendProbe, FineTuner, QuestionAnswerer, SentenceSegmenter, SummarizationPrimitive};
pub use primitives::{OllamaQuestionAnswerer, OllamaSummarizer};
pub use service::{ModelIds, ModelService};
pub use summarize::{ChunkedSummarizer, ChunkingPolicy};
pub use types::{Answer, FineTuneReport, TrainingExample};
