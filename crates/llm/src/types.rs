use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ollama generate request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name (e.g., "llama3.2", "gemma2")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Disable streaming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Response format ("json" forces a JSON object)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Generation options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

/// Generation options
#[derive(Debug, Clone, Serialize, Default)]
pub struct GenerateOptions {
    /// Temperature (0.0 - 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Top-p sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,
}

/// Ollama generate response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    pub response: String,
}

/// Chat message used as a few-shot example in a model definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Ollama create-model request
#[derive(Debug, Clone, Serialize)]
pub struct CreateModelRequest {
    /// Name of the derived model
    pub model: String,

    /// Base model to derive from
    pub from: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<ChatMessage>,

    pub stream: bool,
}

/// Ollama create-model status line
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModelResponse {
    pub status: String,
}

/// Raw QA output the model is asked to produce
#[derive(Debug, Clone, Deserialize)]
pub struct QaModelOutput {
    #[serde(default)]
    pub answer: String,

    #[serde(default)]
    pub score: f32,
}

/// Extractive answer: a span of the context plus a confidence score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// Answer text, copied from the context
    pub answer: String,

    /// Confidence in [0, 1]
    pub score: f32,

    /// Byte offset of the span start in the context
    pub start: Option<usize>,

    /// Byte offset one past the span end
    pub end: Option<usize>,
}

impl Answer {
    /// Answer used when the context holds nothing relevant
    pub fn empty() -> Self {
        Self {
            answer: String::new(),
            score: 0.0,
            start: None,
            end: None,
        }
    }

    /// Shift span offsets by `offset` bytes
    pub fn offset_by(mut self, offset: usize) -> Self {
        self.start = self.start.map(|s| s + offset);
        self.end = self.end.map(|e| e + offset);
        self
    }
}

/// One supervised example for the fine-tune trigger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingExample {
    /// Source document
    pub text: String,

    /// Reference summary
    pub summary: String,
}

/// Outcome of a successful fine-tune run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FineTuneReport {
    /// Name of the registered model
    pub model_name: String,

    /// Directory holding the training set and manifest
    pub output_dir: PathBuf,

    pub example_count: usize,
}
