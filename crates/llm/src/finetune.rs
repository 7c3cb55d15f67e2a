use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docpipe_common::{DocpipeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::client::OllamaClient;
use crate::llm_trait::FineTuner;
use crate::prompts::{example_prompt, SUMMARY_SYSTEM_PROMPT};
use crate::types::{ChatMessage, CreateModelRequest, FineTuneReport, TrainingExample};

pub const TRAINING_SET_FILE: &str = "train.jsonl";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Written next to the training set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingManifest {
    pub base_model: String,
    pub model_name: String,
    pub example_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Fine-tune trigger that derives a model on the Ollama server
///
/// The examples are stored under the output directory and registered as
/// few-shot messages of a model derived from the base model.
#[derive(Debug, Clone)]
pub struct ModelFineTuner {
    client: OllamaClient,
    base_model: String,
    model_prefix: String,
}

impl ModelFineTuner {
    pub fn new(client: OllamaClient, base_model: impl Into<String>, model_prefix: impl Into<String>) -> Self {
        Self {
            client,
            base_model: base_model.into(),
            model_prefix: model_prefix.into(),
        }
    }
}

#[async_trait]
impl FineTuner for ModelFineTuner {
    async fn fine_tune(
        &self,
        examples: &[TrainingExample],
        output_dir: &Path,
        base_model: Option<&str>,
    ) -> Result<FineTuneReport> {
        validate_examples(examples)?;

        let base_model = base_model.unwrap_or(&self.base_model);
        let model_name = derive_model_name(&self.model_prefix, output_dir)?;

        let manifest = write_training_set(examples, output_dir, base_model, &model_name).await?;

        let messages = examples
            .iter()
            .flat_map(|example| {
                [
                    ChatMessage {
                        role: "user".to_string(),
                        content: example_prompt(&example.text),
                    },
                    ChatMessage {
                        role: "assistant".to_string(),
                        content: example.summary.trim().to_string(),
                    },
                ]
            })
            .collect();

        let request = CreateModelRequest {
            model: model_name.clone(),
            from: base_model.to_string(),
            system: Some(SUMMARY_SYSTEM_PROMPT.to_string()),
            messages,
            stream: false,
        };

        self.client
            .create_model(&request)
            .await
            .map_err(|e| DocpipeError::fine_tune(format!("{}: {}", model_name, e)))?;

        info!(
            "Fine-tune finished: {} ({} examples) in {}",
            model_name,
            manifest.example_count,
            output_dir.display()
        );

        Ok(FineTuneReport {
            model_name,
            output_dir: output_dir.to_path_buf(),
            example_count: manifest.example_count,
        })
    }
}

/// Reject empty collections and blank examples
pub fn validate_examples(examples: &[TrainingExample]) -> Result<()> {
    if examples.is_empty() {
        return Err(DocpipeError::invalid_input("at least one training example is required"));
    }

    for (i, example) in examples.iter().enumerate() {
        if example.text.trim().is_empty() || example.summary.trim().is_empty() {
            return Err(DocpipeError::invalid_input(format!(
                "training example {} has an empty text or summary",
                i
            )));
        }
    }

    Ok(())
}

/// `<prefix>-<last path component>`, lowercased, restricted to `[a-z0-9._-]`
pub fn derive_model_name(prefix: &str, output_dir: &Path) -> Result<String> {
    let dir_name = output_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            DocpipeError::invalid_input(format!(
                "cannot derive a model name from {}",
                output_dir.display()
            ))
        })?;

    let sanitized: String = dir_name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let sanitized = sanitized.trim_matches('-');
    if sanitized.is_empty() {
        return Err(DocpipeError::invalid_input(format!(
            "cannot derive a model name from {}",
            output_dir.display()
        )));
    }

    Ok(format!("{}-{}", prefix, sanitized))
}

/// Write `train.jsonl` and `manifest.json` into `output_dir`
pub async fn write_training_set(
    examples: &[TrainingExample],
    output_dir: &Path,
    base_model: &str,
    model_name: &str,
) -> Result<TrainingManifest> {
    tokio::fs::create_dir_all(output_dir).await?;

    let mut lines = String::new();
    for example in examples {
        lines.push_str(&serde_json::to_string(example)?);
        lines.push('\n');
    }
    tokio::fs::write(output_dir.join(TRAINING_SET_FILE), lines).await?;

    let manifest = TrainingManifest {
        base_model: base_model.to_string(),
        model_name: model_name.to_string(),
        example_count: examples.len(),
        created_at: Utc::now(),
    };
    tokio::fs::write(
        output_dir.join(MANIFEST_FILE),
        serde_json::to_string_pretty(&manifest)?,
    )
    .await?;

    Ok(manifest)
}
