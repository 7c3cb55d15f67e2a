use chrono::{DateTime, Utc};
use docpipe_llm::{ExtractedAnswer, ModelIds, TrainingExample};
use serde::{Deserialize, Serialize};

/// Analyze request
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Document text
    pub text: String,

    /// Questions for extractive QA
    #[serde(default)]
    pub questions: Option<Vec<String>>,

    /// Produce a summary
    #[serde(default = "default_generate_summary")]
    pub generate_summary: bool,

    /// Summary upper bound, in model tokens
    #[serde(default = "default_max_summary_length")]
    pub max_summary_length: usize,

    /// Summary lower bound, clamped to `max_summary_length`
    #[serde(default)]
    pub min_summary_length: Option<usize>,
}

fn default_generate_summary() -> bool {
    true
}

fn default_max_summary_length() -> usize {
    150
}

pub const DEFAULT_MIN_SUMMARY_LENGTH: usize = 30;

impl AnalyzeRequest {
    /// `(max, min)` bounds for the summarizer
    pub fn summary_bounds(&self) -> (usize, usize) {
        let max = self.max_summary_length;
        let min = self
            .min_summary_length
            .unwrap_or(DEFAULT_MIN_SUMMARY_LENGTH)
            .min(max);
        (max, min)
    }

    /// Non-empty question list, if any
    pub fn questions(&self) -> Option<&[String]> {
        self.questions
            .as_deref()
            .filter(|questions| !questions.is_empty())
    }
}

/// Analyze response
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_info: Option<Vec<ExtractedAnswer>>,
}

/// Fine-tune request
#[derive(Debug, Clone, Deserialize)]
pub struct FineTuneRequest {
    /// Supervised examples
    pub examples: Vec<TrainingExample>,

    /// Output location, relative to the configured fine-tune root
    pub output_dir: String,

    /// Overrides the configured base model
    #[serde(default)]
    pub base_model: Option<String>,
}

/// Background task started
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStartedResponse {
    pub task_id: String,
    pub message: String,
}

/// Health report
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" or "degraded"
    pub status: String,
    pub models: HealthModels,
    pub backend: BackendStatus,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthModels {
    pub summarization: String,
    pub question_answering: String,
}

impl From<ModelIds> for HealthModels {
    fn from(ids: ModelIds) -> Self {
        Self {
            summarization: ids.summarization,
            question_answering: ids.question_answering,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BackendStatus {
    pub url: String,
    pub reachable: bool,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Task status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TaskStatus {
    Running,
    Completed,
    Failed,
    Cancelled,
}

/// Background task information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    pub task_id: String,

    /// Task type (fine_tune)
    pub task_type: String,

    /// What the task works on (e.g. the output directory)
    pub target: String,

    pub status: TaskStatus,

    /// Progress percentage (0-100)
    pub progress: u8,

    /// Current message
    pub message: String,

    /// Task output once completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    pub started_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Cancel task request
#[derive(Debug, Deserialize)]
pub struct CancelTaskRequest {
    pub task_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_defaults() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"text": "Hello."}"#).unwrap();
        assert!(req.generate_summary);
        assert_eq!(req.summary_bounds(), (150, 30));
        assert!(req.questions().is_none());
    }

    #[test]
    fn test_min_length_clamped_to_max() {
        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"text": "Hello.", "max_summary_length": 20}"#).unwrap();
        assert_eq!(req.summary_bounds(), (20, 20));
    }

    #[test]
    fn test_empty_question_list_is_none() {
        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"text": "Hello.", "questions": []}"#).unwrap();
        assert!(req.questions().is_none());
    }

    #[test]
    fn test_analyze_response_skips_missing_fields() {
        let body = serde_json::to_value(AnalyzeResponse {
            summary: Some("short".to_string()),
            extracted_info: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "summary": "short" }));
    }
}
