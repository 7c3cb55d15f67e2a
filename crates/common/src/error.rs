/// docpipe error types
#[derive(Debug, thiserror::Error)]
pub enum DocpipeError {
    /// Sentence segmentation could not process the input
    #[error("Segmentation error: {0}")]
    Segmentation(String),

    /// Summarization primitive failed (chunk or final pass)
    #[error("Summarization error: {0}")]
    Summarization(String),

    /// Extractive QA primitive failed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Fine-tuning trigger failed
    #[error("Fine-tune error: {0}")]
    FineTune(String),

    /// Model server transport error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocpipeError {
    /// Create segmentation error
    pub fn segmentation<S: Into<String>>(msg: S) -> Self {
        Self::Segmentation(msg.into())
    }

    /// Create summarization error
    pub fn summarization<S: Into<String>>(msg: S) -> Self {
        Self::Summarization(msg.into())
    }

    /// Create extraction error
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create fine-tune error
    pub fn fine_tune<S: Into<String>>(msg: S) -> Self {
        Self::FineTune(msg.into())
    }

    /// Create backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Short machine-readable kind, used in HTTP error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Segmentation(_) => "segmentation_failure",
            Self::Summarization(_) => "summarization_failure",
            Self::Extraction(_) => "extraction_failure",
            Self::FineTune(_) => "fine_tune_failure",
            Self::Backend(_) => "backend_unavailable",
            Self::Config(_) => "config_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::Io(_) => "internal_error",
            Self::Json(_) => "invalid_json",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Segmentation(_) => 500,
            Self::Summarization(_) => 502,
            Self::Extraction(_) => 502,
            Self::FineTune(_) => 500,
            Self::Backend(_) => 503,
            Self::Config(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DocpipeError::invalid_input("empty").status_code(), 400);
        assert_eq!(DocpipeError::summarization("chunk 2/3").status_code(), 502);
        assert_eq!(DocpipeError::backend("down").status_code(), 503);
        assert_eq!(DocpipeError::not_found("task").status_code(), 404);
    }

    #[test]
    fn test_display_keeps_context() {
        let err = DocpipeError::summarization("chunk 2/3: timeout");
        assert_eq!(err.to_string(), "Summarization error: chunk 2/3: timeout");
        assert_eq!(err.kind(), "summarization_failure");
    }

    #[test]
    fn test_from_conversions() {
        let io: DocpipeError = std::io::Error::new(std::io::ErrorKind::NotFound, "train.jsonl").into();
        assert_eq!(io.kind(), "internal_error");
        assert_eq!(io.status_code(), 500);

        let json: DocpipeError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(json.kind(), "invalid_json");
        assert_eq!(json.status_code(), 400);
    }
}
