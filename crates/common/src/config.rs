use crate::error::DocpipeError;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// docpipe application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Summarization model name
    pub summarization_model: String,

    /// Extractive QA model name
    pub qa_model: String,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Root under which fine-tune output directories are created
    pub fine_tune_root: PathBuf,

    /// Name prefix for models registered by the fine-tune trigger
    pub fine_tune_model_prefix: String,

    /// Documents above this word count are chunked
    pub chunk_word_threshold: usize,

    /// Combined chunk summaries above this word count get a second pass
    pub second_pass_word_threshold: usize,

    /// Context window (in words) for extractive QA
    pub qa_context_words: usize,

    /// HTTP timeout for model server calls
    pub request_timeout_secs: u64,

    /// Attempts per model server call
    pub max_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: "http://localhost:11434".to_string(),
            summarization_model: "llama3.2:latest".to_string(),
            qa_model: "llama3.2:latest".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./db/log"),
            log_level: "info".to_string(),
            fine_tune_root: PathBuf::from("./db/fine_tuned"),
            fine_tune_model_prefix: "docpipe".to_string(),
            chunk_word_threshold: 1000,
            second_pass_word_threshold: 500,
            qa_context_words: 400,
            request_timeout_secs: 300,
            max_retries: 3,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, DocpipeError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            summarization_model: std::env::var("SUMMARIZATION_MODEL")
                .unwrap_or(defaults.summarization_model),
            qa_model: std::env::var("QA_MODEL").unwrap_or(defaults.qa_model),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT", defaults.server_port)?,
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            fine_tune_root: Self::get_env_path("FINE_TUNE_ROOT")
                .unwrap_or(defaults.fine_tune_root),
            fine_tune_model_prefix: std::env::var("FINE_TUNE_MODEL_PREFIX")
                .unwrap_or(defaults.fine_tune_model_prefix),
            chunk_word_threshold: Self::get_env_parsed(
                "CHUNK_WORD_THRESHOLD",
                defaults.chunk_word_threshold,
            )?,
            second_pass_word_threshold: Self::get_env_parsed(
                "SECOND_PASS_WORD_THRESHOLD",
                defaults.second_pass_word_threshold,
            )?,
            qa_context_words: Self::get_env_parsed("QA_CONTEXT_WORDS", defaults.qa_context_words)?,
            request_timeout_secs: Self::get_env_parsed(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            max_retries: Self::get_env_parsed("MAX_RETRIES", defaults.max_retries)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Parse an environment variable, falling back to `default` when unset
    fn get_env_parsed<T: FromStr>(key: &str, default: T) -> Result<T, DocpipeError> {
        match std::env::var(key) {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                DocpipeError::config(format!("{} has an invalid value: {}", key, raw))
            }),
            Err(_) => Ok(default),
        }
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Resolve a caller-supplied fine-tune output location under `fine_tune_root`.
    ///
    /// Only relative paths made of normal components are accepted.
    pub fn resolve_fine_tune_dir(&self, output_dir: &str) -> Result<PathBuf, DocpipeError> {
        let requested = Path::new(output_dir.trim());
        if requested.as_os_str().is_empty() {
            return Err(DocpipeError::invalid_input("output_dir cannot be empty"));
        }

        if !requested
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(DocpipeError::invalid_input(format!(
                "output_dir must be a relative path without '..': {}",
                output_dir
            )));
        }

        Ok(self.fine_tune_root.join(requested))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DocpipeError> {
        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://") {
            return Err(DocpipeError::config(
                "Ollama base URL must start with http:// or https://"
            ));
        }

        if self.summarization_model.is_empty() || self.qa_model.is_empty() {
            return Err(DocpipeError::config("Model names cannot be empty"));
        }

        if self.server_port == 0 {
            return Err(DocpipeError::config("Server port cannot be 0"));
        }

        if self.chunk_word_threshold == 0
            || self.second_pass_word_threshold == 0
            || self.qa_context_words == 0
        {
            return Err(DocpipeError::config("Word thresholds must be greater than 0"));
        }

        if self.max_retries == 0 {
            return Err(DocpipeError::config("MAX_RETRIES must be at least 1"));
        }

        Ok(())
    }
}
