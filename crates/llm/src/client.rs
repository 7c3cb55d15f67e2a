use async_trait::async_trait;
use docpipe_common::{DocpipeError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::BackendProbe;
use crate::types::{CreateModelRequest, CreateModelResponse, GenerateRequest, GenerateResponse};

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: Client,
    max_retries: u32,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(base_url: impl Into<String>, timeout: Duration, max_retries: u32) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DocpipeError::backend(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama client initialized: {}", base_url);
        Ok(Self {
            base_url,
            client,
            max_retries: max_retries.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text (non-streaming, with retry)
    pub async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let mut request = request;
        request.stream = Some(false);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            request.model,
            request.prompt.len()
        );

        let (url, request) = (&url, &request);
        let response = self
            .with_retry("generate", || async move {
                let result: GenerateResponse = self.post_json(url, request).await?;
                if result.response.trim().is_empty() {
                    return Err(DocpipeError::backend("Empty response from Ollama"));
                }
                Ok(result.response)
            })
            .await?;

        debug!("Received response from Ollama - Length: {}", response.len());
        Ok(response)
    }

    /// Register a derived model (single attempt; creation is not idempotent)
    pub async fn create_model(&self, request: &CreateModelRequest) -> Result<()> {
        let url = format!("{}/api/create", self.base_url);

        info!(
            "Creating model {} from {} with {} example messages",
            request.model,
            request.from,
            request.messages.len()
        );

        let result: CreateModelResponse = self.post_json(&url, request).await?;
        if result.status != "success" {
            return Err(DocpipeError::backend(format!(
                "Model creation ended with status: {}",
                result.status
            )));
        }

        Ok(())
    }

    /// Test connection to Ollama
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DocpipeError::backend(format!("Failed to connect to Ollama: {}", e)))?;
        Ok(response.status().is_success())
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| DocpipeError::backend(format!("Failed to send request: {}", e)))?
            .error_for_status()
            .map_err(|e| DocpipeError::backend(format!("Ollama API error: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| DocpipeError::backend(format!("Failed to parse response: {}", e)))
    }

    /// Run `op` up to `max_retries` times with 1s, 2s, 4s... backoff
    async fn with_retry<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_retries => {
                    let delay = Duration::from_secs(2u64.pow(attempt - 1));
                    warn!(
                        "Ollama {} failed (attempt {}/{}): {}. Retrying in {:?}...",
                        what, attempt, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl BackendProbe for OllamaClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn is_reachable(&self) -> bool {
        match self.test_connection().await {
            Ok(reachable) => reachable,
            Err(e) => {
                warn!("Ollama health probe failed: {}", e);
                false
            }
        }
    }
}
