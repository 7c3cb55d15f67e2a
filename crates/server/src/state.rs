use docpipe_common::AppConfig;
use docpipe_llm::ModelService;
use std::sync::Arc;

use crate::job_manager::JobManager;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Model collaborators, built once at startup
    pub service: Arc<ModelService>,

    /// Background task tracker
    pub job_manager: Arc<JobManager>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, service: ModelService) -> Self {
        Self {
            config,
            service: Arc::new(service),
            job_manager: Arc::new(JobManager::new()),
        }
    }
}
