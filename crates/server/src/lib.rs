//! docpipe HTTP server
//!
//! actix-web REST API over the model service: analyze, health, fine-tune
//! trigger and background task tracking

pub mod error;
pub mod job_manager;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use docpipe_common::{AppConfig, Result};
use docpipe_llm::ModelService;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Build the model service and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let service = ModelService::from_config(&config).await?;
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config, service));

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
