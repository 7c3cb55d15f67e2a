use actix_web::{post, web, HttpResponse};
use docpipe_common::DocpipeError;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{AnalyzeRequest, AnalyzeResponse};

/// Summarize a document and/or answer questions about it
#[post("/analyze")]
pub async fn analyze(
    req: web::Json<AnalyzeRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    if req.text.trim().is_empty() {
        return Err(DocpipeError::invalid_input("text cannot be empty").into());
    }

    info!(
        "Analyze request - Text length: {} chars, summary: {}, questions: {}",
        req.text.len(),
        req.generate_summary,
        req.questions().map_or(0, <[String]>::len)
    );

    let mut response = AnalyzeResponse::default();

    if req.generate_summary {
        let (max_length, min_length) = req.summary_bounds();
        let summary = state
            .service
            .summarize(&req.text, max_length, min_length)
            .await?;
        response.summary = Some(summary);
    }

    if let Some(questions) = req.questions() {
        let answers = state.service.extract(questions, &req.text).await?;
        response.extracted_info = Some(answers);
    }

    Ok(HttpResponse::Ok().json(response))
}
