use actix_web::{get, post, web, HttpResponse};
use docpipe_common::DocpipeError;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::CancelTaskRequest;

#[get("/tasks")]
pub async fn get_tasks(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(state.job_manager.get_tasks().await)
}

#[post("/cancel")]
pub async fn cancel_task(
    req: web::Json<CancelTaskRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    if state.job_manager.cancel_task(&req.task_id).await {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Task cancelled"
        })))
    } else {
        Err(DocpipeError::not_found(format!("no running task {}", req.task_id)).into())
    }
}

#[get("/progress/{task_id}")]
pub async fn get_task_progress(
    task_id: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    match state.job_manager.get_task(&task_id).await {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(DocpipeError::not_found(format!("task {}", task_id)).into()),
    }
}
