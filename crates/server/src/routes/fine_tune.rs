use actix_web::{post, web, HttpResponse};
use docpipe_llm::validate_examples;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{FineTuneRequest, TaskStartedResponse};

/// Start a fine-tune run in the background
#[post("/fine-tune")]
pub async fn fine_tune(
    req: web::Json<FineTuneRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();

    // Reject bad requests before a task exists
    validate_examples(&req.examples)?;
    let output_dir = state.config.resolve_fine_tune_dir(&req.output_dir)?;

    let task_id = state
        .job_manager
        .create_task("fine_tune", output_dir.display().to_string())
        .await;

    info!(
        "Fine-tune task {} started: {} examples -> {}",
        task_id,
        req.examples.len(),
        output_dir.display()
    );

    let state_clone = state.get_ref().clone();
    let task_id_clone = task_id.clone();

    let handle = tokio::spawn(async move {
        state_clone
            .job_manager
            .update_progress(&task_id_clone, 10, "Preparing training set...")
            .await;

        match state_clone
            .service
            .fine_tune(&req.examples, &output_dir, req.base_model.as_deref())
            .await
        {
            Ok(report) => {
                state_clone
                    .job_manager
                    .complete_task(&task_id_clone, serde_json::to_value(&report).ok())
                    .await;
            }
            Err(e) => {
                error!("Fine-tune task {} failed: {}", task_id_clone, e);
                state_clone
                    .job_manager
                    .fail_task(&task_id_clone, e.to_string())
                    .await;
            }
        }
    });
    state.job_manager.attach(&task_id, handle.abort_handle()).await;

    Ok(HttpResponse::Accepted().json(TaskStartedResponse {
        task_id,
        message: "Fine-tune started".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::configure;
    use crate::test_support::{test_state, StubOptions};
    use crate::types::{TaskInfo, TaskStatus};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::time::Duration;

    fn body(output_dir: &str) -> serde_json::Value {
        json!({
            "examples": [{ "text": "A long report.", "summary": "Report." }],
            "output_dir": output_dir
        })
    }

    async fn wait_for_finish(state: &Arc<AppState>, task_id: &str) -> TaskInfo {
        for _ in 0..100 {
            let task = state.job_manager.get_task(task_id).await.unwrap();
            if task.status != TaskStatus::Running {
                return task;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("task {task_id} did not finish");
    }

    #[actix_web::test]
    async fn test_fine_tune_completes() {
        let state = test_state(StubOptions::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/fine-tune")
            .set_json(body("news"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let started: TaskStartedResponse = test::read_body_json(resp).await;
        let task = wait_for_finish(&state, &started.task_id).await;

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.result.unwrap()["example_count"], 1);
    }

    #[actix_web::test]
    async fn test_fine_tune_failure_is_reported() {
        let state = test_state(StubOptions {
            fine_tune_fails: true,
            ..StubOptions::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/fine-tune")
            .set_json(body("news"))
            .to_request();
        let started: TaskStartedResponse = test::call_and_read_body_json(&app, req).await;
        let task = wait_for_finish(&state, &started.task_id).await;

        assert_eq!(task.status, TaskStatus::Failed);
        assert!(task.message.contains("trainer crashed"));
    }

    #[actix_web::test]
    async fn test_fine_tune_rejects_bad_requests() {
        let state = test_state(StubOptions::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/fine-tune")
            .set_json(body("../outside"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/fine-tune")
            .set_json(json!({ "examples": [], "output_dir": "news" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assert!(state.job_manager.get_tasks().await.is_empty());
    }
}
