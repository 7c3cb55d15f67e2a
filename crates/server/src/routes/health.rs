use actix_web::{get, web, HttpResponse};
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;
use crate::types::{BackendStatus, HealthResponse};

/// GET /health - configured models and model server reachability
#[get("/health")]
pub async fn health(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let reachable = state.service.backend_reachable().await;
    if !reachable {
        warn!("Health check: model server unreachable");
    }

    HttpResponse::Ok().json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" }.to_string(),
        models: state.service.models().into(),
        backend: BackendStatus {
            url: state.service.backend_url().to_string(),
            reachable,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::configure;
    use crate::test_support::{test_state, StubOptions};
    use crate::types::HealthModels;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_models() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(StubOptions::default())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "ok");
        assert_eq!(
            body.models,
            HealthModels {
                summarization: "stub-summarizer".to_string(),
                question_answering: "stub-qa".to_string(),
            }
        );
        assert!(body.backend.reachable);
    }

    #[actix_web::test]
    async fn test_health_degraded_when_backend_down() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(StubOptions {
                    backend_down: true,
                    ..StubOptions::default()
                })))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: HealthResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, "degraded");
        assert_eq!(body.backend.url, "http://stub:11434");
    }
}
