use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use docpipe_common::DocpipeError;
use std::fmt;

use crate::types::ErrorResponse;

/// HTTP wrapper for `DocpipeError`
#[derive(Debug)]
pub struct ApiError(pub DocpipeError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DocpipeError> for ApiError {
    fn from(error: DocpipeError) -> Self {
        Self(error)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.0.kind().to_string(),
            details: Some(self.0.to_string()),
        })
    }
}
