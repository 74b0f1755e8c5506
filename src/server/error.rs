use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::commands::{CommandError, ErrorKind};

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound | ErrorKind::NoAnswerFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::TranslationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::TranslationTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind);
        // Internal details stay in the log
        let message = match self.kind {
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.message,
        };
        let body = json!({
            "error": message,
            "kind": self.kind,
            "details": self.details,
        });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for CommandError {
    fn from(rejection: JsonRejection) -> Self {
        CommandError::new(ErrorKind::Validation, "Invalid request data")
            .with_details(json!(rejection.body_text()))
    }
}
