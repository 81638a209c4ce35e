use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Submission failed")]
    Rejected { status: StatusCode, details: String },

    #[error("Internal server error")]
    InternalError(String),
}

impl From<flowsense_contact::Error> for AppError {
    fn from(err: flowsense_contact::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::InternalError(format!(
            "unreadable request body ({}): {}",
            rejection.status(),
            rejection.body_text()
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_display = self.to_string();
        match self {
            AppError::Rejected { status, details } => (
                status,
                Json(json!({ "error": error_display, "details": details })),
            )
                .into_response(),
            AppError::InternalError(msg) => {
                tracing::error!("Contact form submission error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": error_display })),
                )
                    .into_response()
            }
        }
    }
}
