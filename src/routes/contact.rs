use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use flowsense_contact::Delivery;
use serde_json::Value;

use crate::{error::AppError, routes::AppState};

/// POST /api/contact - relay a contact form submission to the lead webhook
///
/// The body is forwarded as received; it only has to be valid JSON. A body
/// that cannot be read (over the size limit, aborted) is an internal error.
pub async fn action(
    State(app_state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    match app_state.relay.forward(body?).await? {
        Delivery::Accepted(payload) => Ok(Json(payload)),
        Delivery::Rejected { status, details } => Err(AppError::Rejected { status, details }),
    }
}
