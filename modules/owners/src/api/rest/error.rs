use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use http_kit::problem::from_parts;
use http_kit::{FieldError, ProblemResponse};

use crate::domain::error::DomainError;

/// Map an unreadable request body to a 400 problem. Readable but invalid forms
/// are re-rendered as views instead.
pub fn map_json_rejection(rejection: &JsonRejection, instance: &str) -> ProblemResponse {
    tracing::warn!(error = %rejection, "Rejected request body");
    from_parts(
        StatusCode::BAD_REQUEST,
        "OWNERS_BAD_REQUEST",
        "Malformed request body",
        rejection.body_text(),
        instance,
    )
}

/// Field-level errors for a re-rendered form.
pub fn field_errors(e: &DomainError) -> Vec<FieldError> {
    e.violations()
        .iter()
        .map(|v| FieldError {
            field: v.field.to_string(),
            code: v.code.to_string(),
            message: v.message.clone(),
        })
        .collect()
}
