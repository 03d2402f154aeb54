use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use backoffice_core::DomainError;
use backoffice_pricing::ProductError;

pub fn product_error_to_response(err: ProductError) -> axum::response::Response {
    match err {
        ProductError::Rule(violation) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            violation.code(),
            violation.to_string(),
        ),
        ProductError::Domain(e) => domain_error_to_response(e),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
