use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::expense::errors::ExpenseError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ExpenseError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            ExpenseError::DescriptionEmpty => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "expense.description_empty",
            ),
            ExpenseError::InvalidAmount(_) => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "expense.invalid_amount",
            ),
            ExpenseError::InvalidRange => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "expense.invalid_range",
            ),
            ExpenseError::NotFound => (StatusCode::NOT_FOUND, "NotFound", "expense.not_found"),
            ExpenseError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "repository.persistence",
            ),
        };

        let mut response = ErrorResponse::new(name, message);
        if let ExpenseError::InvalidAmount(reason) = &self {
            response.detail = Some(reason.to_string());
        }
        (status, Json(response))
    }
}
