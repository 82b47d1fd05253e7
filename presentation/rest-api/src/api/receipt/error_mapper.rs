use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::receipt::errors::{ErrorKind, ExtractionError};

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ExtractionError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match self.kind() {
            ErrorKind::MissingInput => (StatusCode::BAD_REQUEST, "ValidationError"),
            ErrorKind::InvalidField | ErrorKind::UnparseableResponse => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ExtractionError")
            }
            ErrorKind::Misconfigured => (StatusCode::SERVICE_UNAVAILABLE, "ServiceUnavailable"),
            ErrorKind::UpstreamError if self.is_rate_limited() => {
                (StatusCode::TOO_MANY_REQUESTS, "RateLimited")
            }
            ErrorKind::UpstreamError => (StatusCode::BAD_GATEWAY, "UpstreamError"),
            ErrorKind::Cancelled => (StatusCode::GATEWAY_TIMEOUT, "Timeout"),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: self.to_string(),
                kind: Some(self.kind().to_string()),
                detail: Some(self.user_message()),
            }),
        )
    }
}
