use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    /// i18n message code, e.g. `receipt.rate_limited`
    pub message: String,
    /// Machine-readable failure kind, when the error has one
    #[oai(skip_serializing_if_is_none)]
    pub kind: Option<String>,
    /// Human-readable explanation to show as-is
    #[oai(skip_serializing_if_is_none)]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: None,
            detail: None,
        }
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
