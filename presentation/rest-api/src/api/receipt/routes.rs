use std::sync::Arc;
use std::time::Duration;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::receipt::errors::ExtractionError;
use business::domain::receipt::model::RawImage;
use business::domain::receipt::use_cases::extract::{ExtractReceiptParams, ExtractReceiptUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::receipt::dto::{ExpenseDraftResponse, ScanReceiptRequest};
use crate::api::security::SupabaseBearer;
use crate::api::tags::ApiTags;

pub struct ReceiptApi {
    extract_use_case: Arc<dyn ExtractReceiptUseCase>,
    scan_timeout: Duration,
}

impl ReceiptApi {
    pub fn new(extract_use_case: Arc<dyn ExtractReceiptUseCase>, scan_timeout: Duration) -> Self {
        Self {
            extract_use_case,
            scan_timeout,
        }
    }

    async fn extract(&self, body: ScanReceiptRequest) -> Result<ExpenseDraftResponse, ExtractionError> {
        let image = match body.receipt {
            Some(upload) => {
                let media_type = upload.content_type().map(str::to_string);
                let bytes = upload.into_vec().await.map_err(|e| {
                    tracing::warn!("Could not read uploaded receipt: {e}");
                    ExtractionError::MissingInput
                })?;
                Some(RawImage::new(bytes, media_type.as_deref()))
            }
            None => None,
        };

        let outcome = tokio::time::timeout(
            self.scan_timeout,
            self.extract_use_case.execute(ExtractReceiptParams { image }),
        )
        .await
        .map_err(|_| {
            tracing::warn!(timeout = ?self.scan_timeout, "Receipt scan exceeded its deadline");
            ExtractionError::Cancelled
        })?;

        outcome.map(|draft| draft.into())
    }
}

/// Receipt scanning API
///
/// Reads a receipt photo and returns a pre-filled expense. Nothing is stored.
#[OpenApi]
impl ReceiptApi {
    /// Scan a receipt image
    ///
    /// Uses a vision model to extract description, total amount, date and
    /// category from a receipt photo sent as the multipart field `receipt`.
    #[oai(path = "/receipts/scan", method = "post", tag = "ApiTags::Receipts")]
    async fn scan_receipt(
        &self,
        _auth: SupabaseBearer,
        body: ScanReceiptRequest,
    ) -> ScanReceiptResponse {
        match self.extract(body).await {
            Ok(draft) => ScanReceiptResponse::Ok(Json(draft)),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ScanReceiptResponse::BadRequest(json),
                    422 => ScanReceiptResponse::UnprocessableEntity(json),
                    429 => ScanReceiptResponse::TooManyRequests(json),
                    503 => ScanReceiptResponse::ServiceUnavailable(json),
                    504 => ScanReceiptResponse::GatewayTimeout(json),
                    _ => ScanReceiptResponse::BadGateway(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ScanReceiptResponse {
    #[oai(status = 200)]
    Ok(Json<ExpenseDraftResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 429)]
    TooManyRequests(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 503)]
    ServiceUnavailable(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}
