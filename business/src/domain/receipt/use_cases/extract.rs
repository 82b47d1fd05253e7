use async_trait::async_trait;

use crate::domain::receipt::model::{ExtractionOutcome, RawImage};

pub struct ExtractReceiptParams {
    /// `None` when the upload carried no file.
    pub image: Option<RawImage>,
}

#[async_trait]
pub trait ExtractReceiptUseCase: Send + Sync {
    async fn execute(&self, params: ExtractReceiptParams) -> ExtractionOutcome;
}
