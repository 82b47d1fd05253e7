use chrono::NaiveDate;
use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};

use business::domain::receipt::model::ExpenseDraft;

use crate::api::expense::dto::ExpenseCategoryDto;

#[derive(Debug, Multipart)]
pub struct ScanReceiptRequest {
    /// Receipt photo (JPEG, PNG, WebP, ...)
    pub receipt: Option<Upload>,
}

/// Pre-filled expense form, for the user to confirm or edit before saving
#[derive(Debug, Clone, Object)]
pub struct ExpenseDraftResponse {
    pub description: String,
    /// Canonical decimal amount without grouping separators
    pub amount: String,
    /// Absent when the receipt date could not be read
    #[oai(skip_serializing_if_is_none)]
    pub date: Option<NaiveDate>,
    pub category: ExpenseCategoryDto,
}

impl From<ExpenseDraft> for ExpenseDraftResponse {
    fn from(draft: ExpenseDraft) -> Self {
        Self {
            description: draft.description,
            amount: draft.amount.to_string(),
            date: draft.date,
            category: draft.category.into(),
        }
    }
}
