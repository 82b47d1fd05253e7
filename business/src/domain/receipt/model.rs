use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;

use super::errors::ExtractionError;
use crate::domain::shared::amount::Amount;
use crate::domain::shared::category::ExpenseCategory;

/// Media type assumed when the uploader declares none (clients usually
/// re-encode photos to JPEG before upload).
pub const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Uploaded receipt photo, held only for the duration of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    bytes: Vec<u8>,
    media_type: String,
}

impl RawImage {
    pub fn new(bytes: Vec<u8>, media_type: Option<&str>) -> Self {
        Self {
            bytes,
            media_type: normalize_media_type(media_type),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Base64 transport encoding, tagged with the media type.
    pub fn encode(&self) -> EncodedImage {
        EncodedImage {
            data: STANDARD.encode(&self.bytes),
            media_type: self.media_type.clone(),
        }
    }
}

fn normalize_media_type(declared: Option<&str>) -> String {
    let essence = declared
        .and_then(|m| m.split(';').next())
        .map(|m| m.trim().to_lowercase())
        .unwrap_or_default();

    if essence.is_empty() || essence == "application/octet-stream" {
        DEFAULT_MEDIA_TYPE.to_string()
    } else {
        essence
    }
}

/// Image payload as sent to the inference boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    data: String,
    media_type: String,
}

impl EncodedImage {
    /// Standard-alphabet, padded base64 of the original bytes.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// Unconfirmed expense extracted from a receipt, awaiting user review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Amount,
    /// `None` when the receipt date could not be read.
    pub date: Option<NaiveDate>,
    pub category: ExpenseCategory,
}

pub type ExtractionOutcome = Result<ExpenseDraft, ExtractionError>;
