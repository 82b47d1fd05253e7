use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::receipt::errors::ExtractionError;
use crate::domain::receipt::model::ExtractionOutcome;
use crate::domain::receipt::parser::parse_draft;
use crate::domain::receipt::prompt::ExtractionPrompt;
use crate::domain::receipt::services::InferenceClient;
use crate::domain::receipt::use_cases::extract::{ExtractReceiptParams, ExtractReceiptUseCase};

/// Turns one receipt photo into one expense draft (or a typed failure).
///
/// Stateless: a single inference call per invocation, no retries, nothing
/// kept between calls, so one instance serves concurrent requests.
pub struct ReceiptExtractor {
    pub client: Arc<dyn InferenceClient>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ExtractReceiptUseCase for ReceiptExtractor {
    async fn execute(&self, params: ExtractReceiptParams) -> ExtractionOutcome {
        let image = match params.image {
            Some(image) if !image.is_empty() => image,
            _ => {
                self.logger.warn("Receipt extraction requested without an image");
                return Err(ExtractionError::MissingInput);
            }
        };

        if !self.client.is_configured() {
            self.logger
                .error("Inference client is not configured: missing API key or model");
            return Err(ExtractionError::Misconfigured);
        }

        self.logger.info(&format!(
            "Extracting receipt: {} bytes ({})",
            image.len(),
            image.media_type()
        ));

        let encoded = image.encode();
        let prompt = ExtractionPrompt::for_receipt();

        let reply = self.client.infer(&prompt, &encoded).await.map_err(|err| {
            self.logger.warn(&format!("Inference call failed: {}", err));
            ExtractionError::from(err)
        })?;

        self.logger.debug(&format!("Inference reply: {}", reply));

        let draft = parse_draft(&reply).inspect_err(|err| {
            self.logger.warn(&format!(
                "Could not turn inference reply into a draft: {} ({:?})",
                err,
                err.kind()
            ));
        })?;

        self.logger.info(&format!(
            "Receipt extracted: amount {}, category {}, date {}",
            draft.amount,
            draft.category,
            draft
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        ));

        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receipt::errors::ErrorKind;
    use crate::domain::receipt::model::{EncodedImage, RawImage};
    use crate::domain::receipt::services::{InferenceError, InferenceErrorKind};
    use crate::domain::shared::amount::Amount;
    use crate::domain::shared::category::ExpenseCategory;
    use chrono::NaiveDate;
    use mockall::mock;

    mock! {
        pub Inference {}

        #[async_trait]
        impl InferenceClient for Inference {
            fn is_configured(&self) -> bool;
            async fn infer(
                &self,
                prompt: &ExtractionPrompt,
                image: &EncodedImage,
            ) -> Result<String, InferenceError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn configured_client(reply: Result<String, InferenceError>) -> MockInference {
        let mut client = MockInference::new();
        client.expect_is_configured().returning(|| true);
        client
            .expect_infer()
            .times(1)
            .returning(move |_, _| reply.clone());
        client
    }

    fn extractor(client: MockInference) -> ReceiptExtractor {
        ReceiptExtractor {
            client: Arc::new(client),
            logger: mock_logger(),
        }
    }

    fn receipt_photo() -> Option<RawImage> {
        Some(RawImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10], None))
    }

    #[tokio::test]
    async fn should_return_draft_when_reply_is_clean_json() {
        let use_case = extractor(configured_client(Ok(
            r#"{"description":"Copec","amount":35000,"date":"2024-05-10","category":"Transport"}"#
                .to_string(),
        )));

        let draft = use_case
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await
            .unwrap();

        assert_eq!(draft.description, "Copec");
        assert_eq!(draft.amount, Amount::parse("35000").unwrap());
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert_eq!(draft.category, ExpenseCategory::Transport);
    }

    #[tokio::test]
    async fn should_send_prompt_and_lossless_image_in_one_call() {
        let bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        let expected = bytes.clone();

        let mut client = MockInference::new();
        client.expect_is_configured().returning(|| true);
        client
            .expect_infer()
            .withf(move |prompt, image| {
                prompt.text() == ExtractionPrompt::for_receipt().text()
                    && image.media_type() == "image/png"
                    && image.decode().map(|b| b == expected).unwrap_or(false)
            })
            .times(1)
            .returning(|_, _| Ok(r#"{"description":"Cafe","amount":2500}"#.to_string()));

        let result = extractor(client)
            .execute(ExtractReceiptParams {
                image: Some(RawImage::new(bytes, Some("image/png"))),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_extract_scenario_with_prose_around_payload() {
        let use_case = extractor(configured_client(Ok(
            "Total: $ OK\n{\"description\":\"Supermarket\",\"amount\":\"1.250\",\"date\":null,\"category\":\"Food\"}\nThanks!"
                .to_string(),
        )));

        let draft = use_case
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await
            .unwrap();

        assert_eq!(draft.description, "Supermarket");
        assert_eq!(draft.amount, Amount::parse("1250").unwrap());
        assert_eq!(draft.date, None);
        assert_eq!(draft.category, ExpenseCategory::Food);
    }

    #[tokio::test]
    async fn should_fail_with_missing_input_before_any_call_when_no_image() {
        let mut client = MockInference::new();
        client.expect_is_configured().times(0);
        client.expect_infer().times(0);
        let use_case = extractor(client);

        let result = use_case.execute(ExtractReceiptParams { image: None }).await;

        assert_eq!(result.unwrap_err(), ExtractionError::MissingInput);
    }

    #[tokio::test]
    async fn should_fail_with_missing_input_when_image_is_empty() {
        let mut client = MockInference::new();
        client.expect_is_configured().times(0);
        client.expect_infer().times(0);

        let result = extractor(client)
            .execute(ExtractReceiptParams {
                image: Some(RawImage::new(Vec::new(), Some("image/jpeg"))),
            })
            .await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::MissingInput);
    }

    #[tokio::test]
    async fn should_fail_with_misconfigured_before_any_call_when_client_not_configured() {
        let mut client = MockInference::new();
        client.expect_is_configured().times(1).returning(|| false);
        client.expect_infer().times(0);

        let result = extractor(client)
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await;

        assert_eq!(result.unwrap_err(), ExtractionError::Misconfigured);
    }

    #[tokio::test]
    async fn should_report_rate_limit_as_distinguishable_upstream_error() {
        let use_case = extractor(configured_client(Err(InferenceError::from_status(
            429,
            "quota exceeded",
        ))));

        let err = use_case
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamError);
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn should_report_transport_failure_as_upstream_error() {
        let use_case = extractor(configured_client(Err(InferenceError::new(
            InferenceErrorKind::Transport,
            "connection reset",
        ))));

        let err = use_case
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UpstreamError);
        assert!(!err.is_rate_limited());
    }

    #[tokio::test]
    async fn should_report_unparseable_reply() {
        let use_case = extractor(configured_client(Ok(
            "Sorry, I cannot process this image.".to_string()
        )));

        let err = use_case
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnparseableResponse);
    }

    #[tokio::test]
    async fn should_coerce_unknown_category_to_other() {
        let use_case = extractor(configured_client(Ok(
            r#"{"description":"Tech Shop","amount":19990,"date":"2024-07-01","category":"Gadgets"}"#
                .to_string(),
        )));

        let draft = use_case
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await
            .unwrap();

        assert_eq!(draft.category, ExpenseCategory::Other);
        assert_eq!(draft.description, "Tech Shop");
    }

    #[tokio::test]
    async fn should_report_invalid_amount() {
        let use_case = extractor(configured_client(Ok(
            r#"{"description":"Tech Shop","amount":"n/a"}"#.to_string(),
        )));

        let err = use_case
            .execute(ExtractReceiptParams {
                image: receipt_photo(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidField);
    }

    #[tokio::test]
    async fn should_serve_concurrent_extractions_independently() {
        let mut client = MockInference::new();
        client.expect_is_configured().returning(|| true);
        client.expect_infer().times(2).returning(|_, image| {
            let bytes = image.decode().unwrap_or_default();
            Ok(format!(
                r#"{{"description":"Receipt {}","amount":{}}}"#,
                bytes[0], bytes[0]
            ))
        });
        let use_case = extractor(client);

        let (first, second) = tokio::join!(
            use_case.execute(ExtractReceiptParams {
                image: Some(RawImage::new(vec![1], None)),
            }),
            use_case.execute(ExtractReceiptParams {
                image: Some(RawImage::new(vec![2], None)),
            })
        );

        assert_eq!(first.unwrap().description, "Receipt 1");
        assert_eq!(second.unwrap().description, "Receipt 2");
    }
}
