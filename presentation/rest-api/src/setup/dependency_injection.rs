use std::sync::Arc;

use logger::TracingLogger;
use persistence::expense::repository::ExpenseRepositoryPostgres;

use inference::anthropic::AnthropicInference;
use inference::client::{InferenceHttpClient, InferenceProvider};
use inference::gemini::GeminiInference;
use inference::openai::OpenAIInference;

use business::application::expense::create::CreateExpenseUseCaseImpl;
use business::application::expense::delete::DeleteExpenseUseCaseImpl;
use business::application::expense::list::ListExpensesUseCaseImpl;
use business::application::expense::summarize::SummarizeExpensesUseCaseImpl;
use business::application::expense::update::UpdateExpenseUseCaseImpl;
use business::application::receipt::extract::ReceiptExtractor;
use business::domain::receipt::services::InferenceClient;

use crate::config::inference_config::InferenceConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub receipt_api: crate::api::receipt::routes::ReceiptApi,
    pub expense_api: crate::api::expense::routes::ExpenseApi,
}

fn inference_client(config: &InferenceConfig) -> Arc<dyn InferenceClient> {
    let http = InferenceHttpClient::new(
        config.api_key.clone(),
        Some(config.model.clone()),
        config.base_url.clone(),
        config.request_timeout,
    );

    tracing::info!(
        provider = %config.provider,
        model = %config.model,
        configured = http.is_configured(),
        "Inference client ready"
    );

    match config.provider {
        InferenceProvider::Anthropic => Arc::new(AnthropicInference::new(http)),
        InferenceProvider::Gemini => Arc::new(GeminiInference::new(http)),
        InferenceProvider::OpenAI => Arc::new(OpenAIInference::new(http)),
    }
}

impl DependencyContainer {
    pub async fn new(pool: sqlx::PgPool, inference: &InferenceConfig) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let expense_repository = Arc::new(ExpenseRepositoryPostgres::new(pool));
        let client = inference_client(inference);

        // Receipt use cases
        let extract_use_case = Arc::new(ReceiptExtractor {
            client,
            logger: logger.clone(),
        });

        // Expense use cases
        let create_use_case = Arc::new(CreateExpenseUseCaseImpl {
            repository: expense_repository.clone(),
            logger: logger.clone(),
        });
        let list_use_case = Arc::new(ListExpensesUseCaseImpl {
            repository: expense_repository.clone(),
            logger: logger.clone(),
        });
        let summarize_use_case = Arc::new(SummarizeExpensesUseCaseImpl {
            repository: expense_repository.clone(),
            logger: logger.clone(),
        });
        let update_use_case = Arc::new(UpdateExpenseUseCaseImpl {
            repository: expense_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteExpenseUseCaseImpl {
            repository: expense_repository,
            logger,
        });

        let receipt_api =
            crate::api::receipt::routes::ReceiptApi::new(extract_use_case, inference.scan_timeout);

        let expense_api = crate::api::expense::routes::ExpenseApi::new(
            create_use_case,
            list_use_case,
            summarize_use_case,
            update_use_case,
            delete_use_case,
        );

        Ok(Self {
            health_api,
            receipt_api,
            expense_api,
        })
    }
}
