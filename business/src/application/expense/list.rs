use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::expense::date_range::DateRange;
use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::model::Expense;
use crate::domain::expense::repository::ExpenseRepository;
use crate::domain::expense::use_cases::list::{ListExpensesParams, ListExpensesUseCase};
use crate::domain::logger::Logger;

pub struct ListExpensesUseCaseImpl {
    pub repository: Arc<dyn ExpenseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListExpensesUseCase for ListExpensesUseCaseImpl {
    async fn execute(&self, params: ListExpensesParams) -> Result<Vec<Expense>, ExpenseError> {
        let range = DateRange::resolve(params.from, params.to, Utc::now().date_naive())?;
        self.logger.info(&format!(
            "Listing expenses for user {} from {} to {}",
            params.user_id,
            range.from(),
            range.to()
        ));

        let expenses = self
            .repository
            .get_in_range(&params.user_id, &range)
            .await?;

        self.logger
            .debug(&format!("Found {} expenses", expenses.len()));
        Ok(expenses)
    }
}
