use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::model::Expense;
use crate::domain::expense::repository::ExpenseRepository;
use crate::domain::expense::use_cases::update::{UpdateExpenseParams, UpdateExpenseUseCase};
use crate::domain::logger::Logger;

pub struct UpdateExpenseUseCaseImpl {
    pub repository: Arc<dyn ExpenseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateExpenseUseCase for UpdateExpenseUseCaseImpl {
    async fn execute(&self, params: UpdateExpenseParams) -> Result<Expense, ExpenseError> {
        self.logger.info(&format!("Updating expense: {}", params.id));

        let existing = self
            .repository
            .get_by_id(params.id, &params.user_id)
            .await?;

        let updated = existing.revise(
            &params.description,
            params.amount,
            params.date,
            params.category,
        )?;

        self.repository.save(&updated).await?;

        self.logger.info(&format!("Expense updated: {}", updated.id));
        Ok(updated)
    }
}
