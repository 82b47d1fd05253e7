use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::repository::ExpenseRepository;
use crate::domain::expense::use_cases::delete::{DeleteExpenseParams, DeleteExpenseUseCase};
use crate::domain::logger::Logger;

pub struct DeleteExpenseUseCaseImpl {
    pub repository: Arc<dyn ExpenseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteExpenseUseCase for DeleteExpenseUseCaseImpl {
    async fn execute(&self, params: DeleteExpenseParams) -> Result<(), ExpenseError> {
        self.logger.info(&format!("Deleting expense: {}", params.id));

        self.repository.delete(params.id, &params.user_id).await?;

        self.logger.info(&format!("Expense deleted: {}", params.id));
        Ok(())
    }
}
