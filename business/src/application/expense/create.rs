use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::model::{Expense, NewExpenseProps};
use crate::domain::expense::repository::ExpenseRepository;
use crate::domain::expense::use_cases::create::{CreateExpenseParams, CreateExpenseUseCase};
use crate::domain::logger::Logger;

pub struct CreateExpenseUseCaseImpl {
    pub repository: Arc<dyn ExpenseRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateExpenseUseCase for CreateExpenseUseCaseImpl {
    async fn execute(&self, params: CreateExpenseParams) -> Result<Expense, ExpenseError> {
        self.logger.info(&format!(
            "Creating expense for user {}: {} ({})",
            params.user_id, params.description, params.category
        ));

        let expense = Expense::new(NewExpenseProps {
            user_id: params.user_id,
            description: params.description,
            amount: params.amount,
            date: params.date,
            category: params.category,
        })?;

        self.repository.save(&expense).await.inspect_err(|e| {
            self.logger
                .error(&format!("Failed to save expense {}: {:?}", expense.id, e));
        })?;

        self.logger.info(&format!("Expense created: {}", expense.id));
        Ok(expense)
    }
}
