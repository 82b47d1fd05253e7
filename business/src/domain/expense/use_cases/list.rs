use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::model::Expense;
use crate::domain::shared::value_objects::UserId;

/// Missing bounds default to the current calendar month.
pub struct ListExpensesParams {
    pub user_id: UserId,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[async_trait]
pub trait ListExpensesUseCase: Send + Sync {
    async fn execute(&self, params: ListExpensesParams) -> Result<Vec<Expense>, ExpenseError>;
}
