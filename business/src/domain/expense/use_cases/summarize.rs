use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::expense::errors::ExpenseError;
use crate::domain::expense::summary::ExpenseSummary;
use crate::domain::shared::value_objects::UserId;

pub struct SummarizeExpensesParams {
    pub user_id: UserId,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[async_trait]
pub trait SummarizeExpensesUseCase: Send + Sync {
    async fn execute(&self, params: SummarizeExpensesParams)
    -> Result<ExpenseSummary, ExpenseError>;
}
